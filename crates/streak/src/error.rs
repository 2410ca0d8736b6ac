use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreakError {
    #[error("Unparseable commit timestamp '{raw}': {source}")]
    InvalidTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}
