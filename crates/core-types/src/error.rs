use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid {0}: '{1}'")]
    InvalidInput(String, String),
}
