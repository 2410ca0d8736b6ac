// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{BackendConfig, Config, GithubConfig, StoreConfig};

/// Loads the application configuration from the `codequest.toml` file.
///
/// This function is the primary entry point for this crate. The file is
/// optional: a missing file yields the built-in defaults, so a fresh checkout
/// works against a local backend without any setup. Values can also be
/// overridden through `CODEQUEST_*` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("codequest.toml").required(false))
        .add_source(config::Environment::with_prefix("CODEQUEST").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
