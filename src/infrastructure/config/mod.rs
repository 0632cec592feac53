//! Upload configuration loading
//!
//! Defaults merged with an optional TOML file and `TABLECHAT_`-prefixed
//! environment variables, then validated. The limits themselves live in
//! `UploadConfig`; this module only decides where their values come
//! from.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use crate::domain::error::{AppError, Result};
use crate::domain::upload::UploadConfig;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "tablechat.toml";

/// Environment variable prefix, e.g. `TABLECHAT_MAX_ROW_COUNT=500`
pub const ENV_PREFIX: &str = "TABLECHAT_";

/// Load the upload configuration from the default file location
pub fn load_config() -> Result<UploadConfig> {
    load_config_from(CONFIG_FILE)
}

/// Load the upload configuration from a specific TOML file. A missing
/// file is fine; defaults and environment variables still apply.
pub fn load_config_from(path: &str) -> Result<UploadConfig> {
    let config: UploadConfig = Figment::from(Serialized::defaults(UploadConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .map_err(|e| AppError::ConfigError(format!("Failed to load upload config: {}", e)))?;

    config.validate().map_err(AppError::ConfigError)?;
    Ok(config)
}
