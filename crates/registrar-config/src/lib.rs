//! # registrar-config
//!
//! Layered configuration loading for Registrar using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REGISTRAR_*` prefix, `__` as separator)
//! 2. Project-level `./registrar.toml`
//! 3. User-level `~/.config/registrar/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REGISTRAR_DATABASE__PATH` -> `database.path`,
//! `REGISTRAR_TERM__QUARTER` -> `term.quarter`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use registrar_config::RegistrarConfig;
//!
//! let config = RegistrarConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod alerts;
mod auth;
mod database;
mod error;
mod term;

pub use alerts::AlertsConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use term::TermConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "registrar.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistrarConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub term: TermConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

impl RegistrarConfig {
    /// Extract and validate configuration from every layer.
    ///
    /// `.env` is not read here; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type, and `ConfigError::InvalidValue` if a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Read `.env` into the process environment, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the provider chain: defaults, then each TOML file that exists,
    /// then `REGISTRAR_*` variables.
    #[must_use]
    pub fn figment() -> Figment {
        let files = [Self::global_config_path(), Some(PathBuf::from(LOCAL_CONFIG_FILE))];
        files
            .into_iter()
            .flatten()
            .filter(|path| path.is_file())
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .merge(Env::prefixed("REGISTRAR_").split("__"))
    }

    /// `~/.config/registrar/config.toml` (platform equivalent via `dirs`).
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("registrar").join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.database.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.auth.hash_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.hash_iterations".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
