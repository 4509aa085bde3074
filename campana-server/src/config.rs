//! Server configuration read from the process environment.
//!
//! | Variable        | Default   |                                                   |
//! |-----------------|-----------|---------------------------------------------------|
//! | `STORE_KEY_B64` | required  | base64 JSON credential document for the store     |
//! | `HOST`          | `0.0.0.0` | bind address                                      |
//! | `PORT`          | `8000`    | bind port                                         |
//! | `LOG_LEVEL`     | `info`    | base tracing level or filter directives           |
//! | `LOG_FORMAT`    | `compact` | `compact` or `json`                               |

use campana_core::error::DocumentStoreError;
use campana_mongodb::StoreCredentials;

use crate::logging::LogFormat;

pub const STORE_KEY_VAR: &str = "STORE_KEY_B64";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set in the environment")]
    Missing(&'static str),
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),
    #[error("STORE_KEY_B64 is invalid: {0}")]
    Credentials(#[from] DocumentStoreError),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub credentials: StoreCredentials,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let encoded = var(STORE_KEY_VAR).ok_or(ConfigError::Missing(STORE_KEY_VAR))?;
        let credentials = StoreCredentials::from_base64(&encoded)?;

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: var("LOG_FORMAT")
                .map(|format| LogFormat::parse(&format))
                .unwrap_or_default(),
            credentials,
        })
    }
}
