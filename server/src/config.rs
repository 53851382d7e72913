use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_PATH: &str = "todos.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl Config {
    /// Read `HOST`, `PORT` and `DATABASE_PATH`, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };
        Ok(Config {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
