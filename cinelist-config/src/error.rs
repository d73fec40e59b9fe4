use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    ConfigFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("database URL is not configured; set DATABASE_URL or [database].url")]
    MissingDatabaseUrl,

    #[error("invalid database URL: {source}")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported database URL scheme `{scheme}`; expected postgres or postgresql")]
    UnsupportedDatabaseScheme { scheme: String },

    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid duration for {key}: {source}")]
    InvalidDuration {
        key: &'static str,
        #[source]
        source: humantime::DurationError,
    },

    #[error(
        "min_connections ({min}) must be between 0 and max_open_connections ({max}), and max_open_connections must be positive"
    )]
    PoolBounds { min: u32, max: u32 },
}
