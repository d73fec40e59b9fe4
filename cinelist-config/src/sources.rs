use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::util::non_blank;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DB_MAX_OPEN_CONNS: &str = "DB_MAX_OPEN_CONNS";
pub const DB_MIN_CONNS: &str = "DB_MIN_CONNS";
pub const DB_MAX_IDLE_TIME: &str = "DB_MAX_IDLE_TIME";
pub const DB_ACQUIRE_TIMEOUT: &str = "DB_ACQUIRE_TIMEOUT";
pub const CINELIST_ENV: &str = "CINELIST_ENV";
pub const CINELIST_CONFIG: &str = "CINELIST_CONFIG";

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default)]
    pub database: FileDatabaseConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_open_connections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_connections: Option<u32>,
    /// Human duration, e.g. `"15m"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquire_timeout: Option<String>,
}

/// Raw values taken from the environment. Nothing is parsed here so that
/// malformed values surface as errors naming their variable.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub database_url: Option<String>,
    pub max_open_connections: Option<String>,
    pub min_connections: Option<String>,
    pub max_idle_time: Option<String>,
    pub acquire_timeout: Option<String>,
    pub environment: Option<String>,
    pub config_path: Option<PathBuf>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));
        Self {
            database_url: get(DATABASE_URL),
            max_open_connections: get(DB_MAX_OPEN_CONNS),
            min_connections: get(DB_MIN_CONNS),
            max_idle_time: get(DB_MAX_IDLE_TIME),
            acquire_timeout: get(DB_ACQUIRE_TIMEOUT),
            environment: get(CINELIST_ENV),
            config_path: get(CINELIST_CONFIG).map(PathBuf::from),
        }
    }
}
