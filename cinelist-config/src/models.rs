use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cinelist_core::database::DatabaseOptions;

pub const DEFAULT_MAX_OPEN_CONNECTIONS: u32 = 25;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 5;
pub const DEFAULT_MAX_IDLE_TIME: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub metadata: ConfigMetadata,
}

/// Deployment environment; only affects log verbosity defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(other.to_string()),
        }
    }
}

/// Connection pool settings for the catalog database.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_open_connections: u32,
    pub min_connections: u32,
    pub max_idle_time: Duration,
    pub acquire_timeout: Duration,
}

// Never print the URL: it usually carries the password.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_open_connections", &self.max_open_connections)
            .field("min_connections", &self.min_connections)
            .field("max_idle_time", &self.max_idle_time)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl From<&DatabaseConfig> for DatabaseOptions {
    fn from(config: &DatabaseConfig) -> Self {
        DatabaseOptions {
            url: config.url.clone(),
            max_connections: config.max_open_connections,
            min_connections: config.min_connections,
            idle_timeout: Some(config.max_idle_time),
            acquire_timeout: config.acquire_timeout,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
