use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use url::Url;

use crate::error::ConfigLoadError;
use crate::models::{
    Config, ConfigMetadata, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_IDLE_TIME,
    DEFAULT_MAX_OPEN_CONNECTIONS, DEFAULT_MIN_CONNECTIONS, DatabaseConfig,
    Environment,
};
use crate::sources::{
    CINELIST_ENV, DB_ACQUIRE_TIMEOUT, DB_MAX_IDLE_TIME, DB_MAX_OPEN_CONNS,
    DB_MIN_CONNS, EnvConfig, FileConfig,
};
use crate::util::{non_blank, parse_duration, parse_u32};

/// A loaded configuration plus any non-fatal warnings raised while resolving it.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: Vec<String>,
}

/// Builds a [`Config`] from defaults, an optional TOML file and the
/// environment, in that order of precedence (later wins).
#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Read variables from a dotenv file. Real environment variables still
    /// take precedence over entries in the file.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let dotenv = match &self.env_file {
            Some(path) => Some(read_env_file(path)?),
            None => None,
        };
        let env = EnvConfig::from_lookup(|key| {
            std::env::var(key).ok().or_else(|| {
                dotenv.as_ref().and_then(|vars| vars.get(key).cloned())
            })
        });
        let mut load = self.load_from(env)?;
        load.config.metadata.env_file_loaded = dotenv.is_some();
        Ok(load)
    }

    /// Resolve configuration from an already gathered environment.
    pub fn load_from(&self, env: EnvConfig) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = Vec::new();

        let config_path = self.config_path.clone().or(env.config_path.clone());
        let file = match &config_path {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };

        let environment = resolve_environment(&file, &env, &mut warnings);
        let database = resolve_database(file, env)?;

        debug!(
            environment = %environment,
            config_path = ?config_path,
            max_open_connections = database.max_open_connections,
            "configuration resolved"
        );

        Ok(ConfigLoad {
            config: Config {
                environment,
                database,
                metadata: ConfigMetadata {
                    config_path,
                    env_file_loaded: false,
                },
            },
            warnings,
        })
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigLoadError> {
    let io_error = |source| ConfigLoadError::ConfigFileIo {
        path: path.to_path_buf(),
        source,
    };
    let mut vars = HashMap::new();
    let iter = dotenvy::from_path_iter(path).map_err(|err| io_error(dotenv_io(err)))?;
    for entry in iter {
        let (key, value) = entry.map_err(|err| io_error(dotenv_io(err)))?;
        vars.insert(key, value);
    }
    Ok(vars)
}

fn dotenv_io(err: dotenvy::Error) -> std::io::Error {
    match err {
        dotenvy::Error::Io(io) => io,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, other.to_string()),
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::ConfigFileIo {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_environment(
    file: &FileConfig,
    env: &EnvConfig,
    warnings: &mut Vec<String>,
) -> Environment {
    let raw = env.environment.clone().or_else(|| non_blank(file.environment.clone()));
    match raw {
        None => Environment::default(),
        Some(raw) => raw.parse().unwrap_or_else(|unknown| {
            warn!(environment = %unknown, "unknown environment, using development");
            warnings.push(format!(
                "{CINELIST_ENV}: unknown environment `{unknown}`, using development"
            ));
            Environment::default()
        }),
    }
}

fn resolve_database(
    file: FileConfig,
    env: EnvConfig,
) -> Result<DatabaseConfig, ConfigLoadError> {
    let db = file.database;

    let url = env
        .database_url
        .or_else(|| non_blank(db.url))
        .ok_or(ConfigLoadError::MissingDatabaseUrl)?;
    validate_database_url(&url)?;

    let max_open_connections = match env.max_open_connections {
        Some(raw) => parse_u32(DB_MAX_OPEN_CONNS, &raw)?,
        None => db.max_open_connections.unwrap_or(DEFAULT_MAX_OPEN_CONNECTIONS),
    };
    let min_connections = match env.min_connections {
        Some(raw) => parse_u32(DB_MIN_CONNS, &raw)?,
        None => db.min_connections.unwrap_or(DEFAULT_MIN_CONNECTIONS),
    };
    if max_open_connections == 0 || min_connections > max_open_connections {
        return Err(ConfigLoadError::PoolBounds {
            min: min_connections,
            max: max_open_connections,
        });
    }

    let max_idle_time = match env.max_idle_time.or(db.max_idle_time) {
        Some(raw) => parse_duration(DB_MAX_IDLE_TIME, &raw)?,
        None => DEFAULT_MAX_IDLE_TIME,
    };
    let acquire_timeout = match env.acquire_timeout.or(db.acquire_timeout) {
        Some(raw) => parse_duration(DB_ACQUIRE_TIMEOUT, &raw)?,
        None => DEFAULT_ACQUIRE_TIMEOUT,
    };

    Ok(DatabaseConfig {
        url,
        max_open_connections,
        min_connections,
        max_idle_time,
        acquire_timeout,
    })
}

fn validate_database_url(raw: &str) -> Result<(), ConfigLoadError> {
    let url = Url::parse(raw)
        .map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
    match url.scheme() {
        "postgres" | "postgresql" => Ok(()),
        scheme => Err(ConfigLoadError::UnsupportedDatabaseScheme {
            scheme: scheme.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_scheme_must_be_postgres() {
        assert!(validate_database_url("postgres://localhost/cinelist").is_ok());
        assert!(validate_database_url("postgresql://u:p@db:5432/x").is_ok());
        assert!(matches!(
            validate_database_url("mysql://localhost/cinelist"),
            Err(ConfigLoadError::UnsupportedDatabaseScheme { .. })
        ));
        assert!(matches!(
            validate_database_url("not a url"),
            Err(ConfigLoadError::InvalidDatabaseUrl { .. })
        ));
    }
}
