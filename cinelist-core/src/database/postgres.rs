use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::info;

use crate::MIGRATOR;
use crate::database::infrastructure::postgres::repositories::movies::PostgresMoviesRepository;
use crate::error::{CatalogError, Result};

/// How long `connect` waits for the first round trip before giving up.
const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Statistics about the connection pool
#[derive(Debug, Clone)]
pub struct PoolStats {
    pub size: u32,
    pub idle: u32,
    pub max_size: u32,
    pub min_idle: u32,
}

/// Pool sizing and connection settings.
///
/// `max_connections` is the hard cap that provides backpressure; callers
/// beyond it wait up to `acquire_timeout` for a connection and then fail.
#[derive(Clone)]
pub struct DatabaseOptions {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Option<Duration>,
    pub acquire_timeout: Duration,
}

impl DatabaseOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 25,
            min_connections: 5,
            idle_timeout: Some(Duration::from_secs(15 * 60)),
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

// The URL may carry credentials, so it is never printed.
impl fmt::Debug for DatabaseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseOptions")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("idle_timeout", &self.idle_timeout)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    min_connections: u32,
    movies: PostgresMoviesRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pool_size = self.pool.size();
        let idle = self.pool.num_idle();

        f.debug_struct("PostgresDatabase")
            .field("pool_size", &pool_size)
            .field("idle_connections", &idle)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    /// Open the pool and confirm the server answers within five seconds.
    pub async fn connect(options: &DatabaseOptions) -> Result<Self> {
        let connect_options = PgConnectOptions::from_str(&options.url)
            .map_err(|e| {
                CatalogError::Storage(format!("Invalid database URL: {}", e))
            })?;

        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .min_connections(options.min_connections)
            .acquire_timeout(options.acquire_timeout)
            .idle_timeout(options.idle_timeout)
            .test_before_acquire(true)
            .connect_lazy_with(connect_options);

        let ping = sqlx::query("SELECT 1").execute(&pool);
        match tokio::time::timeout(PING_TIMEOUT, ping).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(CatalogError::Storage(format!(
                    "Database connection failed: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(CatalogError::Storage(format!(
                    "Database did not respond within {}s",
                    PING_TIMEOUT.as_secs()
                )));
            }
        }

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            options.max_connections, options.min_connections
        );

        let mut database = Self::from_pool(pool);
        database.max_connections = options.max_connections;
        database.min_connections = options.min_connections;
        Ok(database)
    }

    /// Wrap an existing pool, e.g. one handed out by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        let options = pool.options();
        let max_connections = options.get_max_connections();
        let min_connections = options.get_min_connections();
        let movies = PostgresMoviesRepository::new(pool.clone());

        Self {
            pool,
            max_connections,
            min_connections,
            movies,
        }
    }

    /// Apply any pending embedded migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.map_err(|e| {
            CatalogError::Storage(format!("Failed to run migrations: {}", e))
        })?;
        info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn movies(&self) -> &PostgresMoviesRepository {
        &self.movies
    }

    pub fn pool_stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle() as u32,
            max_size: self.max_connections,
            min_idle: self.min_connections,
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
