//! Store layer: repository ports and their PostgreSQL adapters.

pub mod infrastructure;
pub mod ports;
pub mod postgres;

use std::future::Future;
use std::time::Duration;

use tracing::warn;

pub use infrastructure::postgres::repositories::movies::PostgresMoviesRepository;
pub use ports::movies::{MoviePage, MoviesRepository};
pub use postgres::{DatabaseOptions, PoolStats, PostgresDatabase};

use crate::error::{CatalogError, Result};

/// Upper bound on any single statement issued by a repository.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Run a statement under [`QUERY_TIMEOUT`].
///
/// Backend failures and elapsed deadlines both surface as
/// [`CatalogError::Storage`]; nothing is retried.
pub(crate) async fn bounded<T, F>(operation: &str, statement: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, statement).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CatalogError::Storage(format!(
            "Failed to {operation}: {e}"
        ))),
        Err(_) => {
            warn!(
                operation,
                timeout_ms = QUERY_TIMEOUT.as_millis() as u64,
                "statement timed out"
            );
            Err(CatalogError::Storage(format!(
                "Timed out after {}s trying to {operation}",
                QUERY_TIMEOUT.as_secs()
            )))
        }
    }
}
