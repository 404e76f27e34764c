//! Database pools and errors
//!
//! The archive database holds the shared study/taxonomy/assembly catalogs;
//! per-species variant databases are reached through [`router::VariantDbRouter`].

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::config::ArchiveDbConfig;

pub mod router;

/// Archive database errors
///
/// Domain not-found conditions never surface here; they are encoded in the
/// result envelope by the query handlers.
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Create the archive database connection pool
pub async fn create_archive_pool(config: &ArchiveDbConfig) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Archive database connection pool created"
    );

    Ok(pool)
}

/// Probe archive database connectivity
pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_message() {
        let err = DbError::from(sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("Database query failed"));
    }
}
