//! Shared `PostgreSQL` store plumbing.
//!
//! Builds the r2d2 connection pool used by the task and user repositories
//! and applies the embedded table definitions at start-up.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by the store adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Table definitions applied by [`ensure_schema`].
pub const SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_taskboard_tables/up.sql");

/// Connection settings for the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub max_pool_size: u32,
}

/// Errors raised while opening the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Applying the table definitions failed.
    #[error("failed to apply schema: {0}")]
    Schema(#[from] diesel::result::Error),
    /// The blocking worker panicked or was cancelled.
    #[error("store worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Opens a connection pool and ensures the tables exist.
///
/// # Errors
///
/// Returns [`StoreError`] when the pool cannot connect or the schema cannot
/// be applied.
pub async fn open(config: &StoreConfig) -> Result<PgPool, StoreError> {
    let database_url = config.database_url.clone();
    let max_pool_size = config.max_pool_size;
    tokio::task::spawn_blocking(move || {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().max_size(max_pool_size).build(manager)?;
        ensure_schema(&pool)?;
        Ok::<_, StoreError>(pool)
    })
    .await?
}

/// Applies [`SCHEMA_SQL`] using a pooled connection.
///
/// This is a blocking operation that should be called from `spawn_blocking`
/// or a synchronous context.
///
/// # Errors
///
/// Returns [`StoreError`] when no connection is available or the SQL fails.
pub fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    let mut connection = pool.get()?;
    connection.batch_execute(SCHEMA_SQL)?;
    tracing::info!("store schema ensured");
    Ok(())
}
