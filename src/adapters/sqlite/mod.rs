//! SQLite-backed session medium.

pub mod connection;
pub mod kv_medium;
pub mod migrations;

pub use connection::{create_test_pool, open_file_pool, verify_connection, ConnectionError, PoolConfig};
pub use kv_medium::SqliteMedium;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};

use sqlx::SqlitePool;
use std::path::Path;

use crate::domain::models::DatabaseConfig;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

/// Open the database file at `path` and bring its schema up to date.
pub async fn initialize_database(
    path: impl AsRef<Path>,
    pool_config: &PoolConfig,
) -> Result<SqlitePool, DatabaseError> {
    let pool = open_file_pool(path.as_ref(), pool_config).await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Open the configured database file and apply migrations.
pub async fn initialize_from_config(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    initialize_database(&config.path, &PoolConfig::from(config)).await
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
    let applied = Migrator::new(pool.clone())
        .run_embedded_migrations(all_embedded_migrations())
        .await?;
    if applied > 0 {
        tracing::info!(applied, "database schema migrated");
    }
    Ok(())
}
