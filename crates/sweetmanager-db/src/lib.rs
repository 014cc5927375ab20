//! # SweetManager DB
//!
//! PostgreSQL connection pool initialization.
//!
//! # Example
//!
//! ```ignore
//! use sweetmanager_db::init_db_pool;
//!
//! let pool = init_db_pool().await?;
//! ```

use std::env;

use sqlx::postgres::PgPoolOptions;

/// Connects to the database named by `DATABASE_URL`.
///
/// `DATABASE_MAX_CONNECTIONS` caps the pool size (default 10). The returned
/// pool is cheaply cloneable and is shared by the three role-scoped user
/// stores.
pub async fn init_db_pool() -> Result<PgPool, sqlx::Error> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    tracing::info!(max_connections, "Connecting to database");

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
}

pub use sqlx::PgPool;
