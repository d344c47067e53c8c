//! Persistence layer: connection pool, migrations, entity models and
//! repositories for the prompt configuration and processing history tables.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Maximum pool size.
pub const MAX_CONNECTIONS: u32 = 10;

/// Delay before the single reconnect attempt in [`create_pool`].
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Create a connection pool.
///
/// A failed first connect is logged and retried exactly once.
pub async fn create_pool(options: PgConnectOptions) -> Result<DbPool, sqlx::Error> {
    match connect(options.clone()).await {
        Ok(pool) => Ok(pool),
        Err(e) => {
            tracing::warn!(error = %e, "Database connect failed, retrying once");
            tokio::time::sleep(RECONNECT_DELAY).await;
            connect(options).await
        }
    }
}

async fn connect(options: PgConnectOptions) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
