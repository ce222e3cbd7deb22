//! Database module
//!
//! This module handles database connections, migrations, and repositories.
//! Each table is one collection of typed records; JSON columns are decoded
//! through `sqlx::types::Json` at this boundary.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::*;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
