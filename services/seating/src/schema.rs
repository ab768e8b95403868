//! Database schema bootstrap

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Create any missing tables and indexes; safe to run on every start
pub async fn apply_schema(pool: &PgPool) -> DatabaseResult<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(DatabaseError::Query)?;

    info!("Database schema applied");
    Ok(())
}
