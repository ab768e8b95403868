//! Event repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::{Event, EventPayload};

/// Storage seam for the `events` table
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create(&self, payload: &EventPayload) -> DatabaseResult<Event>;
    async fn list(&self) -> DatabaseResult<Vec<Event>>;
    /// Returns `None` when no event has that id
    async fn update(&self, id: i64, payload: &EventPayload) -> DatabaseResult<Option<Event>>;
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed event repository
#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn event_from_row(row: &PgRow) -> DatabaseResult<Event> {
    Ok(Event {
        id: row.try_get("id").map_err(DatabaseError::Query)?,
        name: row.try_get("event_name").map_err(DatabaseError::Query)?,
        time: row.try_get("event_time").map_err(DatabaseError::Query)?,
        detail: row.try_get("event_detail").map_err(DatabaseError::Query)?,
    })
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn create(&self, payload: &EventPayload) -> DatabaseResult<Event> {
        let row = sqlx::query(
            r#"
            INSERT INTO events (event_name, event_time, event_detail)
            VALUES ($1, $2, $3)
            RETURNING id, event_name, event_time, event_detail
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.time)
        .bind(&payload.detail)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        event_from_row(&row)
    }

    async fn list(&self) -> DatabaseResult<Vec<Event>> {
        let rows = sqlx::query(
            "SELECT id, event_name, event_time, event_detail FROM events ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.iter().map(event_from_row).collect()
    }

    async fn update(&self, id: i64, payload: &EventPayload) -> DatabaseResult<Option<Event>> {
        let row = sqlx::query(
            r#"
            UPDATE events
            SET event_name = $1, event_time = $2, event_detail = $3
            WHERE id = $4
            RETURNING id, event_name, event_time, event_detail
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.time)
        .bind(&payload.detail)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        row.as_ref().map(event_from_row).transpose()
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
