//! Booking and activity log repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::{error, info};

use crate::models::{ActivityLogEntry, NewBooking, SeatStatus};

/// Storage seam for the `bookings` and `logactivity` tables
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Atomically occupy `booking.selected_seat` and append the paired audit row
    ///
    /// Returns `None`, writing nothing, when the seat already has an occupied holder.
    async fn claim_seat(&self, booking: &NewBooking) -> DatabaseResult<Option<ActivityLogEntry>>;

    /// Seats whose booking row is currently occupied, sorted and distinct
    async fn occupied_seats(&self) -> DatabaseResult<Vec<String>>;

    /// Flip every occupied booking row back to available; audit rows are untouched
    async fn reset_occupied(&self) -> DatabaseResult<u64>;

    /// All audit rows ordered by id
    async fn activity_log(&self) -> DatabaseResult<Vec<ActivityLogEntry>>;

    /// Audit rows recorded for one booking id
    async fn activity_for_booking(&self, booking_id: i64) -> DatabaseResult<Vec<ActivityLogEntry>>;

    /// Remove one audit row, returning whether it existed
    async fn delete_activity(&self, id: i64) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed booking repository
#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn entry_from_row(row: &PgRow) -> DatabaseResult<ActivityLogEntry> {
    let status: String = row.try_get("status").map_err(DatabaseError::Query)?;

    Ok(ActivityLogEntry {
        id: row.try_get("id").map_err(DatabaseError::Query)?,
        full_name: row.try_get("full_name").map_err(DatabaseError::Query)?,
        division_name: row.try_get("division_name").map_err(DatabaseError::Query)?,
        selected_seat: row.try_get("selected_seat").map_err(DatabaseError::Query)?,
        status: status.parse::<SeatStatus>().map_err(DatabaseError::Decode)?,
        created_at: row.try_get("created_at").map_err(DatabaseError::Query)?,
    })
}

fn failed(statement: &'static str) -> impl Fn(sqlx::Error) -> DatabaseError {
    move |e| {
        error!(statement, error = %e, "Booking store statement failed");
        DatabaseError::Query(e)
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn claim_seat(&self, booking: &NewBooking) -> DatabaseResult<Option<ActivityLogEntry>> {
        let mut tx = self.pool.begin().await.map_err(failed("begin_booking"))?;

        // The partial unique index turns this insert into a compare-and-set on the seat.
        let booking_id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (selected_seat, status)
            VALUES ($1, 'occupied')
            ON CONFLICT (selected_seat) WHERE status = 'occupied' DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&booking.selected_seat)
        .fetch_optional(&mut *tx)
        .await
        .map_err(failed("insert_booking"))?;

        let Some(booking_id) = booking_id else {
            tx.rollback().await.map_err(failed("rollback_booking"))?;
            info!(seat = %booking.selected_seat, "Seat already occupied");
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            INSERT INTO logactivity (id, full_name, division_name, selected_seat, status)
            VALUES ($1, $2, $3, $4, 'occupied')
            RETURNING id, full_name, division_name, selected_seat, status, created_at
            "#,
        )
        .bind(booking_id)
        .bind(&booking.full_name)
        .bind(&booking.division_name)
        .bind(&booking.selected_seat)
        .fetch_one(&mut *tx)
        .await
        .map_err(failed("insert_logactivity"))?;

        let entry = entry_from_row(&row)?;
        tx.commit().await.map_err(failed("commit_booking"))?;

        Ok(Some(entry))
    }

    async fn occupied_seats(&self) -> DatabaseResult<Vec<String>> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT selected_seat
            FROM bookings
            WHERE status = 'occupied'
            ORDER BY selected_seat
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(failed("select_occupied_seats"))
    }

    async fn reset_occupied(&self) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'available'
            WHERE status = 'occupied'
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(failed("reset_occupied_seats"))?;

        Ok(result.rows_affected())
    }

    async fn activity_log(&self) -> DatabaseResult<Vec<ActivityLogEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, division_name, selected_seat, status, created_at
            FROM logactivity
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(failed("select_logactivity"))?;

        rows.iter().map(entry_from_row).collect()
    }

    async fn activity_for_booking(&self, booking_id: i64) -> DatabaseResult<Vec<ActivityLogEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, division_name, selected_seat, status, created_at
            FROM logactivity
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(failed("select_booking_activity"))?;

        rows.iter().map(entry_from_row).collect()
    }

    async fn delete_activity(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM logactivity WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed("delete_logactivity"))?;

        Ok(result.rows_affected() > 0)
    }
}
