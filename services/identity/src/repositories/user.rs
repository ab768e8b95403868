//! User repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::{error, info};

use crate::models::{NewUser, Role, User};

/// Storage seam for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account; a taken username yields [`DatabaseError::Conflict`]
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Find an account by its unique username
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    /// List every account ordered by id
    async fn list(&self) -> DatabaseResult<Vec<User>>;

    /// Delete an account, returning whether a row was removed
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> DatabaseResult<User> {
    let role: String = row.try_get("role").map_err(DatabaseError::Query)?;
    let role = role.parse::<Role>().map_err(DatabaseError::Decode)?;

    Ok(User {
        id: row.try_get("id").map_err(DatabaseError::Query)?,
        username: row.try_get("username").map_err(DatabaseError::Query)?,
        full_name: row.try_get("full_name").map_err(DatabaseError::Query)?,
        password_hash: row.try_get("password_hash").map_err(DatabaseError::Query)?,
        role,
        created_at: row.try_get("created_at").map_err(DatabaseError::Query)?,
    })
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!(username = %new_user.username, role = %new_user.role, "Creating new user");

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, full_name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, full_name, password_hash, role, created_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.full_name)
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(statement = "insert_user", error = %e, "User insert failed");
            DatabaseError::from_query(e)
        })?;

        user_from_row(&row)
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, full_name, password_hash, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(statement = "select_user_by_username", error = %e, "User lookup failed");
            DatabaseError::Query(e)
        })?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn list(&self) -> DatabaseResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, full_name, password_hash, role, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(statement = "select_users", error = %e, "User listing failed");
            DatabaseError::Query(e)
        })?;

        rows.iter().map(user_from_row).collect()
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(statement = "delete_user", user_id = id, error = %e, "User delete failed");
                DatabaseError::Query(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
