//! Contact form repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row};

use crate::models::Contact;

/// Storage seam for the `contacts` table
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn save(&self, contact: &Contact) -> DatabaseResult<()>;
    async fn list(&self) -> DatabaseResult<Vec<Contact>>;
}

#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn save(&self, contact: &Contact) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone, message)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(())
    }

    async fn list(&self) -> DatabaseResult<Vec<Contact>> {
        let rows = sqlx::query(
            "SELECT first_name, last_name, email, phone, message FROM contacts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.into_iter()
            .map(|row| {
                Ok(Contact {
                    first_name: row.try_get("first_name").map_err(DatabaseError::Query)?,
                    last_name: row.try_get("last_name").map_err(DatabaseError::Query)?,
                    email: row.try_get("email").map_err(DatabaseError::Query)?,
                    phone: row.try_get("phone").map_err(DatabaseError::Query)?,
                    message: row.try_get("message").map_err(DatabaseError::Query)?,
                })
            })
            .collect()
    }
}
