use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Connection, ConnectionStatus};

const RETURNING_COLUMNS: &str =
    "id, requester_id, recipient_id, status, message, created_at, updated_at";

#[derive(FromRow)]
struct ConnectionRow {
    id: Uuid,
    requester_id: String,
    recipient_id: String,
    status: String,
    message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ConnectionRow> for Connection {
    type Error = StorageError;

    fn try_from(row: ConnectionRow) -> Result<Self> {
        let status = ConnectionStatus::parse(&row.status).ok_or_else(|| {
            StorageError::Database(sqlx::Error::Decode(
                format!("invalid connection status {}", row.status).into(),
            ))
        })?;

        Ok(Self {
            id: row.id,
            requester_id: row.requester_id,
            recipient_id: row.recipient_id,
            status,
            message: row.message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct ConnectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ConnectionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Connections on either side for a user, most recent first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Connection>> {
        let rows = sqlx::query_as::<_, ConnectionRow>(&format!(
            r#"
            SELECT {RETURNING_COLUMNS}
            FROM connections
            WHERE requester_id = $1 OR recipient_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Connection::try_from).collect()
    }

    /// Most recent connection between two users, whichever side asked
    pub async fn find_between(&self, a: &str, b: &str) -> Result<Option<Connection>> {
        let row = sqlx::query_as::<_, ConnectionRow>(&format!(
            r#"
            SELECT {RETURNING_COLUMNS}
            FROM connections
            WHERE (requester_id = $1 AND recipient_id = $2)
               OR (requester_id = $2 AND recipient_id = $1)
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(a)
        .bind(b)
        .fetch_optional(self.pool)
        .await?;

        row.map(Connection::try_from).transpose()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Connection> {
        sqlx::query_as::<_, ConnectionRow>(&format!(
            "SELECT {RETURNING_COLUMNS} FROM connections WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?
        .try_into()
    }

    pub async fn create(
        &self,
        requester_id: &str,
        recipient_id: &str,
        message: Option<&str>,
    ) -> Result<Connection> {
        sqlx::query_as::<_, ConnectionRow>(&format!(
            r#"
            INSERT INTO connections (id, requester_id, recipient_id, status, message)
            VALUES ($1, $2, $3, 'pending', $4)
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(requester_id)
        .bind(recipient_id)
        .bind(message)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            err if err.is_unique_violation() => {
                StorageError::ConstraintViolation("Connection already requested".to_string())
            }
            err => err,
        })?
        .try_into()
    }

    /// Answer a pending request. Already answered requests are a constraint violation.
    pub async fn respond(&self, id: Uuid, status: ConnectionStatus) -> Result<Connection> {
        let row = sqlx::query_as::<_, ConnectionRow>(&format!(
            r#"
            UPDATE connections
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => {
                self.find_by_id(id).await?;
                Err(StorageError::ConstraintViolation(
                    "Connection request already answered".to_string(),
                ))
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM connections WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
