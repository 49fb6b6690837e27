use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NewNotification, Notification};

pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, notification: &NewNotification) -> Result<Notification> {
        let created = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                id, user_id, kind, title, content, related_entity_type, related_entity_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, kind, title, content, related_entity_type,
                      related_entity_id, is_read, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&notification.user_id)
        .bind(&notification.kind)
        .bind(&notification.title)
        .bind(&notification.content)
        .bind(&notification.related_entity_type)
        .bind(&notification.related_entity_id)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Newest first, at most `limit` entries
    pub async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
        include_read: bool,
    ) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, kind, title, content, related_entity_type,
                   related_entity_id, is_read, created_at
            FROM notifications
            WHERE user_id = $1 AND ($2 OR NOT is_read)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(include_read)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET is_read = TRUE
            WHERE id = $1
            RETURNING id, user_id, kind, title, content, related_entity_type,
                      related_entity_id, is_read, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(notification)
    }

    /// Returns the number of notifications that changed state
    pub async fn mark_all_read(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
