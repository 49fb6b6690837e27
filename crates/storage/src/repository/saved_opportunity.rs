use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::SavedOpportunity;

pub struct SavedOpportunityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SavedOpportunityRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Saved opportunities for a user, most recent first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedOpportunity>> {
        let saved = sqlx::query_as::<_, SavedOpportunity>(
            r#"
            SELECT id, user_id, opportunity_id, notes, created_at, updated_at
            FROM saved_opportunities
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn find(&self, user_id: &str, opportunity_id: &str) -> Result<Option<SavedOpportunity>> {
        let saved = sqlx::query_as::<_, SavedOpportunity>(
            r#"
            SELECT id, user_id, opportunity_id, notes, created_at, updated_at
            FROM saved_opportunities
            WHERE user_id = $1 AND opportunity_id = $2
            "#,
        )
        .bind(user_id)
        .bind(opportunity_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn create(
        &self,
        user_id: &str,
        opportunity_id: &str,
        notes: Option<&str>,
    ) -> Result<SavedOpportunity> {
        sqlx::query_as::<_, SavedOpportunity>(
            r#"
            INSERT INTO saved_opportunities (id, user_id, opportunity_id, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, opportunity_id, notes, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(opportunity_id)
        .bind(notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            err if err.is_unique_violation() => {
                StorageError::ConstraintViolation("Opportunity already saved".to_string())
            }
            err if err.is_foreign_key_violation() => StorageError::NotFound,
            err => err,
        })
    }

    pub async fn update_notes(&self, id: Uuid, notes: Option<&str>) -> Result<SavedOpportunity> {
        let saved = sqlx::query_as::<_, SavedOpportunity>(
            r#"
            UPDATE saved_opportunities
            SET notes = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, opportunity_id, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(notes)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM saved_opportunities WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
