use sqlx::PgPool;

use super::user_progress::UserProgressRepository;
use crate::error::{Result, StorageError};

pub struct DiscoveryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DiscoveryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Opportunity ids the user has opened, oldest first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT opportunity_id
            FROM funding_discoveries
            WHERE user_id = $1
            ORDER BY discovered_at, opportunity_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Returns true when this is the user's first look at the opportunity;
    /// only then is `xp` granted.
    pub async fn record(&self, user_id: &str, opportunity_id: &str, xp: i32) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        UserProgressRepository::ensure_exists(user_id, &mut tx).await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO funding_discoveries (user_id, opportunity_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, opportunity_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(opportunity_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match StorageError::from(e) {
            err if err.is_foreign_key_violation() => StorageError::NotFound,
            err => err,
        })?
        .rows_affected();

        if inserted > 0 {
            UserProgressRepository::award_xp(user_id, xp, &mut tx).await?;
        }
        tx.commit().await?;

        Ok(inserted > 0)
    }
}
