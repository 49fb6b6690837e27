use sqlx::PgPool;

use super::user_progress::UserProgressRepository;
use crate::error::Result;
use crate::models::{UnlockedAchievement, UserProgress};

pub struct AchievementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AchievementRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>> {
        let unlocked = sqlx::query_as::<_, UnlockedAchievement>(
            r#"
            SELECT user_id, achievement_id, unlocked_at
            FROM user_achievements
            WHERE user_id = $1
            ORDER BY unlocked_at
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(unlocked)
    }

    /// Record the unlock and grant its XP in one transaction.
    ///
    /// Returns `None` when the achievement was already unlocked, in which case
    /// nothing is written.
    pub async fn unlock(
        &self,
        user_id: &str,
        achievement_id: &str,
        xp_reward: i32,
    ) -> Result<Option<UserProgress>> {
        let mut tx = self.pool.begin().await?;

        UserProgressRepository::ensure_exists(user_id, &mut tx).await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO user_achievements (user_id, achievement_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(achievement_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.commit().await?;
            return Ok(None);
        }

        let progress = UserProgressRepository::award_xp(user_id, xp_reward, &mut tx).await?;
        tx.commit().await?;

        Ok(Some(progress))
    }
}
