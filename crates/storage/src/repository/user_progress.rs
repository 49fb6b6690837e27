use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::decode_stage;
use crate::error::{Result, StorageError};
use crate::models::{FundingStage, UserProgress};

const RETURNING_COLUMNS: &str = "id, user_id, xp_points, level, current_stage, completed_stages, pitch_scores, created_at, updated_at";

#[derive(FromRow)]
struct UserProgressRow {
    id: Uuid,
    user_id: String,
    xp_points: i32,
    level: i32,
    current_stage: i16,
    completed_stages: Vec<i16>,
    pitch_scores: Json<BTreeMap<i16, f64>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserProgressRow> for UserProgress {
    type Error = StorageError;

    fn try_from(row: UserProgressRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            xp_points: row.xp_points,
            level: row.level,
            current_stage: decode_stage(row.current_stage)?,
            completed_stages: row
                .completed_stages
                .into_iter()
                .filter_map(FundingStage::from_db)
                .collect(),
            pitch_scores: row
                .pitch_scores
                .0
                .into_iter()
                .filter_map(|(stage, score)| FundingStage::from_db(stage).map(|s| (s, score)))
                .collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct UserProgressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserProgressRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Option<UserProgress>> {
        let row = sqlx::query_as::<_, UserProgressRow>(&format!(
            "SELECT {} FROM user_progress WHERE user_id = $1",
            RETURNING_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(UserProgress::try_from).transpose()
    }

    /// Return the user's progress, creating the starting record on first access
    pub async fn find_or_create(&self, user_id: &str) -> Result<UserProgress> {
        let mut tx = self.pool.begin().await?;
        Self::ensure_exists(user_id, &mut tx).await?;
        let row = sqlx::query_as::<_, UserProgressRow>(&format!(
            "SELECT {} FROM user_progress WHERE user_id = $1",
            RETURNING_COLUMNS
        ))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        row.try_into()
    }

    /// Persist stage progress. Completed stages are merged and the current
    /// stage only moves forward; XP is never written here.
    pub async fn save_journey(&self, progress: &UserProgress) -> Result<UserProgress> {
        let completed: Vec<i16> = progress.completed_stages.iter().map(|s| s.as_db()).collect();
        let scores: BTreeMap<i16, f64> = progress
            .pitch_scores
            .iter()
            .map(|(stage, score)| (stage.as_db(), *score))
            .collect();

        let row = sqlx::query_as::<_, UserProgressRow>(&format!(
            r#"
            UPDATE user_progress SET
                current_stage = GREATEST(current_stage, $2),
                completed_stages = ARRAY(
                    SELECT DISTINCT s FROM unnest(completed_stages || $3::SMALLINT[]) AS s ORDER BY s
                ),
                pitch_scores = pitch_scores || $4,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(&progress.user_id)
        .bind(progress.current_stage.as_db())
        .bind(&completed)
        .bind(Json(&scores))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        row.try_into()
    }

    pub(crate) async fn ensure_exists(
        user_id: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_progress (id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Add XP and re-derive the level in the same statement
    pub(crate) async fn award_xp(
        user_id: &str,
        xp: i32,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<UserProgress> {
        let row = sqlx::query_as::<_, UserProgressRow>(&format!(
            r#"
            UPDATE user_progress SET
                xp_points = xp_points + $2,
                level = (xp_points + $2) / 100 + 1,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(user_id)
        .bind(xp)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        row.try_into()
    }
}
