use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::decode_stage;
use crate::error::{Result, StorageError};
use crate::models::{FundingStage, NewPitch, Pitch};

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, stage, title, content, score, created_at, updated_at
    FROM pitches
"#;

#[derive(FromRow)]
struct PitchRow {
    id: Uuid,
    user_id: String,
    stage: i16,
    title: String,
    content: Json<BTreeMap<String, String>>,
    score: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PitchRow> for Pitch {
    type Error = StorageError;

    fn try_from(row: PitchRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            stage: decode_stage(row.stage)?,
            title: row.title,
            content: row.content.0,
            score: row.score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PitchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PitchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace the user's pitch for a stage
    pub async fn upsert(&self, pitch: &NewPitch) -> Result<Pitch> {
        let row = sqlx::query_as::<_, PitchRow>(
            r#"
            INSERT INTO pitches (id, user_id, stage, title, content, score)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, stage) DO UPDATE SET
                title = EXCLUDED.title,
                content = EXCLUDED.content,
                score = EXCLUDED.score,
                updated_at = NOW()
            RETURNING id, user_id, stage, title, content, score, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&pitch.user_id)
        .bind(pitch.stage.as_db())
        .bind(&pitch.title)
        .bind(Json(&pitch.content))
        .bind(pitch.score)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    pub async fn find_by_stage(&self, user_id: &str, stage: FundingStage) -> Result<Option<Pitch>> {
        let row = sqlx::query_as::<_, PitchRow>(&format!(
            "{} WHERE user_id = $1 AND stage = $2",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .bind(stage.as_db())
        .fetch_optional(self.pool)
        .await?;

        row.map(Pitch::try_from).transpose()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Pitch> {
        sqlx::query_as::<_, PitchRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?
            .try_into()
    }

    /// All pitches for a user, ordered by stage
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Pitch>> {
        let rows = sqlx::query_as::<_, PitchRow>(&format!(
            "{} WHERE user_id = $1 ORDER BY stage",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Pitch::try_from).collect()
    }
}
