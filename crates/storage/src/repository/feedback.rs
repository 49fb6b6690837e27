use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::decode_stage;
use crate::error::{Result, StorageError};
use crate::models::{Feedback, NewFeedback};

#[derive(FromRow)]
struct FeedbackRow {
    id: Uuid,
    pitch_id: Uuid,
    user_id: String,
    stage: i16,
    reviewer_id: String,
    reviewer_name: String,
    message: String,
    rating: Option<i16>,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    suggestions: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = StorageError;

    fn try_from(row: FeedbackRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            pitch_id: row.pitch_id,
            user_id: row.user_id,
            stage: decode_stage(row.stage)?,
            reviewer_id: row.reviewer_id,
            reviewer_name: row.reviewer_name,
            message: row.message,
            rating: row.rating,
            strengths: row.strengths,
            weaknesses: row.weaknesses,
            suggestions: row.suggestions,
            created_at: row.created_at,
        })
    }
}

pub struct FeedbackRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedbackRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, feedback: &NewFeedback) -> Result<Feedback> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r#"
            INSERT INTO feedback (
                id, pitch_id, user_id, stage, reviewer_id, reviewer_name,
                message, rating, strengths, weaknesses, suggestions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, pitch_id, user_id, stage, reviewer_id, reviewer_name,
                      message, rating, strengths, weaknesses, suggestions, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(feedback.pitch_id)
        .bind(&feedback.user_id)
        .bind(feedback.stage.as_db())
        .bind(&feedback.reviewer_id)
        .bind(&feedback.reviewer_name)
        .bind(&feedback.message)
        .bind(feedback.rating)
        .bind(&feedback.strengths)
        .bind(&feedback.weaknesses)
        .bind(&feedback.suggestions)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            err if err.is_foreign_key_violation() => StorageError::NotFound,
            err => err,
        })?;

        row.try_into()
    }

    /// Feedback received by a user, newest first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT id, pitch_id, user_id, stage, reviewer_id, reviewer_name,
                   message, rating, strengths, weaknesses, suggestions, created_at
            FROM feedback
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Feedback::try_from).collect()
    }
}
