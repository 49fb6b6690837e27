use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::FundingStage;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub pitch_id: Uuid,
    pub user_id: String,
    #[schema(value_type = u8)]
    pub stage: FundingStage,
    pub reviewer_id: String,
    pub reviewer_name: String,
    pub message: String,
    pub rating: Option<i16>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub pitch_id: Uuid,
    pub user_id: String,
    pub stage: FundingStage,
    pub reviewer_id: String,
    pub reviewer_name: String,
    pub message: String,
    pub rating: Option<i16>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Option<String>,
}
