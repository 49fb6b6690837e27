use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::FundingStage;

/// A user's pitch for one stage. At most one per (user, stage).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pitch {
    pub id: Uuid,
    pub user_id: String,
    #[schema(value_type = u8)]
    pub stage: FundingStage,
    pub title: String,
    pub content: BTreeMap<String, String>,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPitch {
    pub user_id: String,
    pub stage: FundingStage,
    pub title: String,
    pub content: BTreeMap<String, String>,
    pub score: f64,
}
