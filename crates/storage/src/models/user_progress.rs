use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::FundingStage;

pub const XP_PER_LEVEL: i32 = 100;

/// Level derived from accumulated XP: `floor(xp / 100) + 1`.
pub fn level_for_xp(xp: i32) -> i32 {
    xp.max(0) / XP_PER_LEVEL + 1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProgress {
    pub id: Uuid,
    pub user_id: String,
    pub xp_points: i32,
    pub level: i32,
    #[schema(value_type = u8)]
    pub current_stage: FundingStage,
    #[schema(value_type = Vec<u8>)]
    pub completed_stages: BTreeSet<FundingStage>,
    #[schema(value_type = Object)]
    pub pitch_scores: BTreeMap<FundingStage, f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProgress {
    /// Starting point for a user seen for the first time.
    pub fn starting(user_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            xp_points: 0,
            level: 1,
            current_stage: FundingStage::Ideation,
            completed_stages: BTreeSet::new(),
            pitch_scores: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn award_xp(&mut self, xp: i32) {
        self.xp_points += xp;
        self.level = level_for_xp(self.xp_points);
        self.updated_at = Utc::now();
    }

    pub fn has_completed(&self, stage: FundingStage) -> bool {
        self.completed_stages.contains(&stage)
    }

    pub fn xp_into_level(&self) -> i32 {
        self.xp_points.max(0) % XP_PER_LEVEL
    }
}
