use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{
    Achievement, AchievementCategory, FundingStage, Pitch, UserProgress,
    user_progress::XP_PER_LEVEL,
};
use crate::services::progress::StageStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitPitchRequest {
    #[validate(range(min = 0, max = 4, message = "Stage must be between 0 and 4"))]
    pub stage: u8,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(custom(function = "validate_content"))]
    pub content: BTreeMap<String, String>,
}

fn validate_content(content: &BTreeMap<String, String>) -> Result<(), ValidationError> {
    if content.is_empty() {
        let mut error = ValidationError::new("empty_content");
        error.message = Some("Pitch content cannot be empty".into());
        return Err(error);
    }
    Ok(())
}

impl SubmitPitchRequest {
    pub fn funding_stage(&self) -> Option<FundingStage> {
        FundingStage::try_from(self.stage).ok()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitPitchResponse {
    pub accepted: bool,
    pub pitch: Option<Pitch>,
    pub score: Option<f64>,
    pub stage_completed: bool,
    pub newly_unlocked: Vec<String>,
}

impl SubmitPitchResponse {
    /// Body for a submission that was not stored.
    pub fn declined() -> Self {
        Self {
            accepted: false,
            pitch: None,
            score: None,
            stage_completed: false,
            newly_unlocked: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub progress: UserProgress,
    pub xp_to_next_level: i32,
}

impl From<UserProgress> for ProgressResponse {
    fn from(progress: UserProgress) -> Self {
        let xp_to_next_level = XP_PER_LEVEL - progress.xp_into_level();
        Self {
            progress,
            xp_to_next_level,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StageState {
    #[schema(value_type = u8)]
    pub stage: FundingStage,
    pub name: &'static str,
    pub status: StageStatus,
    pub score: Option<f64>,
}

/// Catalog entry annotated with the user's standing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AchievementStatus {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub xp_reward: i32,
    pub category: AchievementCategory,
    pub threshold: u32,
    pub progress: u32,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementStatus {
    pub fn new(achievement: &Achievement, progress: u32, unlocked_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: achievement.id,
            title: achievement.title,
            description: achievement.description,
            xp_reward: achievement.xp_reward,
            category: achievement.category,
            threshold: achievement.threshold,
            progress: progress.min(achievement.threshold),
            unlocked: unlocked_at.is_some(),
            unlocked_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnlockResponse {
    pub achievement_id: String,
    pub unlocked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiscoveryResponse {
    pub opportunity_id: String,
    pub first_discovery: bool,
    pub newly_unlocked: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackRequest {
    #[validate(length(min = 1, max = 255))]
    pub reviewer_id: String,

    #[validate(length(min = 1, max = 255, message = "Reviewer name is required"))]
    pub reviewer_name: String,

    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,

    #[validate(range(min = 0, max = 5, message = "Rating must be between 0 and 5"))]
    pub rating: Option<i16>,

    #[serde(default)]
    pub strengths: Vec<String>,

    #[serde(default)]
    pub weaknesses: Vec<String>,

    #[validate(length(max = 5000))]
    pub suggestions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_out_of_range_rejected() {
        let request = SubmitPitchRequest {
            stage: 5,
            title: "Pitch".to_string(),
            content: BTreeMap::from([("value_proposition".to_string(), "x".to_string())]),
        };
        assert!(request.validate().is_err());
        assert_eq!(request.funding_stage(), None);
    }

    #[test]
    fn test_empty_content_rejected() {
        let request = SubmitPitchRequest {
            stage: 0,
            title: "Pitch".to_string(),
            content: BTreeMap::new(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn test_progress_response_reports_remaining_xp() {
        let mut progress = UserProgress::starting("u");
        progress.award_xp(130);
        let response = ProgressResponse::from(progress);

        assert_eq!(response.xp_to_next_level, 70);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["level"], 2);
        assert_eq!(json["xp_to_next_level"], 70);
    }

    #[test]
    fn test_status_progress_capped_at_threshold() {
        let achievement = crate::services::achievements::find("funding-explorer").unwrap();
        let status = AchievementStatus::new(achievement, 14, None);
        assert_eq!(status.progress, 10);
        assert!(!status.unlocked);
    }
}
