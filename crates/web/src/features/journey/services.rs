use std::collections::BTreeMap;

use storage::{
    DataStore, ProgressTracker,
    dto::journey::{AchievementStatus, CreateFeedbackRequest, StageState},
    error::Result,
    models::{Feedback, FundingStage, Pitch, UserProgress},
    services::{
        achievements, degrade,
        tracker::{DiscoveryOutcome, PitchOutcome},
    },
};
use uuid::Uuid;

/// Progress for a user, created on first access
pub async fn get_progress(tracker: &ProgressTracker, user_id: &str) -> Result<UserProgress> {
    tracker.progress(user_id).await
}

/// Status of every stage of the journey
pub async fn get_journey(tracker: &ProgressTracker, user_id: &str) -> Result<Vec<StageState>> {
    tracker.journey(user_id).await
}

/// Score and store a pitch, advancing the journey when it completes the stage
pub async fn submit_pitch(
    tracker: &ProgressTracker,
    user_id: &str,
    stage: FundingStage,
    title: &str,
    content: BTreeMap<String, String>,
) -> PitchOutcome {
    tracker.submit_pitch(user_id, stage, title, content).await
}

/// List a user's pitches
pub async fn list_pitches(store: &dyn DataStore, user_id: &str) -> Vec<Pitch> {
    degrade::or_empty(store.list_pitches(user_id).await, "list_pitches")
}

/// The user's pitch for one stage, if submitted
pub async fn get_pitch(
    store: &dyn DataStore,
    user_id: &str,
    stage: FundingStage,
) -> Result<Option<Pitch>> {
    store.find_pitch(user_id, stage).await
}

/// Feedback received on any of the user's pitches, newest first
pub async fn list_feedback(store: &dyn DataStore, user_id: &str) -> Vec<Feedback> {
    degrade::or_empty(store.list_feedback(user_id).await, "list_feedback")
}

/// Record reviewer feedback on a pitch
pub async fn add_feedback(
    tracker: &ProgressTracker,
    pitch_id: Uuid,
    req: CreateFeedbackRequest,
) -> Result<Feedback> {
    tracker.add_feedback(pitch_id, req.into()).await
}

/// Achievement catalog annotated with the user's progress
pub async fn list_achievements(tracker: &ProgressTracker, user_id: &str) -> Vec<AchievementStatus> {
    degrade::or_empty(tracker.achievements(user_id).await, "list_achievements")
}

pub fn achievement_exists(achievement_id: &str) -> bool {
    achievements::find(achievement_id).is_some()
}

/// Unlock an achievement by hand, granting its XP once
pub async fn unlock_achievement(
    tracker: &ProgressTracker,
    user_id: &str,
    achievement_id: &str,
) -> bool {
    tracker.unlock_achievement(user_id, achievement_id).await
}

/// Mark an opportunity as discovered by the user
pub async fn record_discovery(
    tracker: &ProgressTracker,
    user_id: &str,
    opportunity_id: &str,
) -> Result<DiscoveryOutcome> {
    tracker.record_discovery(user_id, opportunity_id).await
}
