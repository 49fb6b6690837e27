use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{FundingStage, UserProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Locked,
    Unlocked,
    Completed,
}

/// Stage 0 is always open; later stages open once the previous one is completed.
pub fn stage_status(progress: &UserProgress, stage: FundingStage) -> StageStatus {
    if progress.has_completed(stage) {
        return StageStatus::Completed;
    }
    match stage.previous() {
        None => StageStatus::Unlocked,
        Some(previous) if progress.has_completed(previous) => StageStatus::Unlocked,
        Some(_) => StageStatus::Locked,
    }
}

pub fn can_submit(progress: &UserProgress, stage: FundingStage) -> bool {
    stage_status(progress, stage) != StageStatus::Locked
}

/// Records a scored submission. Completed stages are never removed and
/// `current_stage` never moves backwards.
pub fn apply_submission(
    progress: &mut UserProgress,
    stage: FundingStage,
    score: f64,
    completed: bool,
) {
    progress.pitch_scores.insert(stage, score);
    if completed {
        progress.completed_stages.insert(stage);
        progress.current_stage = progress.current_stage.max(stage.next());
    }
    progress.updated_at = chrono::Utc::now();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_user_only_has_first_stage_open() {
        let progress = UserProgress::starting("u");
        assert_eq!(
            stage_status(&progress, FundingStage::Ideation),
            StageStatus::Unlocked
        );
        for stage in &FundingStage::ALL[1..] {
            assert_eq!(stage_status(&progress, *stage), StageStatus::Locked);
        }
    }

    #[test]
    fn test_completion_unlocks_next_stage() {
        let mut progress = UserProgress::starting("u");
        apply_submission(&mut progress, FundingStage::Ideation, 5.0, true);

        assert_eq!(progress.current_stage, FundingStage::Validation);
        assert_eq!(
            stage_status(&progress, FundingStage::Ideation),
            StageStatus::Completed
        );
        assert!(can_submit(&progress, FundingStage::Validation));
        assert!(!can_submit(&progress, FundingStage::Seed));
    }

    #[test]
    fn test_low_score_keeps_completed_stage() {
        let mut progress = UserProgress::starting("u");
        apply_submission(&mut progress, FundingStage::Ideation, 5.0, true);
        apply_submission(&mut progress, FundingStage::Ideation, 0.0, false);

        assert!(progress.has_completed(FundingStage::Ideation));
        assert_eq!(progress.pitch_scores[&FundingStage::Ideation], 0.0);
        assert_eq!(progress.current_stage, FundingStage::Validation);
    }

    #[test]
    fn test_resubmitting_earlier_stage_does_not_regress() {
        let mut progress = UserProgress::starting("u");
        apply_submission(&mut progress, FundingStage::Ideation, 5.0, true);
        apply_submission(&mut progress, FundingStage::Validation, 5.0, true);
        apply_submission(&mut progress, FundingStage::Ideation, 5.0, true);

        assert_eq!(progress.current_stage, FundingStage::Seed);
    }

    #[test]
    fn test_last_stage_saturates() {
        let mut progress = UserProgress::starting("u");
        for stage in FundingStage::ALL {
            apply_submission(&mut progress, stage, 5.0, true);
        }
        assert_eq!(progress.current_stage, FundingStage::Expansion);
        assert_eq!(progress.completed_stages.len(), 5);
    }
}
