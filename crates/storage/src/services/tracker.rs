use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::dto::journey::{AchievementStatus, CreateFeedbackRequest, StageState};
use crate::error::Result;
use crate::models::{
    Achievement, Feedback, FundingOpportunity, FundingStage, NewFeedback, NewNotification,
    NewPitch, Pitch, UserProgress,
};
use crate::store::DataStore;

use super::achievements::{self, ActivitySnapshot, DISCOVERY_XP};
use super::{feedback, progress, scoring};

/// Result of a pitch submission. Submissions never surface an error.
#[derive(Debug)]
pub enum PitchOutcome {
    Accepted {
        pitch: Pitch,
        score: f64,
        stage_completed: bool,
        newly_unlocked: Vec<String>,
    },
    /// The stage is still locked for this user.
    Rejected,
    /// The store failed; details were logged.
    Failed,
}

impl PitchOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Reviewer-supplied part of a feedback entry.
#[derive(Debug, Clone)]
pub struct Review {
    pub reviewer_id: String,
    pub reviewer_name: String,
    pub message: String,
    pub rating: Option<i16>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Option<String>,
}

impl From<CreateFeedbackRequest> for Review {
    fn from(req: CreateFeedbackRequest) -> Self {
        Self {
            reviewer_id: req.reviewer_id,
            reviewer_name: req.reviewer_name,
            message: req.message,
            rating: req.rating,
            strengths: req.strengths,
            weaknesses: req.weaknesses,
            suggestions: req.suggestions,
        }
    }
}

#[derive(Debug)]
pub struct DiscoveryOutcome {
    pub first_discovery: bool,
    pub newly_unlocked: Vec<String>,
}

/// Owns the journey rules: stage gating, scoring, XP and achievements.
#[derive(Clone)]
pub struct ProgressTracker {
    store: Arc<dyn DataStore>,
    mock_feedback: bool,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn DataStore>, mock_feedback: bool) -> Self {
        Self {
            store,
            mock_feedback,
        }
    }

    pub fn store(&self) -> &Arc<dyn DataStore> {
        &self.store
    }

    /// The user's progress, created with defaults on first access.
    pub async fn progress(&self, user_id: &str) -> Result<UserProgress> {
        self.store.find_or_create_progress(user_id).await
    }

    pub async fn journey(&self, user_id: &str) -> Result<Vec<StageState>> {
        let progress = self.progress(user_id).await?;
        Ok(FundingStage::ALL
            .iter()
            .map(|stage| StageState {
                stage: *stage,
                name: stage.name(),
                status: progress::stage_status(&progress, *stage),
                score: progress.pitch_scores.get(stage).copied(),
            })
            .collect())
    }

    pub async fn submit_pitch(
        &self,
        user_id: &str,
        stage: FundingStage,
        title: &str,
        content: BTreeMap<String, String>,
    ) -> PitchOutcome {
        match self.try_submit(user_id, stage, title, content).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(user_id, %stage, error = %e, "pitch submission failed");
                PitchOutcome::Failed
            }
        }
    }

    async fn try_submit(
        &self,
        user_id: &str,
        stage: FundingStage,
        title: &str,
        content: BTreeMap<String, String>,
    ) -> Result<PitchOutcome> {
        let mut current = self.store.find_or_create_progress(user_id).await?;
        if !progress::can_submit(&current, stage) {
            tracing::warn!(user_id, %stage, "pitch rejected, stage is locked");
            return Ok(PitchOutcome::Rejected);
        }

        let score = scoring::score(stage, &content);
        let stage_completed = scoring::completes_stage(stage, &content);

        let pitch = self
            .store
            .upsert_pitch(NewPitch {
                user_id: user_id.to_string(),
                stage,
                title: title.to_string(),
                content,
                score,
            })
            .await?;

        progress::apply_submission(&mut current, stage, score, stage_completed);
        self.store.save_journey(&current).await?;
        tracing::info!(user_id, %stage, score, stage_completed, "pitch submitted");

        if self.mock_feedback {
            self.generate_feedback(&pitch).await?;
        }

        let newly_unlocked = self.evaluate_achievements(user_id).await?;

        Ok(PitchOutcome::Accepted {
            pitch,
            score,
            stage_completed,
            newly_unlocked,
        })
    }

    async fn generate_feedback(&self, pitch: &Pitch) -> Result<()> {
        let items = {
            let mut rng = rand::thread_rng();
            feedback::generate(&mut rng, pitch.id, &pitch.user_id, pitch.stage)
        };

        let mut reviewer = None;
        for item in items {
            let created = self.store.insert_feedback(item).await?;
            reviewer = Some(created.reviewer_name);
        }

        if let Some(reviewer_name) = reviewer {
            self.notify(NewNotification::feedback(
                &pitch.user_id,
                &pitch.id.to_string(),
                &reviewer_name,
            ))
            .await;
        }
        Ok(())
    }

    /// Unlock by id. Unknown ids give `false`; unlocking twice gives `true`
    /// without granting XP again.
    pub async fn unlock_achievement(&self, user_id: &str, achievement_id: &str) -> bool {
        let Some(achievement) = achievements::find(achievement_id) else {
            tracing::warn!(user_id, achievement_id, "unknown achievement");
            return false;
        };

        match self.grant(user_id, achievement).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(user_id, achievement_id, error = %e, "failed to unlock achievement");
                false
            }
        }
    }

    /// Marks an opportunity as seen, granting XP the first time, then
    /// re-checks the discovery achievements against everything seen so far.
    pub async fn record_discovery(
        &self,
        user_id: &str,
        opportunity_id: &str,
    ) -> Result<DiscoveryOutcome> {
        let first_discovery = self
            .store
            .record_discovery(user_id, opportunity_id, DISCOVERY_XP)
            .await?;
        if first_discovery {
            tracing::info!(user_id, opportunity_id, "new opportunity discovered");
        }

        let newly_unlocked = self.evaluate_achievements(user_id).await?;
        Ok(DiscoveryOutcome {
            first_discovery,
            newly_unlocked,
        })
    }

    /// Attach reviewer feedback to an existing pitch, notify its owner and
    /// re-check the feedback achievements.
    pub async fn add_feedback(&self, pitch_id: Uuid, review: Review) -> Result<Feedback> {
        let pitch = self.store.find_pitch_by_id(pitch_id).await?;

        let created = self
            .store
            .insert_feedback(NewFeedback {
                pitch_id: pitch.id,
                user_id: pitch.user_id.clone(),
                stage: pitch.stage,
                reviewer_id: review.reviewer_id,
                reviewer_name: review.reviewer_name,
                message: review.message,
                rating: review.rating,
                strengths: review.strengths,
                weaknesses: review.weaknesses,
                suggestions: review.suggestions,
            })
            .await?;
        tracing::info!(
            user_id = %pitch.user_id,
            %pitch_id,
            reviewer_id = %created.reviewer_id,
            "feedback received"
        );

        self.notify(NewNotification::feedback(
            &pitch.user_id,
            &pitch.id.to_string(),
            &created.reviewer_name,
        ))
        .await;

        if let Err(e) = self.evaluate_achievements(&pitch.user_id).await {
            tracing::error!(user_id = %pitch.user_id, error = %e, "achievement check failed");
        }
        Ok(created)
    }

    /// Full catalog with the user's unlock state and progress.
    pub async fn achievements(&self, user_id: &str) -> Result<Vec<AchievementStatus>> {
        let current = self.store.find_or_create_progress(user_id).await?;
        let (discovered, distinct_reviewers) = self.activity(user_id).await?;
        let unlocked: HashMap<String, _> = self
            .store
            .list_unlocked(user_id)
            .await?
            .into_iter()
            .map(|u| (u.achievement_id, u.unlocked_at))
            .collect();

        let snapshot = ActivitySnapshot {
            progress: &current,
            discovered: &discovered,
            distinct_reviewers,
        };

        Ok(achievements::CATALOG
            .iter()
            .map(|a| {
                AchievementStatus::new(
                    a,
                    snapshot.progress_toward(a),
                    unlocked.get(a.id).copied(),
                )
            })
            .collect())
    }

    /// Unlock every satisfied achievement that is not unlocked yet.
    async fn evaluate_achievements(&self, user_id: &str) -> Result<Vec<String>> {
        let current = self.store.find_or_create_progress(user_id).await?;
        let (discovered, distinct_reviewers) = self.activity(user_id).await?;
        let already: HashSet<String> = self
            .store
            .list_unlocked(user_id)
            .await?
            .into_iter()
            .map(|u| u.achievement_id)
            .collect();

        let snapshot = ActivitySnapshot {
            progress: &current,
            discovered: &discovered,
            distinct_reviewers,
        };
        let pending: Vec<&'static Achievement> = snapshot
            .satisfied()
            .filter(|a| !already.contains(a.id))
            .collect();

        let mut newly_unlocked = Vec::new();
        for achievement in pending {
            if self.grant(user_id, achievement).await? {
                newly_unlocked.push(achievement.id.to_string());
            }
        }
        Ok(newly_unlocked)
    }

    async fn activity(&self, user_id: &str) -> Result<(Vec<FundingOpportunity>, usize)> {
        let ids = self.store.list_discoveries(user_id).await?;
        let discovered = if ids.is_empty() {
            Vec::new()
        } else {
            self.store.find_opportunities(&ids).await?
        };

        let reviewers: HashSet<String> = self
            .store
            .list_feedback(user_id)
            .await?
            .into_iter()
            .map(|f| f.reviewer_id)
            .collect();

        Ok((discovered, reviewers.len()))
    }

    /// Returns true when this call performed the unlock.
    async fn grant(&self, user_id: &str, achievement: &Achievement) -> Result<bool> {
        let Some(updated) = self
            .store
            .unlock_achievement(user_id, achievement.id, achievement.xp_reward)
            .await?
        else {
            return Ok(false);
        };

        tracing::info!(
            user_id,
            achievement_id = achievement.id,
            xp_reward = achievement.xp_reward,
            xp_points = updated.xp_points,
            level = updated.level,
            "achievement unlocked"
        );
        self.notify(NewNotification::achievement(
            user_id,
            achievement.id,
            achievement.title,
            achievement.xp_reward,
        ))
        .await;
        Ok(true)
    }

    async fn notify(&self, notification: NewNotification) {
        if let Err(e) = self.store.insert_notification(notification).await {
            tracing::error!(error = %e, "failed to create notification");
        }
    }
}
