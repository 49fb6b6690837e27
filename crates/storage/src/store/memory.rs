use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::DataStore;
use crate::error::{Result, StorageError};
use crate::models::{
    Connection, ConnectionStatus, Feedback, FundingOpportunity, FundingStage, Investor, NewFeedback, NewNotification, NewPitch,
    Notification, Pitch, SavedOpportunity, UnlockedAchievement, UserProgress,
};
use crate::seed;

#[derive(Default)]
struct MemoryState {
    opportunities: Vec<FundingOpportunity>,
    investors: Vec<Investor>,
    pitches: Vec<Pitch>,
    feedback: Vec<Feedback>,
    progress: HashMap<String, UserProgress>,
    unlocked: Vec<UnlockedAchievement>,
    discoveries: HashMap<String, Vec<String>>,
    saved: Vec<SavedOpportunity>,
    notifications: Vec<Notification>,
    connections: Vec<Connection>,
}

impl MemoryState {
    fn progress_mut(&mut self, user_id: &str) -> &mut UserProgress {
        self.progress
            .entry(user_id.to_string())
            .or_insert_with(|| UserProgress::starting(user_id))
    }
}

/// In-process store for mock mode. Every call sleeps for the configured
/// delay to mimic a remote backend.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    delay: Duration,
}

impl MemoryStore {
    pub fn new(opportunities: Vec<FundingOpportunity>, investors: Vec<Investor>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                opportunities,
                investors,
                ..MemoryState::default()
            }),
            delay: Duration::ZERO,
        }
    }

    /// Store preloaded with the bundled reference data.
    pub fn from_seed() -> Result<Self> {
        Ok(Self::new(seed::opportunities()?, seed::investors()?))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list_opportunities(&self) -> Result<Vec<FundingOpportunity>> {
        self.simulate_latency().await;
        Ok(self.state.lock().await.opportunities.clone())
    }

    async fn find_opportunity(&self, id: &str) -> Result<FundingOpportunity> {
        self.simulate_latency().await;
        self.state
            .lock()
            .await
            .opportunities
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_opportunities(&self, ids: &[String]) -> Result<Vec<FundingOpportunity>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        Ok(state
            .opportunities
            .iter()
            .filter(|o| ids.contains(&o.id))
            .cloned()
            .collect())
    }

    async fn list_investors(&self) -> Result<Vec<Investor>> {
        self.simulate_latency().await;
        Ok(self.state.lock().await.investors.clone())
    }

    async fn find_investor(&self, id: &str) -> Result<Investor> {
        self.simulate_latency().await;
        self.state
            .lock()
            .await
            .investors
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn upsert_pitch(&self, pitch: NewPitch) -> Result<Pitch> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let now = Utc::now();

        if let Some(existing) = state
            .pitches
            .iter_mut()
            .find(|p| p.user_id == pitch.user_id && p.stage == pitch.stage)
        {
            existing.title = pitch.title;
            existing.content = pitch.content;
            existing.score = pitch.score;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let created = Pitch {
            id: Uuid::new_v4(),
            user_id: pitch.user_id,
            stage: pitch.stage,
            title: pitch.title,
            content: pitch.content,
            score: pitch.score,
            created_at: now,
            updated_at: now,
        };
        state.pitches.push(created.clone());
        Ok(created)
    }

    async fn find_pitch(&self, user_id: &str, stage: FundingStage) -> Result<Option<Pitch>> {
        self.simulate_latency().await;
        Ok(self
            .state
            .lock()
            .await
            .pitches
            .iter()
            .find(|p| p.user_id == user_id && p.stage == stage)
            .cloned())
    }

    async fn find_pitch_by_id(&self, id: Uuid) -> Result<Pitch> {
        self.simulate_latency().await;
        self.state
            .lock()
            .await
            .pitches
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_pitches(&self, user_id: &str) -> Result<Vec<Pitch>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        let mut pitches: Vec<Pitch> = state
            .pitches
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        pitches.sort_by_key(|p| p.stage);
        Ok(pitches)
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        if !state.pitches.iter().any(|p| p.id == feedback.pitch_id) {
            return Err(StorageError::NotFound);
        }

        let created = Feedback {
            id: Uuid::new_v4(),
            pitch_id: feedback.pitch_id,
            user_id: feedback.user_id,
            stage: feedback.stage,
            reviewer_id: feedback.reviewer_id,
            reviewer_name: feedback.reviewer_name,
            message: feedback.message,
            rating: feedback.rating,
            strengths: feedback.strengths,
            weaknesses: feedback.weaknesses,
            suggestions: feedback.suggestions,
            created_at: Utc::now(),
        };
        state.feedback.push(created.clone());
        Ok(created)
    }

    async fn list_feedback(&self, user_id: &str) -> Result<Vec<Feedback>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        Ok(state
            .feedback
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_or_create_progress(&self, user_id: &str) -> Result<UserProgress> {
        self.simulate_latency().await;
        Ok(self.state.lock().await.progress_mut(user_id).clone())
    }

    async fn save_journey(&self, progress: &UserProgress) -> Result<UserProgress> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let stored = state
            .progress
            .get_mut(&progress.user_id)
            .ok_or(StorageError::NotFound)?;

        stored.current_stage = stored.current_stage.max(progress.current_stage);
        stored
            .completed_stages
            .extend(progress.completed_stages.iter().copied());
        stored.pitch_scores.extend(
            progress
                .pitch_scores
                .iter()
                .map(|(stage, score)| (*stage, *score)),
        );
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn list_unlocked(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        Ok(state
            .unlocked
            .iter()
            .filter(|u| u.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn unlock_achievement(
        &self,
        user_id: &str,
        achievement_id: &str,
        xp_reward: i32,
    ) -> Result<Option<UserProgress>> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        if state
            .unlocked
            .iter()
            .any(|u| u.user_id == user_id && u.achievement_id == achievement_id)
        {
            return Ok(None);
        }

        state.unlocked.push(UnlockedAchievement {
            user_id: user_id.to_string(),
            achievement_id: achievement_id.to_string(),
            unlocked_at: Utc::now(),
        });
        let progress = state.progress_mut(user_id);
        progress.award_xp(xp_reward);
        Ok(Some(progress.clone()))
    }

    async fn record_discovery(&self, user_id: &str, opportunity_id: &str, xp: i32) -> Result<bool> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        if !state.opportunities.iter().any(|o| o.id == opportunity_id) {
            return Err(StorageError::NotFound);
        }

        let discovered = state.discoveries.entry(user_id.to_string()).or_default();
        if discovered.iter().any(|id| id == opportunity_id) {
            return Ok(false);
        }
        discovered.push(opportunity_id.to_string());
        state.progress_mut(user_id).award_xp(xp);
        Ok(true)
    }

    async fn list_discoveries(&self, user_id: &str) -> Result<Vec<String>> {
        self.simulate_latency().await;
        Ok(self
            .state
            .lock()
            .await
            .discoveries
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_saved(&self, user_id: &str) -> Result<Vec<SavedOpportunity>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        Ok(state
            .saved
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_saved(
        &self,
        user_id: &str,
        opportunity_id: &str,
    ) -> Result<Option<SavedOpportunity>> {
        self.simulate_latency().await;
        Ok(self
            .state
            .lock()
            .await
            .saved
            .iter()
            .find(|s| s.user_id == user_id && s.opportunity_id == opportunity_id)
            .cloned())
    }

    async fn save_opportunity(
        &self,
        user_id: &str,
        opportunity_id: &str,
        notes: Option<&str>,
    ) -> Result<SavedOpportunity> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        if !state.opportunities.iter().any(|o| o.id == opportunity_id) {
            return Err(StorageError::NotFound);
        }
        if state
            .saved
            .iter()
            .any(|s| s.user_id == user_id && s.opportunity_id == opportunity_id)
        {
            return Err(StorageError::ConstraintViolation(
                "Opportunity already saved".to_string(),
            ));
        }

        let now = Utc::now();
        let saved = SavedOpportunity {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            opportunity_id: opportunity_id.to_string(),
            notes: notes.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        state.saved.push(saved.clone());
        Ok(saved)
    }

    async fn update_saved_notes(&self, id: Uuid, notes: Option<&str>) -> Result<SavedOpportunity> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let saved = state
            .saved
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StorageError::NotFound)?;
        saved.notes = notes.map(str::to_string);
        saved.updated_at = Utc::now();
        Ok(saved.clone())
    }

    async fn delete_saved(&self, id: Uuid) -> Result<()> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let before = state.saved.len();
        state.saved.retain(|s| s.id != id);
        if state.saved.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification> {
        self.simulate_latency().await;
        let created = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            kind: notification.kind,
            title: notification.title,
            content: notification.content,
            related_entity_type: notification.related_entity_type,
            related_entity_id: notification.related_entity_id,
            is_read: false,
            created_at: Utc::now(),
        };
        self.state.lock().await.notifications.push(created.clone());
        Ok(created)
    }

    async fn list_notifications(
        &self,
        user_id: &str,
        limit: i64,
        include_read: bool,
    ) -> Result<Vec<Notification>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id && (include_read || !n.is_read))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<Notification> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StorageError::NotFound)?;
        notification.is_read = true;
        Ok(notification.clone())
    }

    async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u64> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let mut updated = 0;
        for notification in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn create_connection(
        &self,
        requester_id: &str,
        recipient_id: &str,
        message: Option<&str>,
    ) -> Result<Connection> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        if state
            .connections
            .iter()
            .any(|c| c.requester_id == requester_id && c.recipient_id == recipient_id)
        {
            return Err(StorageError::ConstraintViolation(
                "Connection already requested".to_string(),
            ));
        }

        let now = Utc::now();
        let connection = Connection {
            id: Uuid::new_v4(),
            requester_id: requester_id.to_string(),
            recipient_id: recipient_id.to_string(),
            status: ConnectionStatus::Pending,
            message: message.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        state.connections.push(connection.clone());
        Ok(connection)
    }

    async fn find_connection_between(&self, a: &str, b: &str) -> Result<Option<Connection>> {
        self.simulate_latency().await;
        Ok(self
            .state
            .lock()
            .await
            .connections
            .iter()
            .rev()
            .find(|c| c.links(a, b))
            .cloned())
    }

    async fn find_connection(&self, id: Uuid) -> Result<Connection> {
        self.simulate_latency().await;
        self.state
            .lock()
            .await
            .connections
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_connections(&self, user_id: &str) -> Result<Vec<Connection>> {
        self.simulate_latency().await;
        let state = self.state.lock().await;
        Ok(state
            .connections
            .iter()
            .rev()
            .filter(|c| c.involves(user_id))
            .cloned()
            .collect())
    }

    async fn respond_to_connection(
        &self,
        id: Uuid,
        status: ConnectionStatus,
    ) -> Result<Connection> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let connection = state
            .connections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StorageError::NotFound)?;
        if connection.status != ConnectionStatus::Pending {
            return Err(StorageError::ConstraintViolation(
                "Connection request already answered".to_string(),
            ));
        }
        connection.status = status;
        connection.updated_at = Utc::now();
        Ok(connection.clone())
    }

    async fn delete_connection(&self, id: Uuid) -> Result<()> {
        self.simulate_latency().await;
        let mut state = self.state.lock().await;
        let before = state.connections.len();
        state.connections.retain(|c| c.id != id);
        if state.connections.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
