use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::DataStore;
use super::retry::{RetryPolicy, with_retry};
use crate::error::Result;
use crate::models::{
    Connection, ConnectionStatus, Feedback, FundingOpportunity, FundingStage, Investor, NewFeedback, NewNotification, NewPitch,
    Notification, Pitch, SavedOpportunity, UnlockedAchievement, UserProgress,
};
use crate::repository::{
    achievement::AchievementRepository, connection::ConnectionRepository,
    discovery::DiscoveryRepository,
    feedback::FeedbackRepository, funding_opportunity::FundingOpportunityRepository,
    investor::InvestorRepository, notification::NotificationRepository, pitch::PitchRepository,
    saved_opportunity::SavedOpportunityRepository, user_progress::UserProgressRepository,
};

/// Postgres-backed store. Reads are retried on transient errors; writes are not.
pub struct PgStore {
    pool: PgPool,
    retry: RetryPolicy,
}

impl PgStore {
    pub fn new(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }
}

#[async_trait]
impl DataStore for PgStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn list_opportunities(&self) -> Result<Vec<FundingOpportunity>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_opportunities", || async move {
            FundingOpportunityRepository::new(pool).list().await
        })
        .await
    }

    async fn find_opportunity(&self, id: &str) -> Result<FundingOpportunity> {
        let pool = &self.pool;
        with_retry(&self.retry, "find_opportunity", || async move {
            FundingOpportunityRepository::new(pool).find_by_id(id).await
        })
        .await
    }

    async fn find_opportunities(&self, ids: &[String]) -> Result<Vec<FundingOpportunity>> {
        let pool = &self.pool;
        with_retry(&self.retry, "find_opportunities", || async move {
            FundingOpportunityRepository::new(pool).find_many(ids).await
        })
        .await
    }

    async fn list_investors(&self) -> Result<Vec<Investor>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_investors", || async move {
            InvestorRepository::new(pool).list().await
        })
        .await
    }

    async fn find_investor(&self, id: &str) -> Result<Investor> {
        let pool = &self.pool;
        with_retry(&self.retry, "find_investor", || async move {
            InvestorRepository::new(pool).find_by_id(id).await
        })
        .await
    }

    async fn upsert_pitch(&self, pitch: NewPitch) -> Result<Pitch> {
        PitchRepository::new(&self.pool).upsert(&pitch).await
    }

    async fn find_pitch(&self, user_id: &str, stage: FundingStage) -> Result<Option<Pitch>> {
        let pool = &self.pool;
        with_retry(&self.retry, "find_pitch", || async move {
            PitchRepository::new(pool).find_by_stage(user_id, stage).await
        })
        .await
    }

    async fn find_pitch_by_id(&self, id: Uuid) -> Result<Pitch> {
        let pool = &self.pool;
        with_retry(&self.retry, "find_pitch_by_id", || async move {
            PitchRepository::new(pool).find_by_id(id).await
        })
        .await
    }

    async fn list_pitches(&self, user_id: &str) -> Result<Vec<Pitch>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_pitches", || async move {
            PitchRepository::new(pool).list_for_user(user_id).await
        })
        .await
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback> {
        FeedbackRepository::new(&self.pool).create(&feedback).await
    }

    async fn list_feedback(&self, user_id: &str) -> Result<Vec<Feedback>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_feedback", || async move {
            FeedbackRepository::new(pool).list_for_user(user_id).await
        })
        .await
    }

    async fn find_or_create_progress(&self, user_id: &str) -> Result<UserProgress> {
        let repo = UserProgressRepository::new(&self.pool);
        match repo.find_by_user(user_id).await? {
            Some(progress) => Ok(progress),
            None => repo.find_or_create(user_id).await,
        }
    }

    async fn save_journey(&self, progress: &UserProgress) -> Result<UserProgress> {
        UserProgressRepository::new(&self.pool)
            .save_journey(progress)
            .await
    }

    async fn list_unlocked(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_unlocked", || async move {
            AchievementRepository::new(pool).list_for_user(user_id).await
        })
        .await
    }

    async fn unlock_achievement(
        &self,
        user_id: &str,
        achievement_id: &str,
        xp_reward: i32,
    ) -> Result<Option<UserProgress>> {
        AchievementRepository::new(&self.pool)
            .unlock(user_id, achievement_id, xp_reward)
            .await
    }

    async fn record_discovery(&self, user_id: &str, opportunity_id: &str, xp: i32) -> Result<bool> {
        DiscoveryRepository::new(&self.pool)
            .record(user_id, opportunity_id, xp)
            .await
    }

    async fn list_discoveries(&self, user_id: &str) -> Result<Vec<String>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_discoveries", || async move {
            DiscoveryRepository::new(pool).list_for_user(user_id).await
        })
        .await
    }

    async fn list_saved(&self, user_id: &str) -> Result<Vec<SavedOpportunity>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_saved", || async move {
            SavedOpportunityRepository::new(pool)
                .list_for_user(user_id)
                .await
        })
        .await
    }

    async fn find_saved(
        &self,
        user_id: &str,
        opportunity_id: &str,
    ) -> Result<Option<SavedOpportunity>> {
        let pool = &self.pool;
        with_retry(&self.retry, "find_saved", || async move {
            SavedOpportunityRepository::new(pool)
                .find(user_id, opportunity_id)
                .await
        })
        .await
    }

    async fn save_opportunity(
        &self,
        user_id: &str,
        opportunity_id: &str,
        notes: Option<&str>,
    ) -> Result<SavedOpportunity> {
        SavedOpportunityRepository::new(&self.pool)
            .create(user_id, opportunity_id, notes)
            .await
    }

    async fn update_saved_notes(&self, id: Uuid, notes: Option<&str>) -> Result<SavedOpportunity> {
        SavedOpportunityRepository::new(&self.pool)
            .update_notes(id, notes)
            .await
    }

    async fn delete_saved(&self, id: Uuid) -> Result<()> {
        SavedOpportunityRepository::new(&self.pool).delete(id).await
    }

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification> {
        NotificationRepository::new(&self.pool)
            .create(&notification)
            .await
    }

    async fn list_notifications(
        &self,
        user_id: &str,
        limit: i64,
        include_read: bool,
    ) -> Result<Vec<Notification>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_notifications", || async move {
            NotificationRepository::new(pool)
                .list_for_user(user_id, limit, include_read)
                .await
        })
        .await
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<Notification> {
        NotificationRepository::new(&self.pool).mark_read(id).await
    }

    async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u64> {
        NotificationRepository::new(&self.pool)
            .mark_all_read(user_id)
            .await
    }

    async fn create_connection(
        &self,
        requester_id: &str,
        recipient_id: &str,
        message: Option<&str>,
    ) -> Result<Connection> {
        ConnectionRepository::new(&self.pool)
            .create(requester_id, recipient_id, message)
            .await
    }

    async fn find_connection_between(&self, a: &str, b: &str) -> Result<Option<Connection>> {
        let pool = &self.pool;
        with_retry(&self.retry, "find_connection_between", || async move {
            ConnectionRepository::new(pool).find_between(a, b).await
        })
        .await
    }

    async fn find_connection(&self, id: Uuid) -> Result<Connection> {
        let pool = &self.pool;
        with_retry(&self.retry, "find_connection", || async move {
            ConnectionRepository::new(pool).find_by_id(id).await
        })
        .await
    }

    async fn list_connections(&self, user_id: &str) -> Result<Vec<Connection>> {
        let pool = &self.pool;
        with_retry(&self.retry, "list_connections", || async move {
            ConnectionRepository::new(pool).list_for_user(user_id).await
        })
        .await
    }

    async fn respond_to_connection(
        &self,
        id: Uuid,
        status: ConnectionStatus,
    ) -> Result<Connection> {
        ConnectionRepository::new(&self.pool)
            .respond(id, status)
            .await
    }

    async fn delete_connection(&self, id: Uuid) -> Result<()> {
        ConnectionRepository::new(&self.pool).delete(id).await
    }
}
