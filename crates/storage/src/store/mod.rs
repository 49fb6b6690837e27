//! Backends the services read and write through.
//!
//! [`PgStore`] talks to Postgres via the repositories; [`MemoryStore`] keeps
//! everything in process, seeded from the bundled reference data, for local
//! development without a database.

mod memory;
mod postgres;
pub mod retry;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Connection, ConnectionStatus, Feedback, FundingOpportunity, FundingStage, Investor, NewFeedback, NewNotification, NewPitch,
    Notification, Pitch, SavedOpportunity, UnlockedAchievement, UserProgress,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use retry::RetryPolicy;

#[async_trait]
pub trait DataStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str {
        "unknown"
    }

    async fn list_opportunities(&self) -> Result<Vec<FundingOpportunity>>;
    async fn find_opportunity(&self, id: &str) -> Result<FundingOpportunity>;
    async fn find_opportunities(&self, ids: &[String]) -> Result<Vec<FundingOpportunity>>;

    async fn list_investors(&self) -> Result<Vec<Investor>>;
    async fn find_investor(&self, id: &str) -> Result<Investor>;

    /// Insert or replace the pitch for `(user_id, stage)`.
    async fn upsert_pitch(&self, pitch: NewPitch) -> Result<Pitch>;
    async fn find_pitch(&self, user_id: &str, stage: FundingStage) -> Result<Option<Pitch>>;
    async fn find_pitch_by_id(&self, id: Uuid) -> Result<Pitch>;
    async fn list_pitches(&self, user_id: &str) -> Result<Vec<Pitch>>;

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback>;
    /// Newest first.
    async fn list_feedback(&self, user_id: &str) -> Result<Vec<Feedback>>;

    /// Idempotent: concurrent first calls still yield a single record.
    async fn find_or_create_progress(&self, user_id: &str) -> Result<UserProgress>;
    /// Persist stage state (current stage, completed stages, scores). XP is untouched.
    async fn save_journey(&self, progress: &UserProgress) -> Result<UserProgress>;

    async fn list_unlocked(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>>;
    /// Record an unlock and add its XP atomically. `None` when already unlocked.
    async fn unlock_achievement(
        &self,
        user_id: &str,
        achievement_id: &str,
        xp_reward: i32,
    ) -> Result<Option<UserProgress>>;

    /// Returns true and grants `xp` only on the first discovery.
    async fn record_discovery(&self, user_id: &str, opportunity_id: &str, xp: i32) -> Result<bool>;
    async fn list_discoveries(&self, user_id: &str) -> Result<Vec<String>>;

    async fn list_saved(&self, user_id: &str) -> Result<Vec<SavedOpportunity>>;
    async fn find_saved(
        &self,
        user_id: &str,
        opportunity_id: &str,
    ) -> Result<Option<SavedOpportunity>>;
    /// Fails with a constraint violation when already saved.
    async fn save_opportunity(
        &self,
        user_id: &str,
        opportunity_id: &str,
        notes: Option<&str>,
    ) -> Result<SavedOpportunity>;
    async fn update_saved_notes(&self, id: Uuid, notes: Option<&str>) -> Result<SavedOpportunity>;
    async fn delete_saved(&self, id: Uuid) -> Result<()>;

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification>;
    async fn list_notifications(
        &self,
        user_id: &str,
        limit: i64,
        include_read: bool,
    ) -> Result<Vec<Notification>>;
    async fn mark_notification_read(&self, id: Uuid) -> Result<Notification>;
    async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u64>;

    /// Fails with a constraint violation when the pair already has a request.
    async fn create_connection(
        &self,
        requester_id: &str,
        recipient_id: &str,
        message: Option<&str>,
    ) -> Result<Connection>;
    /// Most recent connection between two users in either direction.
    async fn find_connection_between(&self, a: &str, b: &str) -> Result<Option<Connection>>;
    async fn find_connection(&self, id: Uuid) -> Result<Connection>;
    /// Both sides, newest first.
    async fn list_connections(&self, user_id: &str) -> Result<Vec<Connection>>;
    /// Only pending requests can be answered.
    async fn respond_to_connection(&self, id: Uuid, status: ConnectionStatus)
    -> Result<Connection>;
    async fn delete_connection(&self, id: Uuid) -> Result<()>;
}
