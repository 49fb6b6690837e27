pub mod achievement;
pub mod connection;
pub mod feedback;
pub mod funding_opportunity;
pub mod funding_stage;
pub mod investor;
pub mod notification;
pub mod pitch;
pub mod saved_opportunity;
pub mod user_progress;

pub use achievement::{Achievement, AchievementCategory, UnlockedAchievement};
pub use connection::{Connection, ConnectionStatus};
pub use feedback::{Feedback, NewFeedback};
pub use funding_opportunity::{DetailEntry, DisplayType, FundingOpportunity, OpportunityDetails};
pub use funding_stage::FundingStage;
pub use investor::Investor;
pub use notification::{NewNotification, Notification};
pub use pitch::{NewPitch, Pitch};
pub use saved_opportunity::SavedOpportunity;
pub use user_progress::{UserProgress, level_for_xp};
