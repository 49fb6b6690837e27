use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
}

impl NewNotification {
    pub fn achievement(user_id: &str, achievement_id: &str, title: &str, xp_reward: i32) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind: "achievement".to_string(),
            title: format!("Achievement unlocked: {}", title),
            content: format!("You earned {} XP.", xp_reward),
            related_entity_type: Some("achievement".to_string()),
            related_entity_id: Some(achievement_id.to_string()),
        }
    }

    pub fn feedback(user_id: &str, pitch_id: &str, reviewer_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind: "feedback".to_string(),
            title: "New pitch feedback".to_string(),
            content: format!("{} reviewed your pitch.", reviewer_name),
            related_entity_type: Some("pitch".to_string()),
            related_entity_id: Some(pitch_id.to_string()),
        }
    }

    pub fn connection_request(recipient_id: &str, connection_id: &str, requester_id: &str) -> Self {
        Self {
            user_id: recipient_id.to_string(),
            kind: "connection_request".to_string(),
            title: "New connection request".to_string(),
            content: format!("{} wants to connect with you.", requester_id),
            related_entity_type: Some("connection".to_string()),
            related_entity_id: Some(connection_id.to_string()),
        }
    }

    pub fn connection_accepted(requester_id: &str, connection_id: &str, recipient_id: &str) -> Self {
        Self {
            user_id: requester_id.to_string(),
            kind: "connection_accepted".to_string(),
            title: "Connection accepted".to_string(),
            content: format!("{} accepted your connection request.", recipient_id),
            related_entity_type: Some("connection".to_string()),
            related_entity_id: Some(connection_id.to_string()),
        }
    }
}
