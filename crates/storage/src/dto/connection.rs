use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Connection, ConnectionStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendConnectionRequest {
    #[validate(length(min = 1, max = 255, message = "Recipient id is required"))]
    pub recipient_id: String,

    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

/// The two answers a recipient can give. `pending` is not accepted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionDecision {
    Accepted,
    Rejected,
}

impl From<ConnectionDecision> for ConnectionStatus {
    fn from(decision: ConnectionDecision) -> Self {
        match decision {
            ConnectionDecision::Accepted => Self::Accepted,
            ConnectionDecision::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RespondConnectionRequest {
    pub status: ConnectionDecision,
}

/// A connection seen from one of its two users
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConnectionView {
    pub connection_id: Uuid,
    pub connected_user_id: String,
    pub status: ConnectionStatus,
    pub is_requester: bool,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ConnectionView {
    pub fn new(connection: Connection, user_id: &str) -> Self {
        let is_requester = connection.requester_id == user_id;
        Self {
            connection_id: connection.id,
            connected_user_id: connection.counterpart(user_id).to_string(),
            status: connection.status,
            is_requester,
            message: connection.message,
            created_at: connection.created_at,
        }
    }
}

/// `status` is `none` when the users never connected
#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionStatusResponse {
    pub status: String,
    pub connection_id: Option<Uuid>,
}

impl From<Option<Connection>> for ConnectionStatusResponse {
    fn from(connection: Option<Connection>) -> Self {
        match connection {
            Some(c) => Self {
                status: c.status.to_string(),
                connection_id: Some(c.id),
            },
            None => Self {
                status: "none".to_string(),
                connection_id: None,
            },
        }
    }
}
