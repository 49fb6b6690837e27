//! Connection requests between founders.
//!
//! A pair of users holds at most one connection, whichever side asked
//! first. Recipients are notified of new requests and requesters of
//! accepted ones; a failed notification never fails the request itself.

use uuid::Uuid;

use crate::dto::connection::{ConnectionDecision, ConnectionView};
use crate::error::{Result, StorageError};
use crate::models::{Connection, ConnectionStatus, NewNotification};
use crate::store::DataStore;

pub async fn send_request(
    store: &dyn DataStore,
    requester_id: &str,
    recipient_id: &str,
    message: Option<&str>,
) -> Result<Connection> {
    if requester_id == recipient_id {
        return Err(StorageError::ConstraintViolation(
            "Cannot connect with yourself".to_string(),
        ));
    }
    if store
        .find_connection_between(requester_id, recipient_id)
        .await?
        .is_some()
    {
        return Err(StorageError::ConstraintViolation(
            "Connection already requested".to_string(),
        ));
    }

    let connection = store
        .create_connection(requester_id, recipient_id, message)
        .await?;
    tracing::info!(
        requester_id,
        recipient_id,
        connection_id = %connection.id,
        "connection requested"
    );

    notify(
        store,
        NewNotification::connection_request(
            recipient_id,
            &connection.id.to_string(),
            requester_id,
        ),
    )
    .await;
    Ok(connection)
}

pub async fn respond(
    store: &dyn DataStore,
    id: Uuid,
    decision: ConnectionDecision,
) -> Result<Connection> {
    let connection = store.respond_to_connection(id, decision.into()).await?;
    tracing::info!(connection_id = %id, status = %connection.status, "connection answered");

    if connection.status == ConnectionStatus::Accepted {
        notify(
            store,
            NewNotification::connection_accepted(
                &connection.requester_id,
                &connection.id.to_string(),
                &connection.recipient_id,
            ),
        )
        .await;
    }
    Ok(connection)
}

/// Every connection of the user, newest first
pub fn views(user_id: &str, connections: Vec<Connection>) -> Vec<ConnectionView> {
    connections
        .into_iter()
        .map(|c| ConnectionView::new(c, user_id))
        .collect()
}

/// Requests waiting for the user's answer
pub fn pending(user_id: &str, connections: Vec<Connection>) -> Vec<ConnectionView> {
    connections
        .into_iter()
        .filter(|c| c.recipient_id == user_id && c.status == ConnectionStatus::Pending)
        .map(|c| ConnectionView::new(c, user_id))
        .collect()
}

async fn notify(store: &dyn DataStore, notification: NewNotification) {
    if let Err(e) = store.insert_notification(notification).await {
        tracing::error!(error = %e, "failed to create notification");
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn connection(requester: &str, recipient: &str, status: ConnectionStatus) -> Connection {
        let now = Utc::now();
        Connection {
            id: Uuid::new_v4(),
            requester_id: requester.to_string(),
            recipient_id: recipient.to_string(),
            status,
            message: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_pending_only_lists_incoming_requests() {
        let connections = vec![
            connection("bram", "anna", ConnectionStatus::Pending),
            connection("anna", "cees", ConnectionStatus::Pending),
            connection("dirk", "anna", ConnectionStatus::Accepted),
        ];

        let pending = pending("anna", connections);

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].connected_user_id, "bram");
        assert!(!pending[0].is_requester);
    }

    #[test]
    fn test_views_point_at_the_other_user() {
        let mut older = connection("anna", "bram", ConnectionStatus::Accepted);
        older.created_at -= Duration::days(1);
        let newer = connection("cees", "anna", ConnectionStatus::Pending);

        let views = views("anna", vec![newer, older]);

        assert_eq!(views[0].connected_user_id, "cees");
        assert!(!views[0].is_requester);
        assert_eq!(views[1].connected_user_id, "bram");
        assert!(views[1].is_requester);
        assert_eq!(views[1].status, ConnectionStatus::Accepted);
    }
}
