use storage::{
    DataStore,
    dto::connection::{ConnectionDecision, ConnectionStatusResponse, ConnectionView},
    error::Result,
    models::Connection,
    services::{connections, degrade},
};
use uuid::Uuid;

/// All connections of a user on either side, newest first
pub async fn list(store: &dyn DataStore, user_id: &str) -> Vec<ConnectionView> {
    let all = degrade::or_empty(store.list_connections(user_id).await, "list_connections");
    connections::views(user_id, all)
}

/// Requests the user has not answered yet
pub async fn list_pending(store: &dyn DataStore, user_id: &str) -> Vec<ConnectionView> {
    let all = degrade::or_empty(store.list_connections(user_id).await, "list_connections");
    connections::pending(user_id, all)
}

pub async fn status_between(
    store: &dyn DataStore,
    user_id: &str,
    other_id: &str,
) -> Result<ConnectionStatusResponse> {
    Ok(store.find_connection_between(user_id, other_id).await?.into())
}

pub async fn send(
    store: &dyn DataStore,
    requester_id: &str,
    recipient_id: &str,
    message: Option<&str>,
) -> Result<Connection> {
    connections::send_request(store, requester_id, recipient_id, message).await
}

pub async fn respond(
    store: &dyn DataStore,
    id: Uuid,
    decision: ConnectionDecision,
) -> Result<Connection> {
    connections::respond(store, id, decision).await
}

pub async fn delete(store: &dyn DataStore, id: Uuid) -> Result<()> {
    store.delete_connection(id).await?;
    tracing::info!(connection_id = %id, "connection removed");
    Ok(())
}
