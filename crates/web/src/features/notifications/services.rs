use storage::{DataStore, error::Result, models::Notification, services::degrade};
use uuid::Uuid;

/// Most recent notifications for a user
pub async fn list_notifications(
    store: &dyn DataStore,
    user_id: &str,
    limit: i64,
    include_read: bool,
) -> Vec<Notification> {
    degrade::or_empty(
        store.list_notifications(user_id, limit, include_read).await,
        "list_notifications",
    )
}

/// Mark one notification as read
pub async fn mark_read(store: &dyn DataStore, id: Uuid) -> Result<Notification> {
    store.mark_notification_read(id).await
}

/// Mark every unread notification of the user as read
pub async fn mark_all_read(store: &dyn DataStore, user_id: &str) -> Result<u64> {
    store.mark_all_notifications_read(user_id).await
}
