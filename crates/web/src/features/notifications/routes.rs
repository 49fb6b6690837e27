use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{list_notifications, mark_all_read, mark_read};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/notifications", get(list_notifications))
        .route("/users/:user_id/notifications/read-all", post(mark_all_read))
        .route("/notifications/:id/read", post(mark_read))
}
