use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{
    connection_status, delete_connection, list_connections, list_pending, respond_to_request,
    send_request,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/connections",
            get(list_connections).post(send_request),
        )
        .route("/users/:user_id/connections/pending", get(list_pending))
        .route(
            "/users/:user_id/connections/:other_id/status",
            get(connection_status),
        )
        .route(
            "/connections/:id",
            put(respond_to_request).delete(delete_connection),
        )
}
