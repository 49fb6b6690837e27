use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{delete_saved, is_saved, list_saved, save_opportunity, update_notes};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/saved", get(list_saved).post(save_opportunity))
        .route("/users/:user_id/saved/:opportunity_id", get(is_saved))
        .route("/saved/:id", put(update_notes).delete(delete_saved))
}
