use axum::{Router, routing::get};

use super::handlers::{get_investor, investor_opportunities, list_investors};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/investors", get(list_investors))
        .route("/investors/:id", get(get_investor))
        .route("/investors/:id/opportunities", get(investor_opportunities))
}
