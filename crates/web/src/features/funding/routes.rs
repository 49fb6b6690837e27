use axum::{Router, routing::get};

use super::handlers::{
    category_counts, early_stage, get_opportunity, impact_focused, list_opportunities,
    opportunity_investors,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/funding", get(list_opportunities))
        .route("/funding/categories", get(category_counts))
        .route("/funding/early-stage", get(early_stage))
        .route("/funding/impact", get(impact_focused))
        .route("/funding/:id", get(get_opportunity))
        .route("/funding/:id/investors", get(opportunity_investors))
}
