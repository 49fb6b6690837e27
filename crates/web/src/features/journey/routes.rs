use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    add_feedback, get_journey, get_pitch, get_progress, list_achievements, list_feedback,
    list_pitches, record_discovery, submit_pitch, unlock_achievement,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/pitches/:pitch_id/feedback", post(add_feedback))
        .route(
            "/users/:user_id/achievements/:achievement_id",
            post(unlock_achievement),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/users/:user_id/progress", get(get_progress))
        .route("/users/:user_id/journey", get(get_journey))
        .route("/users/:user_id/pitches", get(list_pitches).post(submit_pitch))
        .route("/users/:user_id/pitches/:stage", get(get_pitch))
        .route("/users/:user_id/feedback", get(list_feedback))
        .route("/users/:user_id/achievements", get(list_achievements))
        .route(
            "/users/:user_id/discoveries/:opportunity_id",
            post(record_discovery),
        )
        .merge(protected)
}
