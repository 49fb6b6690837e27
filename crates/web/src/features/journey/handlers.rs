use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::journey::{
        AchievementStatus, CreateFeedbackRequest, DiscoveryResponse, ProgressResponse,
        StageState, SubmitPitchRequest, SubmitPitchResponse, UnlockResponse,
    },
    models::{Feedback, FundingStage, Pitch},
    services::tracker::PitchOutcome,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/progress",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User progress, created on first access", body = ProgressResponse)
    ),
    tag = "journey"
)]
pub async fn get_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let progress = services::get_progress(&state.tracker, &user_id).await?;

    Ok(Json(ProgressResponse::from(progress)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/journey",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Status of each funding stage", body = Vec<StageState>)
    ),
    tag = "journey"
)]
pub async fn get_journey(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let stages = services::get_journey(&state.tracker, &user_id).await?;

    Ok(Json(stages).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/pitches",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    request_body = SubmitPitchRequest,
    responses(
        (status = 201, description = "Pitch accepted and scored", body = SubmitPitchResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Stage is still locked", body = SubmitPitchResponse),
        (status = 503, description = "Pitch could not be stored", body = SubmitPitchResponse)
    ),
    tag = "journey"
)]
pub async fn submit_pitch(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<SubmitPitchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    let stage = req
        .funding_stage()
        .ok_or_else(|| WebError::BadRequest("Stage must be between 0 and 4".to_string()))?;

    let outcome =
        services::submit_pitch(&state.tracker, &user_id, stage, &req.title, req.content).await;

    let (status, response) = match outcome {
        PitchOutcome::Accepted {
            pitch,
            score,
            stage_completed,
            newly_unlocked,
        } => (
            StatusCode::CREATED,
            SubmitPitchResponse {
                accepted: true,
                pitch: Some(pitch),
                score: Some(score),
                stage_completed,
                newly_unlocked,
            },
        ),
        PitchOutcome::Rejected => (StatusCode::CONFLICT, SubmitPitchResponse::declined()),
        PitchOutcome::Failed => (
            StatusCode::SERVICE_UNAVAILABLE,
            SubmitPitchResponse::declined(),
        ),
    };

    Ok((status, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/pitches",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Pitches submitted by the user", body = Vec<Pitch>)
    ),
    tag = "journey"
)]
pub async fn list_pitches(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let pitches = services::list_pitches(state.store.as_ref(), &user_id).await;

    Ok(Json(pitches).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/pitches/{stage}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("stage" = u8, Path, description = "Funding stage (0-4)")
    ),
    responses(
        (status = 200, description = "Pitch for the stage", body = Pitch),
        (status = 400, description = "Invalid stage"),
        (status = 404, description = "No pitch for this stage")
    ),
    tag = "journey"
)]
pub async fn get_pitch(
    State(state): State<AppState>,
    Path((user_id, stage)): Path<(String, u8)>,
) -> Result<Response, WebError> {
    let stage = FundingStage::try_from(stage).map_err(WebError::BadRequest)?;

    let pitch = services::get_pitch(state.store.as_ref(), &user_id, stage)
        .await?
        .ok_or(WebError::NotFound)?;

    Ok(Json(pitch).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/feedback",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Feedback on the user's pitches, newest first", body = Vec<Feedback>)
    ),
    tag = "journey"
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let feedback = services::list_feedback(state.store.as_ref(), &user_id).await;

    Ok(Json(feedback).into_response())
}

#[utoipa::path(
    post,
    path = "/api/pitches/{pitch_id}/feedback",
    params(
        ("pitch_id" = Uuid, Path, description = "Pitch id")
    ),
    request_body = CreateFeedbackRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Feedback recorded", body = Feedback),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pitch not found")
    ),
    tag = "journey"
)]
pub async fn add_feedback(
    State(state): State<AppState>,
    Path(pitch_id): Path<Uuid>,
    Json(req): Json<CreateFeedbackRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let feedback = services::add_feedback(&state.tracker, pitch_id, req).await?;

    Ok((StatusCode::CREATED, Json(feedback)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/achievements",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Achievement catalog with the user's progress", body = Vec<AchievementStatus>)
    ),
    tag = "journey"
)]
pub async fn list_achievements(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let achievements = services::list_achievements(&state.tracker, &user_id).await;

    Ok(Json(achievements).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/achievements/{achievement_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("achievement_id" = String, Path, description = "Achievement id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Unlock result", body = UnlockResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown achievement")
    ),
    tag = "journey"
)]
pub async fn unlock_achievement(
    State(state): State<AppState>,
    Path((user_id, achievement_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    if !services::achievement_exists(&achievement_id) {
        return Err(WebError::NotFound);
    }

    let unlocked = services::unlock_achievement(&state.tracker, &user_id, &achievement_id).await;

    Ok(Json(UnlockResponse {
        achievement_id,
        unlocked,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/discoveries/{opportunity_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("opportunity_id" = String, Path, description = "Opportunity id")
    ),
    responses(
        (status = 200, description = "Discovery recorded", body = DiscoveryResponse),
        (status = 404, description = "Opportunity not found")
    ),
    tag = "journey"
)]
pub async fn record_discovery(
    State(state): State<AppState>,
    Path((user_id, opportunity_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    let outcome = services::record_discovery(&state.tracker, &user_id, &opportunity_id).await?;

    Ok(Json(DiscoveryResponse {
        opportunity_id,
        first_discovery: outcome.first_discovery,
        newly_unlocked: outcome.newly_unlocked,
    })
    .into_response())
}
