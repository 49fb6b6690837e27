use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::saved::{
        IsSavedResponse, SaveOpportunityRequest, SavedOpportunityResponse, UpdateNotesRequest,
    },
    models::SavedOpportunity,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/saved",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Saved opportunities", body = Vec<SavedOpportunityResponse>)
    ),
    tag = "saved"
)]
pub async fn list_saved(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let saved = services::list_saved(state.store.as_ref(), &user_id).await;

    Ok(Json(saved).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/saved",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    request_body = SaveOpportunityRequest,
    responses(
        (status = 201, description = "Opportunity saved", body = SavedOpportunity),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Opportunity not found"),
        (status = 409, description = "Opportunity already saved")
    ),
    tag = "saved"
)]
pub async fn save_opportunity(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<SaveOpportunityRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let saved = services::save(
        state.store.as_ref(),
        &user_id,
        &req.opportunity_id,
        req.notes.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(saved)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/saved/{opportunity_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("opportunity_id" = String, Path, description = "Opportunity id")
    ),
    responses(
        (status = 200, description = "Whether the opportunity is saved", body = IsSavedResponse)
    ),
    tag = "saved"
)]
pub async fn is_saved(
    State(state): State<AppState>,
    Path((user_id, opportunity_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    let saved = services::find_saved(state.store.as_ref(), &user_id, &opportunity_id).await?;

    Ok(Json(IsSavedResponse {
        saved: saved.is_some(),
        id: saved.map(|s| s.id),
    })
    .into_response())
}

#[utoipa::path(
    put,
    path = "/api/saved/{id}",
    params(
        ("id" = Uuid, Path, description = "Saved opportunity id")
    ),
    request_body = UpdateNotesRequest,
    responses(
        (status = 200, description = "Notes updated", body = SavedOpportunity),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Saved opportunity not found")
    ),
    tag = "saved"
)]
pub async fn update_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNotesRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let saved = services::update_notes(state.store.as_ref(), id, req.notes.as_deref()).await?;

    Ok(Json(saved).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/saved/{id}",
    params(
        ("id" = Uuid, Path, description = "Saved opportunity id")
    ),
    responses(
        (status = 204, description = "Saved opportunity removed"),
        (status = 404, description = "Saved opportunity not found")
    ),
    tag = "saved"
)]
pub async fn delete_saved(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete(state.store.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
