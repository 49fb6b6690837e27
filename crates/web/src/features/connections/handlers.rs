use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::connection::{
        ConnectionStatusResponse, ConnectionView, RespondConnectionRequest, SendConnectionRequest,
    },
    models::Connection,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/connections",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Connections on either side", body = Vec<ConnectionView>)
    ),
    tag = "connections"
)]
pub async fn list_connections(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let connections = services::list(state.store.as_ref(), &user_id).await;

    Ok(Json(connections).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/connections/pending",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Requests awaiting an answer", body = Vec<ConnectionView>)
    ),
    tag = "connections"
)]
pub async fn list_pending(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let pending = services::list_pending(state.store.as_ref(), &user_id).await;

    Ok(Json(pending).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/connections",
    params(
        ("user_id" = String, Path, description = "Requesting user id")
    ),
    request_body = SendConnectionRequest,
    responses(
        (status = 201, description = "Request sent", body = Connection),
        (status = 400, description = "Validation error"),
        (status = 409, description = "The users already have a connection")
    ),
    tag = "connections"
)]
pub async fn send_request(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<SendConnectionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    if req.recipient_id == user_id {
        return Err(WebError::BadRequest(
            "Cannot send a connection request to yourself".to_string(),
        ));
    }

    let connection = services::send(
        state.store.as_ref(),
        &user_id,
        &req.recipient_id,
        req.message.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(connection)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/connections/{other_id}/status",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("other_id" = String, Path, description = "Other user id")
    ),
    responses(
        (status = 200, description = "Connection status between the users", body = ConnectionStatusResponse)
    ),
    tag = "connections"
)]
pub async fn connection_status(
    State(state): State<AppState>,
    Path((user_id, other_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    let status = services::status_between(state.store.as_ref(), &user_id, &other_id).await?;

    Ok(Json(status).into_response())
}

#[utoipa::path(
    put,
    path = "/api/connections/{id}",
    params(
        ("id" = Uuid, Path, description = "Connection id")
    ),
    request_body = RespondConnectionRequest,
    responses(
        (status = 200, description = "Request answered", body = Connection),
        (status = 404, description = "Connection not found"),
        (status = 409, description = "Request already answered")
    ),
    tag = "connections"
)]
pub async fn respond_to_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RespondConnectionRequest>,
) -> Result<Response, WebError> {
    let connection = services::respond(state.store.as_ref(), id, req.status).await?;

    Ok(Json(connection).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/connections/{id}",
    params(
        ("id" = Uuid, Path, description = "Connection id")
    ),
    responses(
        (status = 204, description = "Connection removed"),
        (status = 404, description = "Connection not found")
    ),
    tag = "connections"
)]
pub async fn delete_connection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete(state.store.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
