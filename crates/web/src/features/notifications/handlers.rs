use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::notification::{MarkAllReadResponse, NotificationQuery},
    models::Notification,
};
use uuid::Uuid;

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/notifications",
    params(
        ("user_id" = String, Path, description = "User id"),
        NotificationQuery
    ),
    responses(
        (status = 200, description = "Notifications, newest first", body = Vec<Notification>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<NotificationQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let notifications = services::list_notifications(
        state.store.as_ref(),
        &user_id,
        query.limit,
        query.include_read,
    )
    .await;

    Ok(Json(notifications).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/notifications/read-all",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Notifications marked as read", body = MarkAllReadResponse)
    ),
    tag = "notifications"
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    let updated = services::mark_all_read(state.store.as_ref(), &user_id).await?;

    Ok(Json(MarkAllReadResponse { updated }).into_response())
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification id")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let notification = services::mark_read(state.store.as_ref(), id).await?;

    Ok(Json(notification).into_response())
}
