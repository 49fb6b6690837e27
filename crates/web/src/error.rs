use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    NotFound,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl WebError {
    fn status_and_body(&self) -> (StatusCode, Value) {
        match self {
            Self::Storage(e) => storage_response(e),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "details": field_messages(errors)
                }),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" })),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Resource not found" }),
            ),
        }
    }
}

/// Store failures the client can act on keep their message; the rest are
/// logged and answered generically.
fn storage_response(error: &StorageError) -> (StatusCode, Value) {
    match error {
        StorageError::NotFound => (
            StatusCode::NOT_FOUND,
            json!({ "error": "Resource not found" }),
        ),
        StorageError::ConstraintViolation(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
        StorageError::Migration(e) => {
            tracing::error!(error = %e, "schema migration failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "Database schema is not ready" }),
            )
        }
        StorageError::Seed(e) => {
            tracing::error!(error = %e, "bundled reference data is invalid");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Reference data could not be loaded" }),
            )
        }
        StorageError::Database(e) if error.is_transient() => {
            tracing::warn!(error = %e, "database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "Funding data is temporarily unavailable" }),
            )
        }
        StorageError::Database(e) => {
            tracing::error!(error = ?e, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "An internal error occurred" }),
            )
        }
    }
}

fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect()
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: StorageError) -> StatusCode {
        WebError::from(error).status_and_body().0
    }

    #[test]
    fn test_store_errors_map_to_distinct_statuses() {
        assert_eq!(status_of(StorageError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(StorageError::ConstraintViolation("dup".to_string())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_invalid_reference_data_is_internal() {
        let parse = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let (status, body) = WebError::from(StorageError::Seed(parse)).status_and_body();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Reference data could not be loaded");
    }

    #[test]
    fn test_conflict_keeps_store_message() {
        let (_, body) = WebError::from(StorageError::ConstraintViolation(
            "Opportunity already saved".to_string(),
        ))
        .status_and_body();
        assert_eq!(body["error"], "Opportunity already saved");
    }
}
