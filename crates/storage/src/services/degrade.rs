use crate::error::Result;

/// Listing reads fall back to an empty list; the failure is only logged.
pub fn or_empty<T>(result: Result<Vec<T>>, operation: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::error!(operation, error = %e, "storage read failed, returning empty list");
        Vec::new()
    })
}
