use std::future::Future;
use std::time::Duration;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_backoff_ms: 2000,
        }
    }
}

impl RetryPolicy {
    /// `max_retries` extra attempts after the first one.
    pub fn new(max_retries: usize, base_backoff_ms: u64) -> Self {
        Self {
            max_attempts: max_retries + 1,
            base_backoff_ms,
        }
    }

    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        Duration::from_millis(self.base_backoff_ms.saturating_mul(attempt as u64))
    }
}

/// Run `op`, retrying transient storage errors with linear backoff.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if e.is_transient() && attempt < policy.max_attempts => {
                let delay = policy.delay_for_attempt(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    error = %e,
                    "transient storage error, retrying in {:?}",
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::StorageError;

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, 0);

        let result = with_retry(&policy, "test", || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(StorageError::Database(sqlx::Error::PoolTimedOut))
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(2, 0);

        let result: Result<()> = with_retry(&policy, "test", || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Database(sqlx::Error::PoolTimedOut))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_returned_immediately() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, 0);

        let result: Result<()> = with_retry(&policy, "test", || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::NotFound)
        })
        .await;

        assert!(matches!(result, Err(StorageError::NotFound)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_grows_linearly() {
        let policy = RetryPolicy::new(3, 100);
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(300));
    }
}
