use crate::error::{RelevanceError, RelevanceResult};
use std::future::Future;
use std::time::Duration;

/// Applies the configured per-call deadline to collaborator lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupDeadline {
    timeout: Option<Duration>,
}

impl LookupDeadline {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Runs a lookup, mapping an elapsed deadline to `LookupTimeout`.
    pub async fn run<T, F>(&self, operation: &'static str, lookup: F) -> RelevanceResult<T>
    where
        F: Future<Output = RelevanceResult<T>>,
    {
        match self.timeout {
            None => lookup.await,
            Some(timeout) => match tokio::time::timeout(timeout, lookup).await {
                Ok(result) => result,
                Err(_) => Err(RelevanceError::LookupTimeout { operation, timeout }),
            },
        }
    }
}
