//! The external submit collaborator

use crate::clock::Clock;
use crate::error::SubmitFailure;
use async_trait::async_trait;
use formflow_validation::FormValues;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Performs the side effect of a submission.
///
/// Invoked exactly once per accepted submit. Transport and retries are the
/// implementor's business; the session only sees success or a failure reason.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, values: &FormValues) -> Result<(), SubmitFailure>;
}

/// Stand-in backend: logs the values, waits, then answers
pub struct SimulatedSubmitter {
    clock: Arc<dyn Clock>,
    latency: Duration,
    failure: Option<String>,
}

impl SimulatedSubmitter {
    pub fn new(clock: Arc<dyn Clock>, latency: Duration) -> Self {
        Self {
            clock,
            latency,
            failure: None,
        }
    }

    /// Answer every submission with this failure reason
    pub fn failing_with(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, values: &FormValues) -> Result<(), SubmitFailure> {
        info!(
            target: "formflow::submit",
            fields = values.len(),
            latency_ms = self.latency.as_millis() as u64,
            "Submitting form data: {}",
            serde_json::to_string(values).unwrap_or_default()
        );

        self.clock.sleep(self.latency).await;

        match &self.failure {
            Some(reason) => Err(SubmitFailure::new(reason.as_str())),
            None => Ok(()),
        }
    }
}
