//! Resilient invoker: send a generation request, decode the lesson plan, retry with backoff.

use crate::envelope::extract_text;
use crate::error::GenerationError;
use crate::lesson::LessonPlan;
use crate::provider::GenerationTransport;
use crate::request::GenerationRequest;
use crate::retry::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Delivers generation requests and masks transient failures behind bounded retries.
///
/// Holds no per-call state; concurrent `invoke` calls each get their own retry state.
pub struct ResilientInvoker {
    transport: Arc<dyn GenerationTransport>,
    policy: RetryPolicy,
}

impl ResilientInvoker {
    pub fn new(transport: Arc<dyn GenerationTransport>) -> Self {
        Self::with_policy(transport, RetryPolicy::default())
    }

    pub fn with_policy(transport: Arc<dyn GenerationTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Invoke with the configured retry policy.
    pub async fn invoke(&self, request: &GenerationRequest) -> Result<LessonPlan, GenerationError> {
        self.invoke_with(request, self.policy).await
    }

    /// Invoke with an explicit retry policy.
    ///
    /// Each attempt is one transport round trip followed by envelope extraction and
    /// decoding. Any of the three failing is retryable; between attempts the task sleeps
    /// for the current delay, which then doubles. When the last attempt fails the result
    /// is [`GenerationError::ExhaustedRetries`] wrapping that attempt's failure.
    /// Non-retryable errors from the transport are returned as-is.
    pub async fn invoke_with(
        &self,
        request: &GenerationRequest,
        policy: RetryPolicy,
    ) -> Result<LessonPlan, GenerationError> {
        let mut state = policy.start();
        let target = self.transport.target();

        loop {
            let attempt = state.attempt() + 1;
            debug!(
                attempt,
                max_attempts = state.max_attempts(),
                target = %target,
                "Generation attempt"
            );

            let failure = match self.attempt(request).await {
                Ok(plan) => {
                    info!(attempt, title = %plan.title, "Lesson plan generated");
                    return Ok(plan);
                }
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => err,
            };

            match state.advance() {
                Some(delay) => {
                    warn!(
                        attempt,
                        kind = %failure.kind(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %failure,
                        "Generation attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    error!(
                        attempts = attempt,
                        kind = %failure.kind(),
                        error = %failure,
                        "Generation failed, retries exhausted"
                    );
                    return Err(GenerationError::ExhaustedRetries {
                        attempts: attempt,
                        last: Box::new(failure),
                    });
                }
            }
        }
    }

    async fn attempt(&self, request: &GenerationRequest) -> Result<LessonPlan, GenerationError> {
        let body = self.transport.send(request).await?;
        let text = extract_text(&body)?;
        LessonPlan::from_json(&text)
    }
}
