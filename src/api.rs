//! Planner API
//!
//! Caller-facing entry point: validate lesson parameters, build the request, and run it
//! through the resilient invoker.

use crate::config::LecternConfig;
use crate::error::GenerationError;
use crate::invoker::ResilientInvoker;
use crate::lesson::LessonPlan;
use crate::provider::{GeminiClient, GenerationTransport};
use crate::request::{build_request, LessonParams};
use crate::retry::RetryPolicy;
use std::sync::Arc;
use tracing::instrument;

/// Generates lesson plans against a configured transport.
pub struct LessonPlanner {
    invoker: ResilientInvoker,
}

impl LessonPlanner {
    pub fn new(transport: Arc<dyn GenerationTransport>, policy: RetryPolicy) -> Self {
        Self {
            invoker: ResilientInvoker::with_policy(transport, policy),
        }
    }

    /// Planner backed by the HTTP client described in `config`.
    pub fn from_config(config: &LecternConfig) -> Result<Self, GenerationError> {
        let client = GeminiClient::from_config(&config.provider)?;
        Ok(Self::new(Arc::new(client), config.retry))
    }

    pub fn policy(&self) -> RetryPolicy {
        self.invoker.policy()
    }

    /// Generate a lesson plan for a topic.
    ///
    /// Fails with `InvalidInput` before any network call when topic or subject is blank,
    /// and with `ExhaustedRetries` once every attempt has failed.
    pub async fn generate_lesson_plan(
        &self,
        topic: &str,
        grade_level: &str,
        subject: &str,
    ) -> Result<LessonPlan, GenerationError> {
        self.generate(&LessonParams::new(topic, grade_level, subject))
            .await
    }

    #[instrument(skip(self), fields(topic = %params.topic, subject = %params.subject))]
    pub async fn generate(&self, params: &LessonParams) -> Result<LessonPlan, GenerationError> {
        self.generate_with(params, self.invoker.policy()).await
    }

    /// Generate with a per-call retry policy override.
    pub async fn generate_with(
        &self,
        params: &LessonParams,
        policy: RetryPolicy,
    ) -> Result<LessonPlan, GenerationError> {
        params.validate()?;
        let request = build_request(params);
        self.invoker.invoke_with(&request, policy).await
    }
}
