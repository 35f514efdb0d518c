//! Lectern: structured lesson plans from a hosted generative model.
//!
//! Builds a schema-constrained generation request from a topic, sends it to a
//! `generateContent` endpoint, and decodes the model's JSON into a [`lesson::LessonPlan`],
//! retrying transient failures with bounded exponential backoff.

pub mod api;
pub mod cli;
pub mod config;
pub mod envelope;
pub mod error;
pub mod invoker;
pub mod lesson;
pub mod logging;
pub mod provider;
pub mod request;
pub mod retry;
pub mod schema;

pub use api::LessonPlanner;
pub use error::{FailureKind, GenerationError};
pub use invoker::ResilientInvoker;
pub use lesson::{Homework, LessonPlan, QuizItem, Slide};
pub use request::{build_request, GenerationRequest, LessonParams};
pub use retry::{RetryPolicy, RetryState};
pub use schema::{lesson_plan_schema, SchemaNode};
