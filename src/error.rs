//! Error types for lesson plan generation.

use std::fmt;
use thiserror::Error;

/// Errors produced while building, sending, or decoding a generation request.
///
/// `Transport`, `EnvelopeShape` and `Decode` are retryable and are absorbed by the
/// invoker's attempt loop. Callers of [`crate::api::LessonPlanner`] only ever see
/// `InvalidInput`, `Config` or `ExhaustedRetries`.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{}", describe_transport(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed response envelope: {0}")]
    EnvelopeShape(String),

    #[error("Failed to decode lesson plan: {0}")]
    Decode(String),

    #[error("Generation failed after {attempts} attempt(s): {last}")]
    ExhaustedRetries {
        attempts: u32,
        last: Box<GenerationError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation cancelled")]
    Cancelled,
}

fn describe_transport(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Request failed with HTTP {}: {}", code, message),
        None => format!("Request failed: {}", message),
    }
}

/// Coarse classification of a failure, suitable for user-facing messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    Transport,
    EnvelopeShape,
    Decode,
    ExhaustedRetries,
    Config,
    Cancelled,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::Transport => "transport",
            FailureKind::EnvelopeShape => "envelope_shape",
            FailureKind::Decode => "decode",
            FailureKind::ExhaustedRetries => "exhausted_retries",
            FailureKind::Config => "config",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::InvalidInput(_) => FailureKind::InvalidInput,
            GenerationError::Transport { .. } => FailureKind::Transport,
            GenerationError::EnvelopeShape(_) => FailureKind::EnvelopeShape,
            GenerationError::Decode(_) => FailureKind::Decode,
            GenerationError::ExhaustedRetries { .. } => FailureKind::ExhaustedRetries,
            GenerationError::Config(_) => FailureKind::Config,
            GenerationError::Cancelled => FailureKind::Cancelled,
        }
    }

    /// Whether the invoker may try again after this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::Transport { .. }
                | GenerationError::EnvelopeShape(_)
                | GenerationError::Decode(_)
        )
    }

    /// The failure that ended the attempt loop, or `self` for non-terminal errors.
    pub fn last_failure(&self) -> &GenerationError {
        match self {
            GenerationError::ExhaustedRetries { last, .. } => last.last_failure(),
            other => other,
        }
    }

    /// Number of attempts made, when known.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            GenerationError::ExhaustedRetries { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    /// HTTP status of the last transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self.last_failure() {
            GenerationError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<config::ConfigError> for GenerationError {
    fn from(err: config::ConfigError) -> Self {
        GenerationError::Config(err.to_string())
    }
}
