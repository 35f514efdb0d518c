//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::GenerationError;

/// Map domain errors to a user-facing message.
pub fn map_error(e: &GenerationError) -> String {
    match e {
        GenerationError::ExhaustedRetries { attempts, last } => {
            let detail = match last.status() {
                Some(status) => format!("{}, HTTP {}", last.kind(), status),
                None => last.kind().to_string(),
            };
            format!(
                "Lesson plan generation failed after {} attempt(s) (last failure: {}): {}",
                attempts,
                detail,
                last.last_failure()
            )
        }
        GenerationError::InvalidInput(msg) => format!("Invalid input: {}", msg),
        GenerationError::Config(msg) => format!("Configuration error: {}", msg),
        other => other.to_string(),
    }
}
