//! Shared test utilities for integration tests
//!
//! Scripted transports, response envelopes, and environment isolation.

use async_trait::async_trait;
use lectern::provider::GenerationTransport;
use lectern::{GenerationError, GenerationRequest};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use tempfile::TempDir;
use tokio::time::Instant;

/// One scripted transport outcome.
#[derive(Debug, Clone)]
pub enum Step {
    /// Non-success HTTP status
    Status(u16),
    /// Network-level failure (no status)
    Network,
    /// Successful response with this raw body
    Body(String),
}

/// Transport that replays a fixed script and records when each call happened.
///
/// Once the script is exhausted the last step repeats.
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    last: Mutex<Option<Step>>,
    calls: Mutex<Vec<Instant>>,
    instructions: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            instructions: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }

    pub fn instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }

    fn next_step(&self) -> Step {
        let mut steps = self.steps.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(step) = steps.pop_front() {
            *last = Some(step.clone());
            return step;
        }
        last.clone().expect("scripted transport has no steps")
    }
}

#[async_trait]
impl GenerationTransport for ScriptedTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(Instant::now());
        self.instructions
            .lock()
            .unwrap()
            .push(request.instruction_text.clone());

        match self.next_step() {
            Step::Status(status) => Err(GenerationError::Transport {
                status: Some(status),
                message: "scripted failure".to_string(),
            }),
            Step::Network => Err(GenerationError::Transport {
                status: None,
                message: "connection reset".to_string(),
            }),
            Step::Body(body) => Ok(body),
        }
    }

    fn target(&self) -> String {
        "scripted".to_string()
    }
}

/// Wrap generated text in a `generateContent` response envelope.
pub fn envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

/// Successful step carrying `text` as the generated payload.
pub fn body_step(text: &str) -> Step {
    Step::Body(envelope(text))
}

pub const MINIMAL_PLAN: &str = r#"{"title":"T","learning_objectives":[],"slides":[],"quiz":[],"homework":{"title":"H","description":"D"}}"#;

pub const MISSING_HOMEWORK_PLAN: &str =
    r#"{"title":"T","learning_objectives":[],"slides":[],"quiz":[]}"#;

/// A complete plan as a model would return it.
pub fn full_plan_json() -> String {
    json!({
        "title": "Journey of a Raindrop",
        "learning_objectives": [
            "Explain evaporation and condensation",
            "Describe precipitation types",
            "Diagram the water cycle"
        ],
        "slides": [
            { "title": "What is the water cycle?", "content": "- Continuous movement of water\n- Driven by the sun" },
            { "title": "Evaporation", "content": "- Liquid to vapor\n- Oceans supply most vapor" },
            { "title": "Condensation", "content": "- Vapor cools\n- Clouds form" },
            { "title": "Precipitation", "content": "- Rain\n- Snow\n- Hail" },
            { "title": "Collection", "content": "- Rivers and lakes\n- Groundwater" }
        ],
        "quiz": [
            {
                "question": "What powers the water cycle?",
                "options": ["The moon", "The sun", "Volcanoes", "Wind"],
                "answer": "The sun"
            }
        ],
        "homework": {
            "title": "Water cycle diary",
            "description": "Record the weather for a week and link it to the water cycle."
        }
    })
    .to_string()
}

static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with XDG_CONFIG_HOME pointing into `test_dir`, restoring it afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::var_os("XDG_CONFIG_HOME");

    let config_home = test_dir.path().join("config");
    std::fs::create_dir_all(&config_home).unwrap();
    std::env::set_var("XDG_CONFIG_HOME", &config_home);

    let result = f();

    match original {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    result
}
