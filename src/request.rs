//! Request builder: turns lesson parameters into a schema-constrained generation request.

use crate::error::GenerationError;
use crate::schema::{lesson_plan_schema, SchemaNode};
use serde::{Deserialize, Serialize};

/// Grade level used when the caller does not name one.
pub const DEFAULT_GRADE_LEVEL: &str = "High School";

/// Caller-supplied lesson parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonParams {
    pub topic: String,
    pub grade_level: String,
    pub subject: String,
}

impl LessonParams {
    pub fn new(
        topic: impl Into<String>,
        grade_level: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            grade_level: grade_level.into(),
            subject: subject.into(),
        }
    }

    /// Reject blank topic or subject. A blank grade level falls back to the default
    /// when the request is built.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.topic.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "topic must not be empty".to_string(),
            ));
        }
        if self.subject.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "subject must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Instruction text plus the schema the response must follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub instruction_text: String,
    pub output_schema: SchemaNode,
}

/// Build the generation request for a lesson.
///
/// Pure and deterministic. It does not validate its input: blank topic or subject
/// produce a meaningless instruction, so call [`LessonParams::validate`] first.
pub fn build_request(params: &LessonParams) -> GenerationRequest {
    GenerationRequest {
        instruction_text: build_instruction(params),
        output_schema: lesson_plan_schema().clone(),
    }
}

fn build_instruction(params: &LessonParams) -> String {
    let grade_level = match params.grade_level.trim() {
        "" => DEFAULT_GRADE_LEVEL,
        level => level,
    };

    format!(
        "Create a lesson plan for a {grade} {subject} class on the topic \"{topic}\".\n\
         The lesson plan must include:\n\
         1. A concise, engaging title.\n\
         2. 3-4 clear learning objectives.\n\
         3. 5-7 slides, each with a title and bulleted content (one bullet per line, starting with \"- \").\n\
         4. A 5-question multiple-choice quiz. Each question has exactly 4 options and one correct answer; \
         the answer must repeat the text of the correct option.\n\
         5. One homework assignment with a title and a description.\n\
         Respond only with JSON matching the provided schema.",
        grade = grade_level,
        subject = params.subject.trim(),
        topic = params.topic.trim(),
    )
}

impl GenerationRequest {
    /// Wire body for the `generateContent` endpoint.
    pub fn to_body(&self) -> RequestBody<'_> {
        RequestBody {
            contents: vec![Content {
                parts: vec![Part {
                    text: &self.instruction_text,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &self.output_schema,
            },
        }
    }
}

/// Serialized request body. Borrows from its [`GenerationRequest`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody<'a> {
    pub contents: Vec<Content<'a>>,
    pub generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig<'a> {
    pub response_mime_type: &'static str,
    pub response_schema: &'a SchemaNode,
}
