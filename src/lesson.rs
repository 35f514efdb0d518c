//! Lesson plan model decoded from the model's structured output.

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};

/// A generated lesson plan.
///
/// Every field is required when decoding. Unknown fields are ignored so newer model
/// output keeps decoding, and list lengths are not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlan {
    pub title: String,
    pub learning_objectives: Vec<String>,
    pub slides: Vec<Slide>,
    pub quiz: Vec<QuizItem>,
    pub homework: Homework,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    /// Free text; usually one bullet per line.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    pub title: String,
    pub description: String,
}

impl LessonPlan {
    /// Decode a lesson plan from the JSON text embedded in a model response.
    pub fn from_json(text: &str) -> Result<Self, GenerationError> {
        serde_json::from_str(text).map_err(|e| GenerationError::Decode(e.to_string()))
    }
}

impl Slide {
    /// Split slide content into bullet points.
    ///
    /// Leading `-`, `*`, `•`, `+` markers and `1.` / `1)` numbering are stripped; blank lines
    /// are dropped. Lines without a marker are kept as-is.
    pub fn bullets(&self) -> Vec<String> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(strip_bullet_marker)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn strip_bullet_marker(line: &str) -> &str {
    for marker in ['-', '*', '•', '+'] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }

    line
}

impl QuizItem {
    /// Index of the option matching the designated answer.
    ///
    /// Matches the option text exactly (ignoring surrounding whitespace and case), then
    /// falls back to a letter label: a bare `"B"`, `"B)"` or `"B."`, or a label followed by
    /// the text of that same option (`"B) Oxygen"`).
    pub fn answer_index(&self) -> Option<usize> {
        let answer = self.answer.trim();
        if let Some(idx) = self
            .options
            .iter()
            .position(|option| option.trim().eq_ignore_ascii_case(answer))
        {
            return Some(idx);
        }

        let mut chars = answer.chars();
        let label = chars.next()?.to_ascii_uppercase();
        if !label.is_ascii_uppercase() {
            return None;
        }
        let idx = (label as u8 - b'A') as usize;
        let option = self.options.get(idx)?;

        let rest = chars.as_str();
        let after_label = match rest.strip_prefix([')', '.', ':']) {
            Some(after) => after,
            None if rest.starts_with(char::is_whitespace) => rest,
            None if rest.is_empty() => return Some(idx),
            None => return None,
        };
        let after_label = after_label.trim();
        if after_label.is_empty() || after_label.eq_ignore_ascii_case(option.trim()) {
            return Some(idx);
        }
        None
    }
}

/// Letter label for an option index (`0 -> 'A'`).
pub fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
