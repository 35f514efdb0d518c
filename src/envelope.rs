//! Response envelope: locating the generated text inside a `generateContent` response.

use crate::error::GenerationError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Extract `candidates[0].content.parts[0].text` from a raw response body.
pub fn extract_text(body: &str) -> Result<String, GenerationError> {
    let envelope: ResponseEnvelope = serde_json::from_str(body).map_err(|e| {
        let what = if e.is_data() {
            "unexpected response shape"
        } else {
            "response is not valid JSON"
        };
        GenerationError::EnvelopeShape(format!("{}: {}", what, e))
    })?;

    let candidate = envelope
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::EnvelopeShape("no candidates in response".to_string()))?;

    let finish_reason = candidate.finish_reason;
    let missing = |what: &str| {
        let reason = finish_reason
            .as_deref()
            .map(|r| format!(" (finish reason: {})", r))
            .unwrap_or_default();
        GenerationError::EnvelopeShape(format!("{}{}", what, reason))
    };

    let part = candidate
        .content
        .and_then(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| missing("candidate has no content parts"))?;

    part.text.ok_or_else(|| missing("first content part has no text"))
}
