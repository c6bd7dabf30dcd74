//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Only the request and response fields this crate uses are modeled.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`
#[derive(Clone, Debug, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation turns; a single user turn for our use cases
    pub contents: Vec<Content>,
    /// Optional generation settings
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Builds a single-turn text request
    #[must_use]
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
            generation_config: None,
        }
    }

    /// Requests a JSON-typed response body
    #[must_use]
    pub fn with_json_response(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
        });
        self
    }
}

/// One conversation turn
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Content {
    /// Message fragments
    pub parts: Vec<Part>,
}

/// One message fragment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Part {
    /// Plain text payload
    pub text: String,
}

/// Generation settings subset
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// MIME type the model must produce (`application/json` for
    /// structured extraction)
    pub response_mime_type: String,
}

/// Response body for `generateContent`
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates, best first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate
#[derive(Clone, Debug, Deserialize)]
pub struct Candidate {
    /// Generated content
    pub content: Content,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        Some(text)
    }
}
