//! Error types for the Gemini API client

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Missing `GEMINI_API_KEY` environment variable
    #[error("Missing GEMINI_API_KEY environment variable")]
    MissingApiKey,

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Response contained no generated text
    #[error("Response contained no candidates")]
    EmptyResponse,
}
