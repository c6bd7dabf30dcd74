//! # SubManager AI
//!
//! Gemini-backed collaborators: free-text account extraction, renewal
//! message drafting, and business-insight summaries.
//!
//! The HTTP client lives in [`client`]; [`boundary`] adapts it to the
//! core's collaborator traits, converting every failure into the safe
//! fallback the core expects (empty list, fallback string).

pub mod boundary;
pub mod client;
pub mod error;
pub mod types;

pub use boundary::{DRAFT_FALLBACK, INSIGHT_FALLBACK};
pub use client::GeminiClient;
pub use error::GeminiError;
