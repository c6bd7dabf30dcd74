//! Dependency traits injected into reducers.
//!
//! Every ambient dependency of the core is abstracted behind a trait so
//! tests can substitute deterministic implementations: the current date,
//! the record store, and the four external collaborators (free-text
//! extractor, message drafter, insight summarizer, notification sender).
//!
//! Collaborator methods return [`BoxFuture`]s and are infallible by
//! contract: implementations convert failures into safe fallback values at
//! the boundary (empty list, a literal fallback string, `false`). Nothing
//! is retried.

use chrono::NaiveDate;
use futures::future::BoxFuture;
use thiserror::Error;

use crate::types::{Account, Client, ExtractedAccount, TelegramConfig};

/// Abstracts "today" for deterministic tests.
///
/// The core works at calendar-day granularity; no component reads wall
/// clock time directly.
pub trait Clock: Send + Sync {
    /// Current calendar date
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system time (UTC)
#[derive(Clone, Copy, Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}

/// Test clock pinned to a fixed date
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Errors surfaced by a [`RecordStore`] implementation
#[derive(Debug, Error)]
pub enum RecordError {
    /// Underlying storage I/O failed
    #[error("record store i/o failed: {0}")]
    Io(String),

    /// A persisted blob could not be encoded or decoded
    #[error("record serialization failed: {0}")]
    Serialization(String),
}

/// Keyed JSON blob storage partitioning the persisted entity graph
pub mod keys {
    /// Master accounts partition
    pub const ACCOUNTS: &str = "accounts";
    /// Clients partition
    pub const CLIENTS: &str = "clients";
    /// Service definitions partition
    pub const SERVICES: &str = "services";
    /// Notification settings partition
    pub const SETTINGS: &str = "settings";
}

/// Persisted-record storage collaborator.
///
/// Must round-trip the full entity graph losslessly, including `null`
/// expiry/client fields and ISO calendar dates (`YYYY-MM-DD`).
pub trait RecordStore: Send + Sync {
    /// Loads the blob stored under `key`, `None` if absent
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the backing storage fails or holds an
    /// undecodable blob.
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, RecordError>;

    /// Stores `value` under `key`, replacing any previous blob
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the backing storage fails.
    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), RecordError>;
}

/// Free-text account extractor collaborator.
///
/// Output is untrusted; acceptance rules live in the reducer.
pub trait AccountExtractor: Send + Sync {
    /// Parses free text into partial account descriptors.
    ///
    /// `today` anchors relative dates ("1 month from now"). Failures
    /// become an empty list.
    fn extract(&self, text: String, today: NaiveDate) -> BoxFuture<'static, Vec<ExtractedAccount>>;
}

/// Renewal-message drafter collaborator.
///
/// The drafted text is used verbatim; failures become a literal
/// "could not generate" string.
pub trait MessageDrafter: Send + Sync {
    /// Drafts a renewal reminder for one client lease
    fn draft(
        &self,
        client: Client,
        service_name: String,
        expiry_date: NaiveDate,
    ) -> BoxFuture<'static, String>;
}

/// Advisory business-insight summarizer collaborator; never affects state
pub trait InsightSummarizer: Send + Sync {
    /// Summarizes the overall subscription business health
    fn summarize(
        &self,
        accounts: Vec<Account>,
        clients: Vec<Client>,
    ) -> BoxFuture<'static, String>;
}

/// Outbound notification sender collaborator.
///
/// Single attempt; `false` on any failure, never retried by the core.
pub trait NotificationSender: Send + Sync {
    /// Delivers a Markdown-formatted message to the configured destination
    fn send(&self, config: TelegramConfig, text: String) -> BoxFuture<'static, bool>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn system_clock_is_day_granular() {
        // Two reads in quick succession land on the same calendar day
        // (barring a midnight rollover between them, which re-running fixes).
        let a = SystemClock.today();
        let b = SystemClock.today();
        assert!(b.signed_duration_since(a).num_days() <= 1);
    }
}
