//! Injected dependencies for the application reducer.

use std::sync::Arc;

use submanager_core::environment::{
    AccountExtractor, Clock, InsightSummarizer, MessageDrafter, NotificationSender, RecordStore,
};

/// Environment dependencies for [`crate::AppReducer`]
#[derive(Clone)]
pub struct AppEnvironment {
    /// Calendar-date source
    pub clock: Arc<dyn Clock>,
    /// Persisted-record storage
    pub records: Arc<dyn RecordStore>,
    /// Free-text account extractor
    pub extractor: Arc<dyn AccountExtractor>,
    /// Renewal-message drafter
    pub drafter: Arc<dyn MessageDrafter>,
    /// Business-insight summarizer
    pub summarizer: Arc<dyn InsightSummarizer>,
    /// Outbound notification sender
    pub sender: Arc<dyn NotificationSender>,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        records: Arc<dyn RecordStore>,
        extractor: Arc<dyn AccountExtractor>,
        drafter: Arc<dyn MessageDrafter>,
        summarizer: Arc<dyn InsightSummarizer>,
        sender: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            clock,
            records,
            extractor,
            drafter,
            summarizer,
            sender,
        }
    }
}
