//! Collaborator trait implementations with boundary fallbacks.
//!
//! Failures never propagate into the core: extraction degrades to an
//! empty list, drafting and insights to literal fallback strings. The
//! user re-triggers the action; nothing is retried.

use chrono::NaiveDate;
use futures::future::BoxFuture;
use submanager_core::environment::{AccountExtractor, InsightSummarizer, MessageDrafter};
use submanager_core::types::{Account, Client, ExtractedAccount};

use crate::client::GeminiClient;

/// Returned when drafting fails
pub const DRAFT_FALLBACK: &str = "Could not generate message.";

/// Returned when the insight summary fails
pub const INSIGHT_FALLBACK: &str = "No insights available.";

impl AccountExtractor for GeminiClient {
    fn extract(&self, text: String, today: NaiveDate) -> BoxFuture<'static, Vec<ExtractedAccount>> {
        let client = self.clone();
        Box::pin(async move {
            match client.parse_master_accounts(&text, today).await {
                Ok(descriptors) => descriptors,
                Err(e) => {
                    tracing::warn!(error = %e, "account extraction failed");
                    Vec::new()
                }
            }
        })
    }
}

impl MessageDrafter for GeminiClient {
    fn draft(
        &self,
        client: Client,
        service_name: String,
        expiry_date: NaiveDate,
    ) -> BoxFuture<'static, String> {
        let gemini = self.clone();
        Box::pin(async move {
            match gemini
                .draft_renewal_message(&client, &service_name, expiry_date)
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(error = %e, "renewal message drafting failed");
                    DRAFT_FALLBACK.to_string()
                }
            }
        })
    }
}

impl InsightSummarizer for GeminiClient {
    fn summarize(
        &self,
        accounts: Vec<Account>,
        clients: Vec<Client>,
    ) -> BoxFuture<'static, String> {
        let gemini = self.clone();
        Box::pin(async move {
            match gemini.business_insights(&accounts, &clients).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(error = %e, "insight summary failed");
                    INSIGHT_FALLBACK.to_string()
                }
            }
        })
    }
}
