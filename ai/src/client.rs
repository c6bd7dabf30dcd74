//! Gemini API client implementation

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};

use crate::{
    error::GeminiError,
    types::{GenerateContentRequest, GenerateContentResponse},
};
use submanager_core::types::{Account, Client as SubClient, ExtractedAccount};

/// Model used for all SubManager prompts
pub const MODEL: &str = "gemini-2.5-flash";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GeminiClient {
    /// Create a new client with API key from environment
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::MissingApiKey` if `GEMINI_API_KEY` is not set
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| GeminiError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Create a new client with explicit API key
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Override the API base URL (tests)
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Generate content for a single prompt
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn generate(&self, request: GenerateContentRequest) -> Result<String, GeminiError> {
        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.api_url, MODEL
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .json::<GenerateContentResponse>()
                    .await
                    .map_err(|e| GeminiError::ResponseParseFailed(e.to_string()))?;
                body.text().ok_or(GeminiError::EmptyResponse)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GeminiError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }

    /// Extract master-account descriptors from free text.
    ///
    /// The model is asked for a JSON array of partial descriptors;
    /// `today` anchors relative expiry phrases ("1 month").
    ///
    /// # Errors
    ///
    /// Returns errors for request failures or an undecodable JSON payload
    pub async fn parse_master_accounts(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<Vec<ExtractedAccount>, GeminiError> {
        let prompt = format!(
            "Extract subscription Master Account details from the text.\n\
             \n\
             Return a JSON array where each object has:\n\
             - 'serviceName' (e.g. Netflix, Spotify)\n\
             - 'email'\n\
             - 'password'\n\
             - 'expiryDate' (Master billing expiry, YYYY-MM-DD). If relative (e.g. \"1 month\"), calculate from {today}.\n\
             - 'totalSlots' (Number of slots available in this family plan. Default to 1 if not specified, 5 for Netflix Family, 6 for Spotify Family).\n\
             \n\
             Text: \"{text}\""
        );

        let raw = self
            .generate(GenerateContentRequest::from_prompt(prompt).with_json_response())
            .await?;
        serde_json::from_str(&raw).map_err(|e| GeminiError::ResponseParseFailed(e.to_string()))
    }

    /// Draft a short renewal reminder for one client lease
    ///
    /// # Errors
    ///
    /// Returns errors for request failures or an empty response
    pub async fn draft_renewal_message(
        &self,
        client: &SubClient,
        service_name: &str,
        expiry_date: NaiveDate,
    ) -> Result<String, GeminiError> {
        let prompt = format!(
            "Write a short, friendly WhatsApp renewal reminder for a client.\n\
             \n\
             Client Name: {}\n\
             Service: {service_name}\n\
             Expiry Date: {expiry_date}\n\
             \n\
             Message should be concise, mention the date, and ask if they want to renew.",
            client.name
        );

        self.generate(GenerateContentRequest::from_prompt(prompt))
            .await
    }

    /// Summarize business health over the current records
    ///
    /// # Errors
    ///
    /// Returns errors for request failures or an empty response
    pub async fn business_insights(
        &self,
        accounts: &[Account],
        clients: &[SubClient],
    ) -> Result<String, GeminiError> {
        let stats = serde_json::json!({
            "totalAccounts": accounts.len(),
            "totalClients": clients.len(),
            "slotsUsage": accounts
                .iter()
                .map(|a| format!("{}: {}/{} slots used", a.service_name, a.used_slots(), a.total_slots))
                .collect::<Vec<_>>(),
            "masterHealth": accounts
                .iter()
                .map(|a| serde_json::json!({"service": a.service_name, "status": a.status}))
                .collect::<Vec<_>>(),
        });

        let prompt = format!(
            "Analyze this subscription business data and give a 2-sentence summary of health and \
             opportunities (e.g. \"High utilization on Netflix, consider buying another family plan.\").\n\
             Data: {stats}"
        );

        self.generate(GenerateContentRequest::from_prompt(prompt))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new("test-key".to_string());
        assert_eq!(client.api_key, "test-key");
        assert_eq!(
            client.api_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn test_api_url_override() {
        let client = GeminiClient::new("k".to_string()).with_api_url("http://localhost:1");
        assert_eq!(client.api_url, "http://localhost:1");
    }
}
