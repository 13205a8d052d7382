use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Client for the AI-summary webhook.
///
/// The webhook reads the minute's PDF, writes the generated summary into
/// the minute's `summary` column and returns once done; the caller then
/// re-fetches the minute to pick up the fresh fields.
pub struct SummaryClient {
    client: reqwest::Client,
    url: String,
}

impl SummaryClient {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    pub async fn request_summary(&self, minute_id: Uuid) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "minute_id": minute_id }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Summary webhook request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Summary webhook request failed: {}", e))
            })?;

        if !response.status().is_success() {
            tracing::warn!("Summary webhook returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Summary webhook returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
