use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::ModerationGate;
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MODERATIONS_PATH: &str = "/v1/moderations";
pub const DEFAULT_MODERATION_MODEL: &str = "omni-moderation-latest";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Minimal subset of the moderation response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    results: Vec<ModerationResult>,
}

#[derive(Deserialize)]
struct ModerationResult {
    flagged: bool,
}

/// HTTP client for the OpenAI moderations endpoint.
///
/// Implements [`ModerationGate`]. Errors are reported faithfully; the
/// pipeline decides that they are advisory. The underlying client carries a
/// generous transport timeout; the caller races the call against its own
/// 2-second budget, and the losing branch is simply abandoned.
pub struct OpenAiModeration {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiModeration {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), MODERATIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }
}

#[async_trait]
impl ModerationGate for OpenAiModeration {
    async fn flagged(&self, text: &str) -> Result<bool, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::moderation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiModeration: API returned {status}: {body}");
            return Err(DomainError::moderation(format!("API returned {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::moderation(format!("failed to parse response: {e}")))?;

        Ok(api_response
            .results
            .into_iter()
            .next()
            .map(|r| r.flagged)
            .unwrap_or(false))
    }
}
