use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult};
use mfm_types::{CustomEmoji, InstanceHost};

/// Body shared by `/api/emojis` and the older `/api/meta`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmojisResponse {
    #[serde(default)]
    pub emojis: Vec<CustomEmoji>,
}

/// Client for the parts of the Misskey API the renderer needs
#[derive(Clone)]
pub struct MisskeyClient {
    client: Client,
    base_url: String,
}

impl MisskeyClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client for `https://<instance>`
    pub fn for_instance(instance: &InstanceHost, timeout: Duration) -> ApiResult<Self> {
        Self::with_timeout(instance.base_url(), timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // HTML error pages from a reverse proxy carry nothing useful
            let clean_error = if error_text.contains("<html>") || error_text.contains("<!DOCTYPE") {
                format!(
                    "Server returned {} error. Please check the instance URL.",
                    status.as_u16()
                )
            } else {
                error_text
            };

            Err(ApiError::from_status(status.as_u16(), clean_error))
        }
    }

    /// Misskey endpoints are all POST with a JSON body, even for reads
    async fn post<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// The instance's custom emoji.
    ///
    /// Servers older than v13 have no `emojis` endpoint and list emoji inside `meta`
    /// instead, so a 404 falls back to that.
    pub async fn get_emojis(&self) -> ApiResult<Vec<CustomEmoji>> {
        match self.post::<EmojisResponse>("emojis").await {
            Ok(response) => Ok(response.emojis),
            Err(ApiError::NotFound(_)) => {
                tracing::debug!(base_url = %self.base_url, "emojis endpoint missing, using meta");
                let meta: EmojisResponse = self.post("meta").await?;
                Ok(meta.emojis)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimmed() {
        let client = MisskeyClient::new("https://example.social/");
        assert_eq!(client.base_url(), "https://example.social");
    }

    #[test]
    fn test_for_instance() {
        let host = InstanceHost::parse("Example.Social").unwrap();
        let client = MisskeyClient::for_instance(&host, Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://example.social");
    }

    #[test]
    fn test_emojis_response_parsing() {
        let body = r#"{
            "emojis": [
                {"name": "blob", "url": "https://example.social/blob.png", "category": null, "aliases": ["b"]},
                {"id": "9x", "name": "party", "host": null, "url": "https://example.social/party.gif", "category": "fun"}
            ]
        }"#;
        let response: EmojisResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.emojis.len(), 2);
        assert_eq!(response.emojis[0].category, None);
        assert_eq!(response.emojis[0].aliases, vec!["b"]);
        assert_eq!(response.emojis[1].category.as_deref(), Some("fun"));
        assert!(response.emojis[1].aliases.is_empty());
    }

    #[test]
    fn test_meta_without_emojis() {
        let response: EmojisResponse =
            serde_json::from_str(r#"{"name": "Example", "version": "12.119.0"}"#).unwrap();
        assert!(response.emojis.is_empty());
    }
}
