//! HTTP client for the SerpAPI search endpoints.
//!
//! Wraps `reqwest` with API key management and typed response
//! deserialization. SerpAPI reports application-level failures through an
//! `error` field in the JSON body; those surface as [`SerpApiError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SerpApiError;
use crate::types::{AiOverviewResponse, GoogleSearchResult};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// Client for the SerpAPI REST API.
///
/// Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpApiClient {
    /// Creates a new client pointed at the production SerpAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SerpApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, SerpApiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SerpApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SerpApiError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SerpApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rankrover/0.1 (brand-visibility-tracking)")
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| SerpApiError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs a Google search and returns its metadata plus the AI Overview
    /// pointer when Google produced one for this query.
    ///
    /// # Errors
    ///
    /// - [`SerpApiError::Api`] if the response carries an `error` field.
    /// - [`SerpApiError::Http`] on network failure or non-2xx status.
    /// - [`SerpApiError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn google_search(&self, query: &str) -> Result<GoogleSearchResult, SerpApiError> {
        let url = self.build_url(&[("engine", "google"), ("q", query)]);
        let body = self.request_json(url).await?;
        Self::check_api_error(&body)?;

        serde_json::from_value(body).map_err(|e| SerpApiError::Deserialize {
            context: format!("google search for \"{query}\""),
            source: e,
        })
    }

    /// Redeems an AI Overview page token for the full overview payload.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SerpApiClient::google_search`].
    pub async fn fetch_ai_overview(
        &self,
        page_token: &str,
    ) -> Result<AiOverviewResponse, SerpApiError> {
        let url = self.build_url(&[("engine", "google_ai_overview"), ("page_token", page_token)]);
        let body = self.request_json(url).await?;
        Self::check_api_error(&body)?;

        serde_json::from_value(body).map_err(|e| SerpApiError::Deserialize {
            context: "AI overview page".to_string(),
            source: e,
        })
    }

    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("search");
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }

    async fn request_json(&self, url: Url) -> Result<serde_json::Value, SerpApiError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    fn check_api_error(body: &serde_json::Value) -> Result<(), SerpApiError> {
        if let Some(message) = body.get("error").and_then(serde_json::Value::as_str) {
            return Err(SerpApiError::Api(message.to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_includes_params_and_api_key() {
        let client = SerpApiClient::with_base_url("k-123", 30, "https://serpapi.test/").unwrap();
        let url = client.build_url(&[("engine", "google"), ("q", "best widgets")]);
        assert_eq!(url.path(), "/search");
        let query = url.query().unwrap();
        assert!(query.contains("engine=google"));
        assert!(query.contains("q=best+widgets"));
        assert!(query.contains("api_key=k-123"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SerpApiClient::with_base_url("k", 30, "not a url");
        assert!(matches!(result, Err(SerpApiError::Api(_))));
    }

    #[test]
    fn check_api_error_surfaces_message() {
        let body = serde_json::json!({ "error": "Invalid API key" });
        let err = SerpApiClient::check_api_error(&body).unwrap_err();
        assert!(matches!(err, SerpApiError::Api(ref m) if m == "Invalid API key"));
    }
}
