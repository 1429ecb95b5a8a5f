//! Chat-completions client for OpenAI-compatible providers.
//!
//! OpenAI and DeepSeek speak the same `/chat/completions` wire format, so a
//! single client covers both; the presets differ only in base URL and model
//! name. The base URL is injectable for tests.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use rankrover_core::excerpt;

use crate::error::LlmError;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-4o";
const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
const DEEPSEEK_MODEL: &str = "deepseek-chat";

/// System prompt nudging the model toward list-style answers, which the
/// locator can assign positions within.
const SYSTEM_PROMPT: &str = "You are a helpful assistant providing information about products \
     and services. Be informative and list multiple options when appropriate.";

/// Error-body excerpt length carried into [`LlmError::Api`], in bytes.
const ERROR_BODY_LEN: usize = 200;

/// Client for one OpenAI-compatible chat-completions provider.
pub struct ChatClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    provider: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    /// Creates a client for the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn openai(api_key: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        Self::with_base_url("openai", OPENAI_BASE_URL, OPENAI_MODEL, api_key, timeout_secs)
    }

    /// Creates a client for the production DeepSeek API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn deepseek(api_key: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        Self::with_base_url(
            "deepseek",
            DEEPSEEK_BASE_URL,
            DEEPSEEK_MODEL,
            api_key,
            timeout_secs,
        )
    }

    /// Creates a client against a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        provider: &'static str,
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rankrover/0.1 (brand-visibility-tracking)")
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            provider,
        })
    }

    /// Provider label used in logs and reports.
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// Generates one answer for `prompt` and returns its text.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Http`] on network failure.
    /// - [`LlmError::Api`] on a failure status, carrying an excerpt of the
    ///   response body; the retry layer treats 5xx statuses as transient.
    /// - [`LlmError::EmptyCompletion`] when the provider returns no content.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: self.provider,
                status,
                message: excerpt(&body, ERROR_BODY_LEN),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyCompletion {
                provider: self.provider,
            })
    }
}
