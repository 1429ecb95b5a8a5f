use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerpApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SerpAPI error: {0}")]
    Api(String),

    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },
}
