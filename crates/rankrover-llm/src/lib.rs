//! Chat-completion clients and the LLM answer-tracking pipeline.
//!
//! One OpenAI-compatible client serves both OpenAI and DeepSeek; the
//! pipeline probes a keyword with shuffled prompt variations and reports
//! where (and in what light) the brand shows up in the answers.

pub mod client;
pub mod error;
pub mod pipeline;
pub mod prompts;

mod retry;

pub use client::ChatClient;
pub use error::LlmError;
pub use pipeline::{run_chat_tracking, TrackingOptions};
