//! SerpAPI client and the Google AI Overview tracking pipeline.
//!
//! Expands a keyword into shuffled query variations, collects AI Overview
//! documents from SerpAPI, locates the brand in each, and aggregates a
//! per-run report.

pub mod client;
pub mod error;
pub mod pipeline;
pub mod queries;
pub mod types;

mod retry;

pub use client::SerpApiClient;
pub use error::SerpApiError;
pub use pipeline::{run_search_tracking, TrackingOptions};
