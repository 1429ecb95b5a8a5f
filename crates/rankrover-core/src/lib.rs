//! Core domain logic for RankRover brand-visibility tracking.
//!
//! Pure, synchronous building blocks shared by the API-client crates and the
//! binaries: document decomposition into blocks, the brand locator and
//! windowed sentiment classifier, run-report aggregation, and env-driven
//! application configuration. No I/O happens in this crate.

pub mod app_config;
pub mod blocks;
pub mod config;
pub mod lexicon;
pub mod locator;
pub mod report;

pub use app_config::{AppConfig, Environment};
pub use blocks::{split_blocks, Block};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use lexicon::{classify_window, sentiment_around, Sentiment};
pub use locator::{excerpt, locate, locate_in_blocks, LocateResult};
pub use report::{SearchRecord, SentimentCounts, TrackReport};
