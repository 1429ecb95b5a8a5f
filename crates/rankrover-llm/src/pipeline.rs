//! Chat-tracking pipeline over OpenAI-compatible providers.
//!
//! Selects shuffled prompt variations for the keyword, generates one answer
//! per prompt, runs the brand locator over each answer, and aggregates the
//! outcomes. A failed generation becomes a placeholder record carrying the
//! error text, so one upstream failure never aborts the run — the pipeline
//! itself is infallible.

use rand::Rng;

use rankrover_core::{excerpt, locate, SearchRecord, TrackReport};

use crate::client::ChatClient;
use crate::prompts::select_prompts;
use crate::retry::retry_with_backoff;

/// Display snippet length in run results, in bytes.
const SNIPPET_LEN: usize = 200;

/// Tuning knobs for one tracking run.
#[derive(Debug, Clone, Copy)]
pub struct TrackingOptions {
    /// Prompts to generate answers for.
    pub count: usize,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for TrackingOptions {
    fn default() -> Self {
        Self {
            count: 20,
            max_retries: 3,
            backoff_base_ms: 300,
        }
    }
}

/// Run one chat-tracking pass for `brand` under `keyword`.
pub async fn run_chat_tracking<R: Rng + ?Sized>(
    client: &ChatClient,
    keyword: &str,
    brand: &str,
    options: TrackingOptions,
    rng: &mut R,
) -> TrackReport {
    let prompts = select_prompts(keyword, options.count, rng);
    tracing::info!(
        provider = client.provider(),
        keyword,
        brand,
        prompts = prompts.len(),
        "starting chat tracking run"
    );

    let mut records = Vec::with_capacity(prompts.len());
    for prompt in prompts {
        let completion = retry_with_backoff(options.max_retries, options.backoff_base_ms, || {
            client.complete(&prompt)
        })
        .await;

        match completion {
            Ok(text) => {
                let outcome = locate(&text, brand);
                let snippet = Some(excerpt(&text, SNIPPET_LEN));
                records.push(SearchRecord::from_locate(prompt, outcome, snippet));
            }
            Err(e) => {
                tracing::warn!(prompt = %prompt, error = %e, "chat completion failed");
                records.push(SearchRecord::failed(prompt, e));
            }
        }
    }

    let report = TrackReport::from_records(records);
    tracing::info!(
        provider = client.provider(),
        searches = report.search_count,
        found = report.found_count,
        average_position = report.average_position,
        "chat tracking run complete"
    );
    report
}
