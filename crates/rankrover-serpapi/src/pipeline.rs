//! Search-tracking pipeline over Google AI Overviews.
//!
//! 1. Expand the keyword into shuffled query variations.
//! 2. Fetch searches in small concurrent batches, redeeming AI Overview
//!    page tokens as they appear, until `count` documents are collected.
//! 3. Run the brand locator over each overview's blocks.
//! 4. Aggregate per-document outcomes into a [`TrackReport`].
//!
//! Individual query failures are logged and skipped so one bad request
//! never aborts the run; the run only fails when every query errored and
//! nothing was collected.

use rand::Rng;

use rankrover_core::{excerpt, locate_in_blocks, SearchRecord, TrackReport};

use crate::client::SerpApiClient;
use crate::error::SerpApiError;
use crate::queries::build_queries;
use crate::retry::retry_with_backoff;
use crate::types::AiOverview;

/// Queries issued concurrently per batch.
const BATCH_SIZE: usize = 3;
/// Try up to this many times `count` queries; not every search yields an
/// AI Overview.
const OVERSAMPLE: usize = 3;
/// Display snippet length in run results, in bytes.
const SNIPPET_LEN: usize = 100;

/// Tuning knobs for one tracking run.
#[derive(Debug, Clone, Copy)]
pub struct TrackingOptions {
    /// Documents with AI Overview data to collect.
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

/// Run one search-tracking pass for `brand` under `keyword`.
///
/// # Errors
///
/// Returns the last [`SerpApiError`] only when every query failed and no
/// document was collected; partial failures degrade to a smaller report.
pub async fn run_search_tracking<R: Rng + ?Sized>(
    client: &SerpApiClient,
    keyword: &str,
    brand: &str,
    options: TrackingOptions,
    rng: &mut R,
) -> Result<TrackReport, SerpApiError> {
    let attempt_limit = options.count.saturating_mul(OVERSAMPLE).max(1);
    let queries = build_queries(keyword, attempt_limit, rng);
    tracing::info!(
        keyword,
        brand,
        count = options.count,
        queries = queries.len(),
        "starting search tracking run"
    );

    let mut collected: Vec<(String, AiOverview)> = Vec::new();
    let mut last_error: Option<SerpApiError> = None;

    for batch in queries.chunks(BATCH_SIZE) {
        if collected.len() >= options.count {
            break;
        }

        let fetches = batch.iter().map(|query| async {
            let outcome = fetch_overview(client, query, options).await;
            (query.clone(), outcome)
        });

        for (query, outcome) in futures::future::join_all(fetches).await {
            match outcome {
                Ok(Some(overview)) => {
                    if collected.len() < options.count {
                        collected.push((query, overview));
                    }
                }
                Ok(None) => {
                    tracing::debug!(query, "no AI overview for query");
                }
                Err(e) => {
                    tracing::warn!(query, error = %e, "search query failed");
                    last_error = Some(e);
                }
            }
        }
    }

    if collected.is_empty() {
        if let Some(error) = last_error {
            return Err(error);
        }
        tracing::info!(keyword, "no AI overview results found");
        return Ok(TrackReport::from_records(Vec::new()));
    }

    let records = collected
        .into_iter()
        .map(|(query, overview)| {
            let outcome = locate_in_blocks(&overview.to_blocks(), brand);
            let snippet = overview.first_snippet().map(|s| excerpt(s, SNIPPET_LEN));
            SearchRecord::from_locate(query, outcome, snippet)
        })
        .collect();

    let report = TrackReport::from_records(records);
    tracing::info!(
        searches = report.search_count,
        found = report.found_count,
        average_position = report.average_position,
        "search tracking run complete"
    );
    Ok(report)
}

/// One query: search, then redeem the AI Overview token when present.
/// `Ok(None)` means the search succeeded but produced no overview.
async fn fetch_overview(
    client: &SerpApiClient,
    query: &str,
    options: TrackingOptions,
) -> Result<Option<AiOverview>, SerpApiError> {
    let search = retry_with_backoff(options.max_retries, options.backoff_base_ms, || {
        client.google_search(query)
    })
    .await?;

    let Some(token) = search.ai_overview.and_then(|p| p.page_token) else {
        return Ok(None);
    };

    let response = retry_with_backoff(options.max_retries, options.backoff_base_ms, || {
        client.fetch_ai_overview(&token)
    })
    .await?;

    Ok(response.ai_overview)
}
