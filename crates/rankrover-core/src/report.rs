//! Aggregated statistics for one tracking run.

use serde::Serialize;

use crate::lexicon::Sentiment;
use crate::locator::LocateResult;

/// One query/prompt outcome within a tracking run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRecord {
    /// The query or prompt that produced the scanned document.
    pub query: String,
    pub position: Option<u32>,
    pub sentiment: Sentiment,
    /// Leading excerpt of the scanned document, for display.
    pub snippet: Option<String>,
    pub debug_info: String,
}

impl SearchRecord {
    /// Build a record from a locator outcome.
    #[must_use]
    pub fn from_locate(
        query: impl Into<String>,
        outcome: LocateResult,
        snippet: Option<String>,
    ) -> Self {
        Self {
            query: query.into(),
            position: outcome.position,
            sentiment: outcome.sentiment,
            snippet,
            debug_info: outcome.debug_info,
        }
    }

    /// Placeholder for a failed upstream call: the run continues and the
    /// failure travels in `debug_info` instead of aborting the batch.
    #[must_use]
    pub fn failed(query: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            query: query.into(),
            position: None,
            sentiment: Sentiment::Neutral,
            snippet: None,
            debug_info: format!("request failed: {error}"),
        }
    }
}

/// Per-sentiment tallies over found mentions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// Aggregated statistics for one tracking run.
#[derive(Debug, Clone, Serialize)]
pub struct TrackReport {
    /// Arithmetic mean over found positions; `None` when nothing was found.
    pub average_position: Option<f64>,
    pub search_count: usize,
    pub found_count: usize,
    /// Sentiment tallies; only found mentions are counted.
    pub sentiment_counts: SentimentCounts,
    pub searches: Vec<SearchRecord>,
}

impl TrackReport {
    /// Aggregate per-document outcomes into a run report.
    #[must_use]
    pub fn from_records(searches: Vec<SearchRecord>) -> Self {
        let mut found_count = 0usize;
        let mut position_sum = 0.0f64;
        let mut sentiment_counts = SentimentCounts::default();

        for record in &searches {
            if let Some(position) = record.position {
                found_count += 1;
                position_sum += f64::from(position);
                match record.sentiment {
                    Sentiment::Positive => sentiment_counts.positive += 1,
                    Sentiment::Neutral => sentiment_counts.neutral += 1,
                    Sentiment::Negative => sentiment_counts.negative += 1,
                }
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let average_position = if found_count == 0 {
            None
        } else {
            Some(position_sum / found_count as f64)
        };

        Self {
            average_position,
            search_count: searches.len(),
            found_count,
            sentiment_counts,
            searches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(query: &str, position: Option<u32>, sentiment: Sentiment) -> SearchRecord {
        SearchRecord {
            query: query.to_string(),
            position,
            sentiment,
            snippet: None,
            debug_info: String::new(),
        }
    }

    #[test]
    fn averages_only_found_positions() {
        let report = TrackReport::from_records(vec![
            record("a", Some(2), Sentiment::Positive),
            record("b", None, Sentiment::Neutral),
            record("c", Some(4), Sentiment::Neutral),
        ]);
        assert_eq!(report.average_position, Some(3.0));
        assert_eq!(report.search_count, 3);
        assert_eq!(report.found_count, 2);
    }

    #[test]
    fn no_found_positions_means_no_average() {
        let report = TrackReport::from_records(vec![
            record("a", None, Sentiment::Neutral),
            record("b", None, Sentiment::Neutral),
        ]);
        assert_eq!(report.average_position, None);
        assert_eq!(report.found_count, 0);
    }

    #[test]
    fn empty_run_is_all_zero() {
        let report = TrackReport::from_records(vec![]);
        assert_eq!(report.search_count, 0);
        assert_eq!(report.found_count, 0);
        assert_eq!(report.average_position, None);
        assert_eq!(report.sentiment_counts, SentimentCounts::default());
    }

    #[test]
    fn sentiment_counts_skip_not_found_records() {
        let report = TrackReport::from_records(vec![
            record("a", Some(1), Sentiment::Positive),
            record("b", Some(3), Sentiment::Negative),
            // Not found: its neutral sentiment must not be tallied.
            record("c", None, Sentiment::Neutral),
        ]);
        assert_eq!(report.sentiment_counts.positive, 1);
        assert_eq!(report.sentiment_counts.negative, 1);
        assert_eq!(report.sentiment_counts.neutral, 0);
    }

    #[test]
    fn failed_record_is_neutral_with_error_in_debug_info() {
        let rec = SearchRecord::failed("best widgets", "connection refused");
        assert_eq!(rec.position, None);
        assert_eq!(rec.sentiment, Sentiment::Neutral);
        assert!(rec.debug_info.contains("connection refused"));
    }

    #[test]
    fn report_serializes_with_lowercase_sentiments() {
        let report = TrackReport::from_records(vec![record("a", Some(1), Sentiment::Positive)]);
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["searches"][0]["sentiment"], "positive");
        assert_eq!(json["average_position"], 1.0);
        assert_eq!(json["sentiment_counts"]["positive"], 1);
    }
}
