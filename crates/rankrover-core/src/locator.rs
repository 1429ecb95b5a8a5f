//! Brand mention locator.
//!
//! Scans a document for a brand name, reports the 1-based ordinal of the
//! first block containing it, and classifies the sentiment of the local
//! window around the mention. Pure and infallible: every odd input resolves
//! to a not-found/neutral result rather than an error.

use serde::Serialize;

use crate::blocks::{split_blocks, Block};
use crate::lexicon::{sentiment_around, Sentiment};

/// Maximum excerpt length carried in `debug_info`, in bytes.
const EXCERPT_LEN: usize = 100;

/// Outcome of scanning one document for a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocateResult {
    /// 1-based ordinal of the first block containing the brand, in document
    /// order; `None` when the brand does not appear.
    pub position: Option<u32>,
    /// Polarity of the window around the mention; neutral when not found.
    pub sentiment: Sentiment,
    /// Human-readable match summary. Diagnostics only, not a stable contract.
    pub debug_info: String,
}

/// Locate `brand` inside free text and classify the surrounding sentiment.
///
/// The brand is trimmed and lowercased; the comparison is case-insensitive
/// substring containment. Blocks (paragraphs and list items, see
/// [`split_blocks`]) are visited strictly in document order with a running
/// 1-based ordinal, and scanning stops at the first block that contains the
/// brand. When the whole document contains the brand but no single block
/// does (the match straddles a boundary the splitter does not recognize),
/// the result falls back to position 1 rather than not-found.
///
/// A brand that is empty after trimming is invalid input and always yields
/// not-found, never the trivially-true empty-substring match.
#[must_use]
pub fn locate(document: &str, brand: &str) -> LocateResult {
    let needle = brand.trim().to_lowercase();
    if needle.is_empty() {
        return empty_brand();
    }
    if !document.to_lowercase().contains(&needle) {
        return not_found(brand);
    }
    scan_blocks(&split_blocks(document), &needle)
        .unwrap_or_else(|| localization_fallback(document, &needle))
}

/// Locate `brand` inside caller-supplied structured blocks.
///
/// Same contract as [`locate`], but the caller has already segmented the
/// content — paragraph snippets, list entries, and reference citations from
/// an answer payload. The fallback check runs over the concatenated block
/// texts.
#[must_use]
pub fn locate_in_blocks(blocks: &[Block], brand: &str) -> LocateResult {
    let needle = brand.trim().to_lowercase();
    if needle.is_empty() {
        return empty_brand();
    }
    if let Some(result) = scan_blocks(blocks, &needle) {
        return result;
    }
    let joined = blocks
        .iter()
        .map(|b| b.text().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.to_lowercase().contains(&needle) {
        localization_fallback(&joined, &needle)
    } else {
        not_found(brand)
    }
}

/// First block containing `needle` wins; the ordinal counts every visited
/// block whether or not it matched.
fn scan_blocks(blocks: &[Block], needle: &str) -> Option<LocateResult> {
    let mut ordinal: u32 = 0;
    for block in blocks {
        ordinal += 1;
        let text = block.text();
        if text.to_lowercase().contains(needle) {
            let sentiment = sentiment_around(&text, needle);
            return Some(LocateResult {
                position: Some(ordinal),
                sentiment,
                debug_info: format!(
                    "found in {} {} with {} sentiment: \"{}\"",
                    block.kind(),
                    ordinal,
                    sentiment,
                    excerpt(&text, EXCERPT_LEN)
                ),
            });
        }
    }
    None
}

fn localization_fallback(text: &str, needle: &str) -> LocateResult {
    let sentiment = sentiment_around(text, needle);
    LocateResult {
        position: Some(1),
        sentiment,
        debug_info: format!(
            "brand found with {sentiment} sentiment but no single block contained it; \
             defaulting to position 1"
        ),
    }
}

fn not_found(brand: &str) -> LocateResult {
    LocateResult {
        position: None,
        sentiment: Sentiment::Neutral,
        debug_info: format!("brand \"{brand}\" not found in document"),
    }
}

fn empty_brand() -> LocateResult {
    LocateResult {
        position: None,
        sentiment: Sentiment::Neutral,
        debug_info: "brand is empty after trimming; treated as never found".to_string(),
    }
}

/// Leading excerpt of at most `max_len` bytes on a char boundary,
/// ellipsized when truncated.
#[must_use]
pub fn excerpt(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= max_len {
        return trimmed.to_string();
    }
    let mut end = max_len;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
