//! Keyword lexicons and the windowed sentiment classifier.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Positive-sentiment keywords. Lowercase, matched by substring containment.
static POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "outstanding",
    "best",
    "top",
    "superior",
    "exceptional",
    "fantastic",
    "wonderful",
    "impressive",
    "remarkable",
    "quality",
    "reliable",
    "trusted",
    "leading",
    "innovative",
    "advanced",
    "recommended",
    "popular",
    "favorite",
    "preferred",
    "premium",
    "professional",
    "expert",
    "efficient",
    "effective",
    "successful",
    "satisfied",
    "happy",
    "pleased",
    "delighted",
    "perfect",
    "ideal",
    "superb",
    "brilliant",
    "stellar",
    "terrific",
];

/// Negative-sentiment keywords. Lowercase, matched by substring containment.
static NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "awful",
    "worst",
    "inferior",
    "disappointing",
    "subpar",
    "mediocre",
    "unreliable",
    "problematic",
    "issues",
    "concerns",
    "complaints",
    "flawed",
    "defective",
    "overpriced",
    "expensive",
    "costly",
    "cheap",
    "low-quality",
    "frustrating",
    "difficult",
    "complicated",
    "confusing",
    "slow",
    "inefficient",
    "ineffective",
    "unsuccessful",
    "unsatisfied",
    "unhappy",
    "displeased",
    "disappointed",
    "avoid",
    "not recommended",
    "negative",
    "horrible",
    "useless",
];

/// Half-width of the sentiment window around a mention, in bytes.
const WINDOW: usize = 50;

/// Polarity of the text surrounding a brand mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the sentiment of the text immediately around a brand mention.
///
/// Finds the first occurrence of `brand` (trimmed, lowercased) in the
/// lowercased `text`, takes a ±50-character window clamped to the string
/// bounds, and counts which keywords from the two lexicons appear in it.
/// More positive hits than negative → [`Sentiment::Positive`]; more negative
/// → [`Sentiment::Negative`]; ties (including zero/zero) → [`Sentiment::Neutral`].
///
/// Counting is a presence check per keyword (a keyword occurring five times
/// in the window still counts once) and matching is plain substring
/// containment with no word boundaries, stemming, or negation handling
/// ("not good" counts as positive). These are intentional simplifications.
///
/// Returns [`Sentiment::Neutral`] when the brand does not occur in `text`.
#[must_use]
pub fn sentiment_around(text: &str, brand: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let needle = brand.trim().to_lowercase();
    if needle.is_empty() {
        return Sentiment::Neutral;
    }
    let Some(at) = lower.find(&needle) else {
        return Sentiment::Neutral;
    };
    classify_window(window_around(&lower, at, needle.len()))
}

/// Presence-count both lexicons over an already-lowercased window.
#[must_use]
pub fn classify_window(window: &str) -> Sentiment {
    let positive = POSITIVE_WORDS.iter().filter(|w| window.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| window.contains(*w)).count();
    match positive.cmp(&negative) {
        Ordering::Greater => Sentiment::Positive,
        Ordering::Less => Sentiment::Negative,
        Ordering::Equal => Sentiment::Neutral,
    }
}

/// Slice a ±[`WINDOW`]-byte range around the match, snapped outward to char
/// boundaries so multi-byte text never splits a code point.
fn window_around(lower: &str, at: usize, match_len: usize) -> &str {
    let mut start = at.saturating_sub(WINDOW);
    while !lower.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (at + match_len).saturating_add(WINDOW).min(lower.len());
    while !lower.is_char_boundary(end) {
        end += 1;
    }
    &lower[start..end]
}
