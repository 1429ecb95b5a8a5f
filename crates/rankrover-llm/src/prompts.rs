//! Prompt variation generation for chat-based tracking.

use rand::seq::SliceRandom;
use rand::Rng;

/// Prompt templates probing how a model talks about a product category.
/// `{keyword}` is substituted per run.
const PROMPT_VARIATIONS: &[&str] = &[
    "What are the best {keyword} options?",
    "List top companies for {keyword}",
    "Compare {keyword} providers",
    "Who offers the best {keyword} services?",
    "Recommend {keyword} solutions",
    "What are some good {keyword} alternatives?",
    "Which {keyword} companies should I consider?",
    "What are the most popular {keyword} brands?",
    "Tell me about {keyword} companies",
    "What are reliable {keyword} services?",
    "Top rated {keyword} providers",
    "Best {keyword} companies in the market",
    "Leading {keyword} solutions",
    "Most trusted {keyword} options",
    "Affordable {keyword} services",
    "Premium {keyword} providers",
    "Industry-leading {keyword} companies",
    "Innovative {keyword} solutions",
    "Established {keyword} brands",
    "Emerging {keyword} startups",
];

/// Pick up to `count` prompts for `keyword`, shuffled by the injected RNG so
/// tests can pin the selection with a seeded generator.
#[must_use]
pub fn select_prompts<R: Rng + ?Sized>(keyword: &str, count: usize, rng: &mut R) -> Vec<String> {
    let mut variations: Vec<&str> = PROMPT_VARIATIONS.to_vec();
    variations.shuffle(rng);
    variations
        .into_iter()
        .take(count)
        .map(|template| template.replace("{keyword}", keyword))
        .collect()
}
