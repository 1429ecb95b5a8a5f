//! Search query variation generation.

use rand::seq::SliceRandom;
use rand::Rng;

/// Suffixes appended to the keyword so repeated runs hit distinct result
/// pages. Shuffled per run.
const SEARCH_VARIATIONS: &[&str] = &[
    " guide",
    " information",
    " review",
    " tutorial",
    " best practices",
    " how to",
    " what is",
    " examples",
    " tips",
    " services",
    " company",
    " near me",
    " local",
    " professional",
    " cost",
    " price",
    " comparison",
    " vs competitors",
    " benefits",
    " advantages",
    " top rated",
    " best in",
    " affordable",
    " quality",
    " reliable",
    " experienced",
    " certified",
    " licensed",
    " recommended",
    " popular",
    " trusted",
    " expert",
    " specialized",
    " emergency",
    " same day",
    " 24 hour",
    " residential",
    " commercial",
    " industrial",
];

/// Build up to `limit` queries for `keyword`.
///
/// The bare keyword always comes first; shuffled suffix variations follow.
/// The RNG is injected so tests can pin the selection with a seeded
/// generator.
#[must_use]
pub fn build_queries<R: Rng + ?Sized>(keyword: &str, limit: usize, rng: &mut R) -> Vec<String> {
    let mut variations: Vec<&str> = SEARCH_VARIATIONS.to_vec();
    variations.shuffle(rng);

    std::iter::once(keyword.to_string())
        .chain(
            variations
                .into_iter()
                .map(|suffix| format!("{keyword}{suffix}")),
        )
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn bare_keyword_comes_first() {
        let mut rng = StdRng::seed_from_u64(1);
        let queries = build_queries("plumber", 5, &mut rng);
        assert_eq!(queries.len(), 5);
        assert_eq!(queries[0], "plumber");
    }

    #[test]
    fn variations_are_keyword_prefixed() {
        let mut rng = StdRng::seed_from_u64(2);
        let queries = build_queries("plumber", 10, &mut rng);
        assert!(queries[1..].iter().all(|q| q.starts_with("plumber ")));
    }

    #[test]
    fn seeded_rng_pins_the_selection() {
        let a = build_queries("plumber", 8, &mut StdRng::seed_from_u64(42));
        let b = build_queries("plumber", 8, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn limit_caps_at_available_variations() {
        let mut rng = StdRng::seed_from_u64(3);
        let queries = build_queries("plumber", 1_000, &mut rng);
        assert_eq!(queries.len(), SEARCH_VARIATIONS.len() + 1);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(build_queries("plumber", 0, &mut rng).is_empty());
    }
}
