use std::collections::HashSet;

/// Words this short or shorter never count as shared ("a", "is", "of")
const MIN_SHARED_WORD_CHARS: usize = 3;

/// Multiplier applied to the raw overlap ratio so moderate overlap still scores well
pub const TEXT_SIMILARITY_BOOST: f64 = 2.0;

/// Lexical-overlap similarity between two free-text fields (0-1)
///
/// Both texts are lower-cased and split on whitespace. Every word of `text1`
/// that also appears in `text2` and has at least three characters counts as
/// shared; the count is divided by the number of distinct words across both
/// texts, boosted by [`TEXT_SIMILARITY_BOOST`] and capped at 1.
///
/// Empty input on either side scores 0.
pub fn text_relevance(text1: &str, text2: &str) -> f64 {
    if text1.is_empty() || text2.is_empty() {
        return 0.0;
    }

    let text1 = text1.to_lowercase();
    let text2 = text2.to_lowercase();
    let words1: Vec<&str> = text1.split_whitespace().collect();
    let words2: Vec<&str> = text2.split_whitespace().collect();

    let shared = words1
        .iter()
        .filter(|word| word.chars().count() >= MIN_SHARED_WORD_CHARS && words2.contains(*word))
        .count();

    let distinct: HashSet<&str> = words1.iter().chain(words2.iter()).copied().collect();
    if distinct.is_empty() {
        return 0.0;
    }

    let similarity = shared as f64 / distinct.len() as f64;
    (similarity * TEXT_SIMILARITY_BOOST).min(1.0)
}
