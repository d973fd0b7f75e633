//! Lexical Tokenizer: normalizes text and extracts significant keywords.

use std::collections::BTreeSet;

/// Set of lowercase, punctuation-stripped keywords. Ordered so reports serialize stably.
pub type KeywordSet = BTreeSet<String>;

/// Tokens of this many characters or fewer are discarded.
pub const MIN_TOKEN_LEN: usize = 2;

/// Common English function words ignored by keyword extraction.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of", "on",
    "or", "to", "the", "with", "you", "your", "our", "we", "will", "was", "were", "has", "have",
    "had", "this", "that", "these", "those", "their", "they", "them", "its", "not", "but", "all",
    "any", "can", "who", "what", "when", "where", "which", "how", "been", "also", "into", "than",
    "then", "there", "about", "such", "each", "etc",
];

/// Lowercases and replaces every character outside `[a-z0-9+]` with a space.
/// `+` survives so "c++" stays one token.
pub fn clean(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

fn is_significant(token: &str) -> bool {
    token.len() > MIN_TOKEN_LEN && !STOP_WORDS.contains(&token)
}

/// Significant tokens in order of appearance, repeats included.
pub fn terms(text: &str) -> Vec<String> {
    clean(text)
        .split_whitespace()
        .filter(|t| is_significant(t))
        .map(String::from)
        .collect()
}

/// Extracts the keyword set of `text`.
pub fn extract_keywords(text: &str) -> KeywordSet {
    terms(text).into_iter().collect()
}
