//! Token pipeline for the related-product lookup.
//!
//! A product relates to another when its name shares a token with it or
//! when both sit in the same category. Names are split on whitespace and
//! single-character tokens are discarded before the match pattern is built.

/// Maximum number of related products returned by a lookup
pub const RELATED_LIMIT: i64 = 24;

/// Split a product name into match tokens.
///
/// Tokens of length <= 1 carry no signal ("a", "x", stray punctuation) and
/// are dropped. Survivors are regex-escaped so literal names can never
/// inject pattern syntax.
pub fn name_tokens(name: &str) -> Vec<String> {
    name.split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(regex::escape)
        .collect()
}

/// Build the case-insensitive alternation pattern from match tokens.
///
/// Returns `None` when no token survived filtering: an empty alternation
/// would match every name, so the caller must omit the name clause entirely
/// and fall back to category matching alone.
pub fn token_pattern(tokens: &[String]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join("|"))
    }
}
