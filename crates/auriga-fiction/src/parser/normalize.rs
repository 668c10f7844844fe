//! Input normalization.

/// Filler words dropped from every command.
pub const ARTICLES: &[&str] = &["a", "an", "the"];

/// Split a line into lower-case tokens, dropping articles.
pub fn normalize(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !ARTICLES.contains(&word.as_str()))
        .collect()
}
