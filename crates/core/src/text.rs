//! Text normalization and tokenization shared by the corpus and target readers.

use regex::Regex;

lazy_static::lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"\b[\w']+\b").unwrap();
}

/// Map curly single quotes to ASCII apostrophes and drop every other
/// non-ASCII character.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .filter(|c| c.is_ascii())
        .collect()
}

/// Lowercase `text` and extract its word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}
