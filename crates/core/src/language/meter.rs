//! Stress-pattern encoding.
//!
//! A meter pattern is a string over `{0,1}` with one digit per vowel
//! phoneme. Consonants, secondary-stress vowels (`2`) and words missing
//! from the dictionary contribute nothing.

use super::dictionary::PhoneticDict;

/// Stress digit of an ARPABET phoneme, if it is `0` or `1`.
pub fn stress_digit(phoneme: &str) -> Option<char> {
    match phoneme.chars().last() {
        Some(c @ ('0' | '1')) => Some(c),
        _ => None,
    }
}

/// Meter contribution of a single pronunciation.
pub fn pronunciation_meter(phonemes: &[String]) -> String {
    phonemes.iter().filter_map(|p| stress_digit(p)).collect()
}

/// Meter of one word, or an empty string when the word is unknown.
pub fn word_meter(dict: &PhoneticDict, word: &str) -> String {
    dict.lookup(word)
        .map(pronunciation_meter)
        .unwrap_or_default()
}

/// Concatenated meter pattern for a token sequence.
pub fn encode_meter<S: AsRef<str>>(dict: &PhoneticDict, tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| word_meter(dict, t.as_ref()))
        .collect()
}

/// Whether `candidate` can stand in for `original` without disturbing the
/// line's meter: both shorter than two syllables, or identical patterns.
pub fn meter_compatible(dict: &PhoneticDict, original: &str, candidate: &str) -> bool {
    let a = word_meter(dict, original);
    let b = word_meter(dict, candidate);
    (a.len() < 2 && b.len() < 2) || a == b
}
