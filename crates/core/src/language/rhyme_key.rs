//! Rhyme keys and the rhyme index.
//!
//! A word's rhyme key is the `_`-joined phoneme suffix starting at its last
//! primary-stressed vowel, or failing that its last unstressed vowel. Words
//! with no such vowel have an empty key and never rhyme.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::dictionary::PhoneticDict;
use super::meter::{meter_compatible, stress_digit};

/// Index into `phonemes` where the rhyme span begins.
fn rhyme_start(phonemes: &[String]) -> Option<usize> {
    let last_with = |digit: char| {
        phonemes
            .iter()
            .rposition(|p| stress_digit(p) == Some(digit))
    };
    last_with('1').or_else(|| last_with('0'))
}

/// Rhyme key of a pronunciation; empty when it has no `0`/`1` vowel.
pub fn rhyme_key(phonemes: &[String]) -> String {
    match rhyme_start(phonemes) {
        Some(start) => phonemes[start..].join("_"),
        None => String::new(),
    }
}

/// Phoneme immediately before the rhyme span, if any.
fn preceding_phoneme(phonemes: &[String]) -> Option<&str> {
    let start = rhyme_start(phonemes)?;
    start.checked_sub(1).map(|i| phonemes[i].as_str())
}

/// True unless both words have a phoneme before the rhyme span and it is the
/// same one. Rules out rhyming a word with itself or its near-homophones.
pub fn distinct_onsets(a: &[String], b: &[String]) -> bool {
    match (preceding_phoneme(a), preceding_phoneme(b)) {
        (Some(pa), Some(pb)) => pa != pb,
        _ => true,
    }
}

/// Rhyme key → words sharing it.
#[derive(Debug, Clone, Default)]
pub struct RhymeIndex {
    by_key: HashMap<String, Vec<String>>,
}

impl RhymeIndex {
    /// Build from the first pronunciation of every word, in sorted word order.
    pub fn build(dict: &PhoneticDict) -> Self {
        let mut by_key: HashMap<String, Vec<String>> = HashMap::new();
        for word in dict.sorted_words() {
            let Some(phonemes) = dict.lookup(word) else {
                continue;
            };
            let key = rhyme_key(phonemes);
            if !key.is_empty() {
                by_key.entry(key).or_default().push(word.to_string());
            }
        }
        log::debug!("Rhyme index: {} keys", by_key.len());
        Self { by_key }
    }

    /// Load a precomputed `key -> [word, ...]` JSON map.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rhyme index: {}", path.display()))?;
        let by_key: HashMap<String, Vec<String>> = serde_json::from_str(&data)
            .with_context(|| format!("Invalid rhyme index: {}", path.display()))?;
        if by_key.is_empty() {
            return Err(crate::error::MeterMapError::EmptyDictionary)
                .with_context(|| format!("Invalid rhyme index: {}", path.display()));
        }
        log::info!("Loaded {} rhyme keys from {}", by_key.len(), path.display());
        Ok(Self { by_key })
    }

    /// Words filed under `key`. The empty key has no words.
    pub fn words(&self, key: &str) -> &[String] {
        if key.is_empty() {
            return &[];
        }
        self.by_key.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Looks up rhymes for words using a rhyme index and the pronunciation
/// source it was built from, which may disagree with the meter dictionary.
#[derive(Debug, Clone, Copy)]
pub struct RhymeResolver<'a> {
    pub index: &'a RhymeIndex,
    pub pronunciations: &'a PhoneticDict,
}

impl<'a> RhymeResolver<'a> {
    pub fn new(index: &'a RhymeIndex, pronunciations: &'a PhoneticDict) -> Self {
        Self { index, pronunciations }
    }

    /// Rhyme key of `word`, empty if unknown or vowel-less.
    pub fn key_for(&self, word: &str) -> String {
        self.pronunciations
            .lookup(word)
            .map(rhyme_key)
            .unwrap_or_default()
    }

    /// Words rhyming with `word` whose pre-rhyme phoneme differs from it.
    pub fn rhymes(&self, word: &str) -> Vec<&'a str> {
        let index: &'a RhymeIndex = self.index;
        let Some(phonemes) = self.pronunciations.lookup(word) else {
            return Vec::new();
        };
        index
            .words(&rhyme_key(phonemes))
            .iter()
            .filter(|cand| match self.pronunciations.lookup(cand) {
                Some(cand_phonemes) => distinct_onsets(phonemes, cand_phonemes),
                None => true,
            })
            .map(|w| w.as_str())
            .collect()
    }

    /// Rhymes of `word` that also fit the meter slot held by `original`.
    pub fn meter_safe_rhymes(
        &self,
        meter_dict: &PhoneticDict,
        word: &str,
        original: &str,
    ) -> Vec<&'a str> {
        self.rhymes(word)
            .into_iter()
            .filter(|cand| meter_compatible(meter_dict, original, cand))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{fixture_dict, phonemes};

    #[test]
    fn test_rhyme_key_primary_stress() {
        assert_eq!(rhyme_key(&phonemes("K AE1 T")), "AE1_T");
        assert_eq!(rhyme_key(&phonemes("M AO1 R N IH0 NG")), "AO1_R_N_IH0_NG");
    }

    #[test]
    fn test_rhyme_key_falls_back_to_unstressed() {
        assert_eq!(rhyme_key(&phonemes("DH AH0")), "AH0");
        assert_eq!(rhyme_key(&phonemes("AH0 B AH0 T")), "AH0_T");
    }

    #[test]
    fn test_rhyme_key_ignores_secondary_only() {
        assert_eq!(rhyme_key(&phonemes("EY2 B")), "");
    }

    #[test]
    fn test_rhyme_key_no_vowel() {
        assert_eq!(rhyme_key(&phonemes("HH M")), "");
        assert_eq!(rhyme_key(&[]), "");
    }

    #[test]
    fn test_distinct_onsets() {
        let cat = phonemes("K AE1 T");
        let mat = phonemes("M AE1 T");
        let kat = phonemes("K AE1 T");
        let at = phonemes("AE1 T");
        assert!(distinct_onsets(&cat, &mat));
        assert!(!distinct_onsets(&cat, &kat));
        // no preceding phoneme on one side always passes
        assert!(distinct_onsets(&cat, &at));
        assert!(distinct_onsets(&at, &at));
    }

    #[test]
    fn test_index_groups_by_key() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let words = index.words("AE1_T");
        assert!(words.contains(&"cat".to_string()));
        assert!(words.contains(&"mat".to_string()));
        assert!(words.contains(&"hat".to_string()));
        // sorted insertion
        let mut sorted = words.to_vec();
        sorted.sort();
        assert_eq!(words, sorted.as_slice());
    }

    #[test]
    fn test_empty_key_has_no_words() {
        let index = RhymeIndex::build(&fixture_dict());
        assert!(index.words("").is_empty());
    }

    #[test]
    fn test_resolver_excludes_self() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let resolver = RhymeResolver::new(&index, &dict);
        let rhymes = resolver.rhymes("cat");
        assert!(rhymes.contains(&"mat"));
        assert!(rhymes.contains(&"hat"));
        assert!(!rhymes.contains(&"cat"));
    }

    #[test]
    fn test_resolver_unknown_word() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let resolver = RhymeResolver::new(&index, &dict);
        assert!(resolver.rhymes("zzyzx").is_empty());
        assert_eq!(resolver.key_for("zzyzx"), "");
    }

    #[test]
    fn test_meter_safe_rhymes_filters_syllables() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let resolver = RhymeResolver::new(&index, &dict);
        // "away" rhymes with "day" but has two syllables
        let all = resolver.rhymes("day");
        assert!(all.contains(&"away"));
        let safe = resolver.meter_safe_rhymes(&dict, "day", "dog");
        assert!(safe.contains(&"way"));
        assert!(!safe.contains(&"away"));
    }

    #[test]
    fn test_load_precomputed_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rhymes.json");
        std::fs::write(&path, r#"{"AE1_T": ["bat", "cat"]}"#).unwrap();
        let index = RhymeIndex::load(&path).unwrap();
        assert_eq!(index.words("AE1_T"), ["bat", "cat"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_load_empty_index_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rhymes.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(RhymeIndex::load(&path).is_err());
    }
}
