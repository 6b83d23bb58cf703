//! Pronouncing dictionaries keyed by lowercase word.
//!
//! Two on-disk formats are accepted:
//!
//! - cmudict text: one pronunciation per line, `WORD PH1 PH2 ...`, with
//!   variants written `WORD(2) ...`, `;;;` comment lines and optional
//!   trailing `# comment`.
//! - JSON: an object mapping each word to a list of pronunciations, each
//!   pronunciation a list of ARPABET phonemes.
//!
//! Lookups always prefer the first listed pronunciation.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::MeterMapError;

/// One pronunciation variant: ARPABET phonemes with stress digits on vowels.
pub type Pronunciation = Vec<String>;

#[derive(Debug, Clone, Default)]
pub struct PhoneticDict {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl PhoneticDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from disk, choosing the parser by file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary: {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let dict = if is_json {
            Self::from_json_str(&data)
        } else {
            Self::from_cmudict_str(&data)
        };
        let dict = dict.with_context(|| format!("Invalid dictionary: {}", path.display()))?;
        log::info!("Loaded {} dictionary words from {}", dict.len(), path.display());
        Ok(dict)
    }

    /// Parse cmudict-format text.
    pub fn from_cmudict_str(data: &str) -> Result<Self> {
        let mut dict = Self::new();
        for (line_no, line) in data.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let mut parts = line.split_whitespace();
            let word_raw = parts.next().unwrap_or_default();
            let phonemes: Pronunciation = parts.map(|s| s.to_string()).collect();
            if phonemes.is_empty() {
                return Err(MeterMapError::MalformedEntry {
                    line: line_no + 1,
                    text: line.to_string(),
                }
                .into());
            }

            // WORD(2) -> word
            let word = word_raw
                .split('(')
                .next()
                .unwrap_or(word_raw)
                .to_lowercase();
            dict.insert(&word, phonemes);
        }
        dict.ensure_not_empty()?;
        Ok(dict)
    }

    /// Parse the JSON `word -> [[phoneme, ...], ...]` format.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<Pronunciation>> =
            serde_json::from_str(data).context("Dictionary is not a word-to-pronunciations map")?;
        let mut dict = Self::new();
        for (word, variants) in raw {
            for phonemes in variants.into_iter().filter(|p| !p.is_empty()) {
                dict.insert(&word, phonemes);
            }
        }
        dict.ensure_not_empty()?;
        Ok(dict)
    }

    /// Append a pronunciation variant for `word`.
    pub fn insert(&mut self, word: &str, phonemes: Pronunciation) {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(phonemes);
    }

    /// First pronunciation of `word`, if known.
    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(word)
            .and_then(|variants| variants.first())
            .map(|p| p.as_slice())
    }

    /// All pronunciation variants of `word`.
    pub fn lookup_all(&self, word: &str) -> Option<&[Pronunciation]> {
        self.entries.get(word).map(|v| v.as_slice())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words in sorted order, for building deterministic derived indices.
    pub fn sorted_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.entries.keys().map(|w| w.as_str()).collect();
        words.sort_unstable();
        words
    }

    fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(MeterMapError::EmptyDictionary.into());
        }
        Ok(())
    }
}
