//! Sentiment scoring seam.
//!
//! The engine only needs a polarity in `[-1, 1]` for a piece of text. Any
//! closure `Fn(&str) -> f64` works; `LexiconScorer` is the built-in scorer.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::MeterMapError;
use crate::text::tokenize;

const DEFAULT_LEXICON: &str = include_str!("sentiment_lexicon.tsv");

/// Largest magnitude in an AFINN-style lexicon.
const VALENCE_SCALE: f64 = 5.0;

/// Scores text polarity in `[-1, 1]`.
pub trait SentimentScorer: Send + Sync {
    /// Scorer name for logs.
    fn name(&self) -> &str;

    fn polarity(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Mean valence of the lexicon words found in the text.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    valence: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Parse `word<TAB>integer` lines; `#` starts a comment line.
    pub fn from_tsv_str(data: &str) -> Result<Self> {
        let mut valence = HashMap::new();
        for (line_no, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = || MeterMapError::MalformedLexiconEntry {
                line: line_no + 1,
                text: line.to_string(),
            };
            let (word, score) = line.rsplit_once('\t').ok_or_else(malformed)?;
            let score: f64 = score.trim().parse().map_err(|_| malformed())?;
            valence.insert(word.trim().to_lowercase(), score / VALENCE_SCALE);
        }
        if valence.is_empty() {
            return Err(MeterMapError::EmptyDictionary.into());
        }
        Ok(Self { valence })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sentiment lexicon: {}", path.display()))?;
        let scorer = Self::from_tsv_str(&data)
            .with_context(|| format!("Invalid sentiment lexicon: {}", path.display()))?;
        log::info!("Loaded {} lexicon words from {}", scorer.len(), path.display());
        Ok(scorer)
    }

    pub fn len(&self) -> usize {
        self.valence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valence.is_empty()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::from_tsv_str(DEFAULT_LEXICON).unwrap_or_else(|_| Self {
            valence: HashMap::new(),
        })
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> f64 {
        let scores: Vec<f64> = tokenize(text)
            .iter()
            .filter_map(|t| self.valence.get(t).copied())
            .collect();
        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}
