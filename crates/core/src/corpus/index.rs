//! Meter and token indices over segmented corpus lines.

use std::collections::HashMap;

use serde::Serialize;

use crate::language::{encode_meter, PhoneticDict};
use crate::text::tokenize;

/// A candidate line with its tokens and cached meter pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusLine {
    pub text: String,
    pub tokens: Vec<String>,
    pub meter: String,
}

impl CorpusLine {
    pub fn new(text: &str, dict: &PhoneticDict) -> Self {
        let tokens = tokenize(text);
        let meter = encode_meter(dict, &tokens);
        Self {
            text: text.to_string(),
            tokens,
            meter,
        }
    }
}

/// Meter pattern → lines, plus line text → tokens.
///
/// Each distinct line text is stored once, in first-seen order, and sits in
/// exactly one meter bucket. Lines whose pattern is empty are kept for token
/// lookups but never returned as candidates.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    lines: Vec<CorpusLine>,
    by_meter: HashMap<String, Vec<usize>>,
    by_text: HashMap<String, usize>,
}

impl CorpusIndex {
    pub fn build<I, S>(segments: I, dict: &PhoneticDict) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for segment in segments {
            let text = segment.as_ref();
            if index.by_text.contains_key(text) {
                continue;
            }
            let line = CorpusLine::new(text, dict);
            let id = index.lines.len();
            index.by_meter.entry(line.meter.clone()).or_default().push(id);
            index.by_text.insert(line.text.clone(), id);
            index.lines.push(line);
        }
        log::info!(
            "Indexed {} corpus lines into {} meter buckets",
            index.lines.len(),
            index.bucket_count()
        );
        index
    }

    /// Lines matching `meter`, in corpus order. Empty for the empty pattern.
    pub fn bucket(&self, meter: &str) -> Vec<&CorpusLine> {
        if meter.is_empty() {
            return Vec::new();
        }
        self.by_meter
            .get(meter)
            .map(|ids| ids.iter().map(|&id| &self.lines[id]).collect())
            .unwrap_or_default()
    }

    /// Whether `meter` is a selectable pattern with at least one line.
    pub fn has_bucket(&self, meter: &str) -> bool {
        !meter.is_empty() && self.by_meter.contains_key(meter)
    }

    /// Tokens of a previously indexed line.
    pub fn tokens(&self, text: &str) -> Option<&[String]> {
        self.by_text.get(text).map(|&id| self.lines[id].tokens.as_slice())
    }

    pub fn line(&self, text: &str) -> Option<&CorpusLine> {
        self.by_text.get(text).map(|&id| &self.lines[id])
    }

    /// All indexed lines in corpus order.
    pub fn lines(&self) -> &[CorpusLine] {
        &self.lines
    }

    /// Number of selectable (non-empty pattern) buckets.
    pub fn bucket_count(&self) -> usize {
        self.by_meter.keys().filter(|k| !k.is_empty()).count()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::fixture_dict;

    #[test]
    fn test_line_meter_cached() {
        let line = CorpusLine::new("The cat sat on the mat.", &fixture_dict());
        assert_eq!(line.tokens, vec!["the", "cat", "sat", "on", "the", "mat"]);
        assert_eq!(line.meter, "011101");
    }

    #[test]
    fn test_bucket_by_meter() {
        let index = CorpusIndex::build(
            ["The cat sat on the mat.", "I saw a cat.", "A dog sat on the log."],
            &fixture_dict(),
        );
        let bucket = index.bucket("011101");
        let texts: Vec<&str> = bucket.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["The cat sat on the mat.", "A dog sat on the log."]);
        assert_eq!(index.bucket("1101").len(), 1);
        assert!(index.bucket("0000").is_empty());
    }

    #[test]
    fn test_duplicates_indexed_once() {
        let index = CorpusIndex::build(["I saw a cat.", "I saw a cat."], &fixture_dict());
        assert_eq!(index.len(), 1);
        assert_eq!(index.bucket("1101").len(), 1);
    }

    #[test]
    fn test_every_line_in_one_bucket() {
        let segments = ["The cat sat on the mat.", "I saw a cat.", "Zzyzx qwxz.", "The dog."];
        let index = CorpusIndex::build(segments, &fixture_dict());
        let total: usize = index.by_meter.values().map(|v| v.len()).sum();
        assert_eq!(total, index.len());
    }

    #[test]
    fn test_empty_meter_not_selectable() {
        let index = CorpusIndex::build(["Zzyzx qwxz."], &fixture_dict());
        assert!(index.bucket("").is_empty());
        assert!(!index.has_bucket(""));
        assert_eq!(index.bucket_count(), 0);
        // still reachable for token lookups
        assert_eq!(index.tokens("Zzyzx qwxz.").unwrap(), ["zzyzx", "qwxz"]);
    }

    #[test]
    fn test_token_lookup_by_exact_text() {
        let index = CorpusIndex::build(["I saw a cat."], &fixture_dict());
        assert!(index.tokens("I saw a cat.").is_some());
        assert!(index.tokens("i saw a cat.").is_none());
    }
}
