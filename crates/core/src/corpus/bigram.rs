//! Two-word context → observed successors.

use std::collections::HashMap;

use super::index::CorpusLine;

/// Successor lists keyed by the two preceding words.
///
/// Duplicates are kept, so a successor's multiplicity is its corpus
/// frequency after that context.
#[derive(Debug, Clone, Default)]
pub struct BigramTable {
    successors: HashMap<(String, String), Vec<String>>,
}

impl BigramTable {
    /// Build from a single token stream. Line breaks have no special meaning.
    pub fn from_stream(stream: &[String]) -> Self {
        let mut successors: HashMap<(String, String), Vec<String>> = HashMap::new();
        for window in stream.windows(3) {
            successors
                .entry((window[0].clone(), window[1].clone()))
                .or_default()
                .push(window[2].clone());
        }
        log::debug!("Bigram table: {} contexts", successors.len());
        Self { successors }
    }

    /// Build from corpus lines by concatenating their tokens in order.
    pub fn from_lines(lines: &[CorpusLine]) -> Self {
        let stream: Vec<String> = lines.iter().flat_map(|l| l.tokens.iter().cloned()).collect();
        Self::from_stream(&stream)
    }

    /// Every recorded successor of `(first, second)`, duplicates included.
    pub fn successors(&self, first: &str, second: &str) -> &[String] {
        self.successors
            .get(&(first.to_string(), second.to_string()))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct successors in first-seen order.
    pub fn distinct_successors(&self, first: &str, second: &str) -> Vec<&str> {
        let mut seen = Vec::new();
        for word in self.successors(first, second) {
            if !seen.contains(&word.as_str()) {
                seen.push(word.as_str());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.successors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }
}
