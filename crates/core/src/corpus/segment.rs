//! Split raw corpus text into candidate lines.

use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    /// Full sentences, possibly joined by `,;:`, ending in `.?!`.
    static ref SENTENCE_RE: Regex =
        Regex::new(r#"[A-Za-z\-'"\s,;:]+[.?!][\s'"]"#).unwrap();

    /// Shorter clauses ending in any sentence or clause punctuation.
    static ref CLAUSE_RE: Regex =
        Regex::new(r#"[A-Za-z\-'"\s]+[.?!,;:][\s'"]"#).unwrap();

    static ref LEADING_WORD_RE: Regex = Regex::new(r"^\w").unwrap();
}

/// How corpus text is cut into candidate lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segmentation {
    /// Every non-empty text line is a candidate.
    Lines,
    /// Sentences first, then clauses.
    #[default]
    Sentences,
}

/// Segment normalized corpus text into candidate lines, in scan order.
pub fn segment(text: &str, mode: Segmentation) -> Vec<String> {
    match mode {
        Segmentation::Lines => text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        Segmentation::Sentences => {
            let mut spans = matching_spans(&SENTENCE_RE, text);
            let sentences = spans.len();
            spans.extend(matching_spans(&CLAUSE_RE, text));
            log::debug!(
                "Segmented {} sentences and {} clauses",
                sentences,
                spans.len() - sentences
            );
            spans
        }
    }
}

/// Trimmed matches of `re` whose raw span starts with a word character.
fn matching_spans(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text)
        .map(|m| m.as_str())
        .filter(|span| LEADING_WORD_RE.is_match(span))
        .map(|span| span.trim().to_string())
        .collect()
}
