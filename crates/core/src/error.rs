//! Typed errors for configuration and dictionary problems.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeterMapError {
    #[error("--cycle requires choice of --pos, --neg, or --neu")]
    CycleWithoutDirection,

    #[error("cycle length must be at least 1, got {0}")]
    InvalidCycleLength(usize),

    #[error("rhyme scheme must contain at least one non-whitespace label")]
    EmptyScheme,

    #[error("dictionary contains no entries")]
    EmptyDictionary,

    #[error("malformed dictionary entry on line {line}: {text:?}")]
    MalformedEntry { line: usize, text: String },

    #[error("malformed lexicon entry on line {line}: {text:?}")]
    MalformedLexiconEntry { line: usize, text: String },
}
