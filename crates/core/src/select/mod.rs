//! Sentiment-driven line selection.

pub mod policy;
pub mod selector;
pub mod sentiment;

pub use policy::{Direction, Policy, SonnetSlice, Trajectory};
pub use selector::{select_lines, SelectedLine, Selector};
pub use sentiment::{LexiconScorer, SentimentScorer};
