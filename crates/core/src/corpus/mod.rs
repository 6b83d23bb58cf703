//! Corpus segmentation, meter indexing, and the bigram continuation table.

pub mod bigram;
pub mod index;
pub mod segment;

pub use bigram::BigramTable;
pub use index::{CorpusIndex, CorpusLine};
pub use segment::{segment, Segmentation};
