//! End-word substitution for rhyme, and scheme-driven stanza layout.

pub mod remap;
pub mod stanza;

pub use remap::{RemapResult, Remapper, SubstitutionCandidate};
pub use stanza::{expand_scheme, rearrange, rhyme_groups};
