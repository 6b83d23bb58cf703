//! Meter-mapped poetry from prose.
//!
//! Indexes a prose corpus by stress pattern, picks lines that match the
//! meter of a target poem under a sentiment policy, and can rewrite line
//! endings so lines rhyme in a requested scheme.

pub mod corpus;
pub mod error;
pub mod finalize;
pub mod language;
pub mod pipeline;
pub mod rhyme;
pub mod select;
pub mod target;
pub mod text;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::MeterMapError;
pub use pipeline::{meter_map, MeterMapConfig, Poem, Resources};
pub use target::Target;
