//! Target meters: from a poem's lines, or the built-in sonnet form.

use crate::language::{encode_meter, PhoneticDict};
use crate::text::{normalize_text, tokenize};

/// Iambic pentameter.
pub const SONNET_METER: &str = "0101010101";
pub const SONNET_LINES: usize = 14;

#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Mimic the meter of each line of this poem.
    Poem(String),
    /// Fourteen lines of iambic pentameter.
    Sonnet,
}

impl Target {
    /// One meter pattern per target line. Lines with no known words yield
    /// an empty pattern.
    pub fn meters(&self, dict: &PhoneticDict) -> Vec<String> {
        match self {
            Target::Poem(text) => normalize_text(text)
                .lines()
                .map(|line| encode_meter(dict, &tokenize(line.trim())))
                .collect(),
            Target::Sonnet => vec![SONNET_METER.to_string(); SONNET_LINES],
        }
    }

    pub fn is_sonnet(&self) -> bool {
        matches!(self, Target::Sonnet)
    }
}
