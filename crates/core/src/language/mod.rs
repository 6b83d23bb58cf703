//! Phonetic layer: pronouncing dictionaries, stress patterns, rhyme keys.

pub mod dictionary;
pub mod meter;
pub mod rhyme_key;

pub use dictionary::{PhoneticDict, Pronunciation};
pub use meter::{encode_meter, meter_compatible, word_meter};
pub use rhyme_key::{RhymeIndex, RhymeResolver};
