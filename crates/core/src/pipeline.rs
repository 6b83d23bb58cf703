//! End-to-end run: corpus text and target in, finalized poem out.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::corpus::{segment, BigramTable, CorpusIndex, Segmentation};
use crate::finalize::finalize;
use crate::language::{PhoneticDict, RhymeIndex, RhymeResolver};
use crate::rhyme::{expand_scheme, rearrange, Remapper};
use crate::select::{select_lines, Policy, SelectedLine, Selector, SentimentScorer};
use crate::target::Target;
use crate::text::normalize_text;

/// Options for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MeterMapConfig {
    pub segmentation: Segmentation,
    pub policy: Policy,
    /// Rewrite line endings to rhyme.
    pub rhyme: bool,
    /// Rhyme scheme such as `ABAB`; implies `rhyme`.
    pub scheme: Option<String>,
    /// RNG seed for reproducible output
    pub seed: Option<u64>,
}

/// Read-only data shared by every stage of a run.
#[derive(Clone, Copy)]
pub struct Resources<'a> {
    /// Pronunciations used for meter.
    pub dict: &'a PhoneticDict,
    /// Pronunciations the rhyme index was built from.
    pub rhyme_dict: &'a PhoneticDict,
    pub rhyme_index: &'a RhymeIndex,
    pub scorer: &'a dyn SentimentScorer,
}

/// A finished poem and how it was assembled.
#[derive(Debug, Clone, Serialize)]
pub struct Poem {
    pub lines: Vec<String>,
    /// Chosen corpus lines in target order, before rhyming.
    pub selections: Vec<SelectedLine>,
    /// Committed `(initiator, linked)` end-word swaps.
    pub swaps: Vec<(usize, usize)>,
    pub config: MeterMapConfig,
}

/// Build a poem from `corpus_text` that follows the meter of `target`.
pub fn meter_map(
    corpus_text: &str,
    target: &Target,
    resources: &Resources<'_>,
    config: &MeterMapConfig,
) -> Result<Poem> {
    if let Some(scheme) = &config.scheme {
        expand_scheme(scheme, 0)?;
    }

    let corpus = normalize_text(corpus_text);
    let segments = segment(&corpus, config.segmentation);
    log::info!("Segmented corpus into {} candidate lines", segments.len());
    let index = CorpusIndex::build(&segments, resources.dict);

    let meters = target.meters(resources.dict);
    log::info!("Target: {} lines", meters.len());

    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    log::debug!("Selecting with {:?} ({} scorer)", config.policy, resources.scorer.name());
    let selector = Selector::new(config.policy, resources.scorer);
    let selections = select_lines(&meters, &index, &selector, &mut rng);
    if selections.is_empty() {
        log::warn!("No target line matched a corpus meter");
    }

    let mut lines: Vec<String> = selections.iter().map(|s| s.text.clone()).collect();
    let mut swaps = Vec::new();

    if config.rhyme || config.scheme.is_some() {
        let bigrams = BigramTable::from_lines(index.lines());
        let resolver = RhymeResolver::new(resources.rhyme_index, resources.rhyme_dict);
        let remapper = Remapper::new(resources.dict, &bigrams, resolver);
        let tokenized: Vec<(String, Vec<String>)> = selections
            .iter()
            .map(|s| (s.text.clone(), s.tokens.clone()))
            .collect();
        let result = remapper.remap(&tokenized);
        lines = result.lines;
        swaps = result.pairs;
    }

    if let Some(scheme) = &config.scheme {
        let slots = expand_scheme(scheme, lines.len())?;
        lines = rearrange(&lines, &swaps, &slots);
    }

    Ok(Poem {
        lines: finalize(&lines),
        selections,
        swaps,
        config: config.clone(),
    })
}
