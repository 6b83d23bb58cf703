//! Pick one corpus line per target meter under a sentiment policy.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::policy::{scaled_index, Direction, Policy, SonnetSlice};
use super::sentiment::SentimentScorer;
use crate::corpus::{CorpusIndex, CorpusLine};

/// Width of the sonnet sentiment slices.
const SONNET_LINES: usize = 14;

impl AsRef<str> for CorpusLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Applies a `Policy` to candidate buckets.
pub struct Selector<'a> {
    policy: Policy,
    scorer: &'a dyn SentimentScorer,
}

impl<'a> Selector<'a> {
    pub fn new(policy: Policy, scorer: &'a dyn SentimentScorer) -> Self {
        Self { policy, scorer }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn score(&self, text: &str) -> f64 {
        self.scorer.polarity(text)
    }

    /// Choose a candidate for target position `i` of `s` matched targets.
    ///
    /// Returns `None` only when `candidates` is empty.
    pub fn pick<'c, T, R>(&self, candidates: &'c [T], i: usize, s: usize, rng: &mut R) -> Option<&'c T>
    where
        T: AsRef<str>,
        R: Rng + ?Sized,
    {
        if candidates.is_empty() {
            return None;
        }
        let last_pos = s.saturating_sub(1) as f64;

        let pick = match self.policy {
            Policy::Uniform => candidates.choose(rng)?,
            Policy::Pos => self.extreme(candidates, Ordering::Greater),
            Policy::Neg => self.extreme(candidates, Ordering::Less),
            Policy::Neu => {
                let sorted = self.ascending(candidates);
                sorted[sorted.len() / 2]
            }
            Policy::Rise => {
                let sorted = self.ascending(candidates);
                let top = (sorted.len() - 1) as f64;
                sorted[scaled_index(i as f64, (0.0, last_pos), (0.0, top), sorted.len())]
            }
            Policy::Fall => {
                let sorted = self.ascending(candidates);
                let top = (sorted.len() - 1) as f64;
                sorted[scaled_index(i as f64, (0.0, last_pos), (top, 0.0), sorted.len())]
            }
            Policy::Cycle { direction, length } => {
                let sorted = self.ascending(candidates);
                sorted[cycle_index(direction, length, i, sorted.len())]
            }
            Policy::MaxLikelihood => self.weighted(candidates, rng)?,
            Policy::Sonnet(slice) => self.sonnet(candidates, slice, i),
        };
        Some(pick)
    }

    /// First candidate with the greatest (or least) score.
    fn extreme<'c, T: AsRef<str>>(&self, candidates: &'c [T], want: Ordering) -> &'c T {
        let mut best = &candidates[0];
        let mut best_score = self.score(best.as_ref());
        for cand in &candidates[1..] {
            let score = self.score(cand.as_ref());
            if score.partial_cmp(&best_score) == Some(want) {
                best = cand;
                best_score = score;
            }
        }
        best
    }

    /// Candidates in stable ascending sentiment order.
    fn ascending<'c, T: AsRef<str>>(&self, candidates: &'c [T]) -> Vec<&'c T> {
        let mut scored: Vec<(f64, &'c T)> = candidates
            .iter()
            .map(|c| (self.score(c.as_ref()), c))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(_, c)| c).collect()
    }

    /// Candidates in stable descending sentiment order; ties keep bucket order.
    fn descending<'c, T: AsRef<str>>(&self, candidates: &'c [T]) -> Vec<&'c T> {
        let mut scored: Vec<(f64, &'c T)> = candidates
            .iter()
            .map(|c| (self.score(c.as_ref()), c))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(_, c)| c).collect()
    }

    /// Draw weighted by absolute polarity, uniform when every weight is zero.
    fn weighted<'c, T, R>(&self, candidates: &'c [T], rng: &mut R) -> Option<&'c T>
    where
        T: AsRef<str>,
        R: Rng + ?Sized,
    {
        let weights: Vec<f64> = candidates
            .iter()
            .map(|c| self.score(c.as_ref()).abs())
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return candidates.choose(rng);
        }

        let mut remaining = rng.gen::<f64>() * total;
        for (cand, weight) in candidates.iter().zip(&weights) {
            remaining -= weight;
            if remaining <= 0.0 {
                return Some(cand);
            }
        }
        candidates.choose(rng)
    }

    fn sonnet<'c, T: AsRef<str>>(&self, candidates: &'c [T], slice: Option<SonnetSlice>, i: usize) -> &'c T {
        let Some(slice) = slice else {
            return &candidates[i % candidates.len()];
        };
        let sorted = self.ascending(candidates);
        let len = sorted.len();
        let pool: Vec<&'c T> = match slice {
            SonnetSlice::Top => sorted[len.saturating_sub(SONNET_LINES)..].to_vec(),
            SonnetSlice::Bottom => sorted[..=SONNET_LINES.min(len - 1)].iter().rev().copied().collect(),
            SonnetSlice::Ascending => sorted[..SONNET_LINES.min(len)].to_vec(),
            SonnetSlice::Descending => {
                let mut desc = self.descending(candidates);
                desc.truncate(SONNET_LINES);
                desc
            }
        };
        pool[(i % SONNET_LINES) % pool.len()]
    }
}

/// Index into an ascending list of `len` for position `i` of a cycle.
fn cycle_index(direction: Direction, length: usize, i: usize, len: usize) -> usize {
    let length = length.max(1);
    let pos = (i % length) as f64;
    let last_pos = (length - 1) as f64;
    let top = len.saturating_sub(1) as f64;
    match direction {
        Direction::Pos => scaled_index(pos, (0.0, last_pos), (0.0, top), len),
        Direction::Neg => scaled_index(pos, (0.0, last_pos), (top, 0.0), len),
        Direction::Neu => {
            let mid = last_pos / 2.0;
            if pos <= mid {
                scaled_index(pos, (0.0, mid), (0.0, top), len)
            } else {
                scaled_index(pos, (mid, last_pos), (top, 0.0), len)
            }
        }
    }
}

/// A corpus line chosen for one target line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedLine {
    /// Position of the target line in the target poem.
    pub target_index: usize,
    pub meter: String,
    pub text: String,
    pub tokens: Vec<String>,
    pub sentiment: f64,
}

/// Select one line per matchable target meter.
///
/// Targets with an empty pattern or no bucket are dropped before positions
/// are assigned, so `s` counts only the surviving targets.
pub fn select_lines<R: Rng + ?Sized>(
    targets: &[String],
    index: &CorpusIndex,
    selector: &Selector<'_>,
    rng: &mut R,
) -> Vec<SelectedLine> {
    let matched: Vec<(usize, &String)> = targets
        .iter()
        .enumerate()
        .filter(|(_, meter)| index.has_bucket(meter))
        .collect();
    let s = matched.len();
    if s < targets.len() {
        log::info!("Dropped {} target lines with no matching meter", targets.len() - s);
    }

    let mut selected = Vec::with_capacity(s);
    for (i, (target_index, meter)) in matched.into_iter().enumerate() {
        let bucket = index.bucket(meter);
        let Some(line) = selector.pick(&bucket, i, s, rng) else {
            continue;
        };
        log::debug!("Target {} [{}]: {}", target_index, meter, line.text);
        selected.push(SelectedLine {
            target_index,
            meter: meter.clone(),
            text: line.text.clone(),
            tokens: line.tokens.clone(),
            sentiment: selector.score(&line.text),
        });
    }
    selected
}
