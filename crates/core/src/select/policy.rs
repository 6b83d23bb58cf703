//! Sentiment selection policies.

use serde::{Deserialize, Serialize};

use crate::error::MeterMapError;

/// Prevailing sentiment requested with `--pos`, `--neg` or `--neu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Pos,
    Neg,
    Neu,
}

/// Sentiment movement across the poem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trajectory {
    Rise,
    Fall,
    MaxLikelihood,
    Cycle(usize),
}

/// Which sentiment-sorted slice of the pentameter bucket a sonnet draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SonnetSlice {
    /// Last 14 of the ascending order.
    Top,
    /// Ascending order from index 14 (or the end) back down to 0.
    Bottom,
    /// First 14 of the ascending order.
    Ascending,
    /// First 14 of the descending order.
    Descending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    #[default]
    Uniform,
    Pos,
    Neg,
    Neu,
    Rise,
    Fall,
    Cycle { direction: Direction, length: usize },
    MaxLikelihood,
    Sonnet(Option<SonnetSlice>),
}

impl Policy {
    /// Resolve command-line style flags into a single policy.
    ///
    /// A trajectory outranks a bare direction; sonnet mode outranks both but
    /// still rejects a cycle without a direction.
    pub fn from_flags(
        direction: Option<Direction>,
        trajectory: Option<Trajectory>,
        sonnet: bool,
    ) -> Result<Self, MeterMapError> {
        if let Some(Trajectory::Cycle(length)) = trajectory {
            if direction.is_none() {
                return Err(MeterMapError::CycleWithoutDirection);
            }
            if length == 0 {
                return Err(MeterMapError::InvalidCycleLength(length));
            }
        }

        if sonnet {
            let slice = match (trajectory, direction) {
                (Some(Trajectory::Rise), _) => Some(SonnetSlice::Ascending),
                (Some(Trajectory::Fall), _) => Some(SonnetSlice::Descending),
                (_, Some(Direction::Pos)) => Some(SonnetSlice::Top),
                (_, Some(Direction::Neg)) => Some(SonnetSlice::Bottom),
                _ => None,
            };
            return Ok(Policy::Sonnet(slice));
        }

        let policy = match (trajectory, direction) {
            (Some(Trajectory::Rise), _) => Policy::Rise,
            (Some(Trajectory::Fall), _) => Policy::Fall,
            (Some(Trajectory::Cycle(length)), Some(direction)) => Policy::Cycle { direction, length },
            (Some(Trajectory::Cycle(_)), None) => return Err(MeterMapError::CycleWithoutDirection),
            (Some(Trajectory::MaxLikelihood), _) => Policy::MaxLikelihood,
            (None, Some(Direction::Pos)) => Policy::Pos,
            (None, Some(Direction::Neg)) => Policy::Neg,
            (None, Some(Direction::Neu)) => Policy::Neu,
            (None, None) => Policy::Uniform,
        };
        Ok(policy)
    }

    /// Whether selection draws from the random source.
    pub fn is_random(&self) -> bool {
        matches!(self, Policy::Uniform | Policy::MaxLikelihood)
    }
}

/// Linearly map `val` from `src` onto `dst`.
pub fn scale(val: f64, src: (f64, f64), dst: (f64, f64)) -> f64 {
    (val - src.0) / (src.1 - src.0) * (dst.1 - dst.0) + dst.0
}

/// `scale` truncated to an index below `len`. A degenerate source range or
/// a single-element target maps to index 0.
pub fn scaled_index(val: f64, src: (f64, f64), dst: (f64, f64), len: usize) -> usize {
    if len <= 1 || src.1 == src.0 {
        return 0;
    }
    let ix = scale(val, src, dst) as usize;
    ix.min(len - 1)
}
