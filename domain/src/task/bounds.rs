//! Round bounds and the post-evaluation transition rule

use crate::core::error::DomainError;
use crate::round::exit::ExitReason;
use serde::{Deserialize, Serialize};

/// What happens after round `k` has been evaluated and persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// `k < min_rounds`: run round `k + 1` without asking the judge
    ContinueUnconditionally,
    /// `min_rounds <= k < max_rounds`: ask the judge
    Judge,
    /// `k >= max_rounds`: the team is done
    Finish(ExitReason),
}

/// `1 <= min_rounds <= max_rounds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct RoundBounds {
    min_rounds: u32,
    max_rounds: u32,
}

#[derive(Serialize, Deserialize)]
struct RawBounds {
    min_rounds: u32,
    max_rounds: u32,
}

impl RoundBounds {
    pub fn new(min_rounds: u32, max_rounds: u32) -> Result<Self, DomainError> {
        if min_rounds == 0 || min_rounds > max_rounds {
            return Err(DomainError::InvalidRoundBounds {
                min: min_rounds,
                max: max_rounds,
            });
        }
        Ok(Self {
            min_rounds,
            max_rounds,
        })
    }

    pub fn min_rounds(&self) -> u32 {
        self.min_rounds
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Transition rule after round `round` is evaluated.
    ///
    /// The max-rounds check comes first, so with `min == max` the judge is
    /// never consulted.
    pub fn next_step(&self, round: u32) -> NextStep {
        if round >= self.max_rounds {
            NextStep::Finish(ExitReason::MaxRoundsReached)
        } else if round < self.min_rounds {
            NextStep::ContinueUnconditionally
        } else {
            NextStep::Judge
        }
    }
}

impl Default for RoundBounds {
    fn default() -> Self {
        Self {
            min_rounds: 1,
            max_rounds: 3,
        }
    }
}

impl TryFrom<RawBounds> for RoundBounds {
    type Error = DomainError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        RoundBounds::new(raw.min_rounds, raw.max_rounds)
    }
}

impl From<RoundBounds> for RawBounds {
    fn from(bounds: RoundBounds) -> Self {
        RawBounds {
            min_rounds: bounds.min_rounds,
            max_rounds: bounds.max_rounds,
        }
    }
}
