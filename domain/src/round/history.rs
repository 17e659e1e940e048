//! Ordered round history of one team

use super::state::RoundState;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The rounds a team has completed, in order
///
/// Round numbers are contiguous from 1: [`RoundHistory::push`] only accepts
/// the next number in sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundHistory {
    rounds: Vec<RoundState>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round number the next pushed state must carry
    pub fn next_round_number(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    pub fn push(&mut self, state: RoundState) -> Result<(), DomainError> {
        if state.round_number() != self.next_round_number() {
            return Err(DomainError::InvalidRoundNumber(state.round_number()));
        }
        self.rounds.push(state);
        Ok(())
    }

    /// Replace the most recent round (used to attach its judgment)
    pub fn replace_latest(&mut self, state: RoundState) -> Result<(), DomainError> {
        match self.rounds.last_mut() {
            Some(last) if last.round_number() == state.round_number() => {
                *last = state;
                Ok(())
            }
            _ => Err(DomainError::InvalidRoundNumber(state.round_number())),
        }
    }

    pub fn latest(&self) -> Option<&RoundState> {
        self.rounds.last()
    }

    /// Best-scoring round; ties go to the earliest round
    pub fn best(&self) -> Option<&RoundState> {
        self.rounds.iter().reduce(|best, candidate| {
            if candidate.score().cmp_value(&best.score()).is_gt() {
                candidate
            } else {
                best
            }
        })
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundState> {
        self.rounds.iter()
    }

    pub fn as_slice(&self) -> &[RoundState] {
        &self.rounds
    }
}
