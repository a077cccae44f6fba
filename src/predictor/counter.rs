//! Two-bit saturating counters.

use crate::Outcome;

/// A 2-bit saturating counter used to follow the behavior of a branch.
///
/// States 0 and 1 predict not-taken, states 2 and 3 predict taken.
/// Each update moves the state one step toward the extreme matching the
/// resolved outcome, clamping at 0 and 3. See "A Study of Branch
/// Prediction Strategies" (Smith, 1981).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    /// Strongly not-taken.
    pub const MIN: u8 = 0;
    /// Strongly taken.
    pub const MAX: u8 = 3;
    /// The initial state for every counter in a fresh table.
    pub const WEAKLY_TAKEN: Self = Self(2);

    pub fn new(state: u8) -> Self {
        assert!(state <= Self::MAX);
        Self(state)
    }

    /// Return the raw state in `{0..=3}`.
    pub fn state(self) -> u8 {
        self.0
    }

    /// Return the current predicted direction.
    pub fn predict(self) -> Outcome {
        Outcome::from_bool(self.0 >= 2)
    }

    /// Move one step toward strongly taken.
    pub fn strengthen_taken(&mut self) {
        if self.0 < Self::MAX {
            self.0 += 1;
        }
    }

    /// Move one step toward strongly not-taken.
    pub fn strengthen_not_taken(&mut self) {
        if self.0 > Self::MIN {
            self.0 -= 1;
        }
    }

    /// Update the state of the counter with a resolved outcome.
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.strengthen_taken(),
            Outcome::N => self.strengthen_not_taken(),
        }
    }
}

impl Default for SaturatingCounter {
    fn default() -> Self {
        Self::WEAKLY_TAKEN
    }
}
