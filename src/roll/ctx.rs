use super::{error::OperationError, roller::Roller, OResult};
use crate::common::*;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// Roll budget of [`RollContext::default`].
pub const DEFAULT_MAX_ROLLS: usize = 1000;

/// Evaluation settings: where die draws come from and how many of them are allowed.
pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    pub fn max_rolls(&self) -> Option<usize> {
        self.max_rolls
    }

    /// Number of dice rolled since creation or the last [`reset`](Self::reset).
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    pub fn reset(&mut self) {
        self.rolls = 0;
    }

    fn count_rolls(&mut self, n: usize) -> OResult<()> {
        let rolls = self.rolls.saturating_add(n);
        match self.max_rolls {
            Some(max) if rolls > max => Err(OperationError::TooManyRolls { max }),
            _ => {
                self.rolls = rolls;
                Ok(())
            }
        }
    }

    /// Rolls `num` independent dice, failing up front if that would exceed the budget.
    pub fn roll(
        &mut self,
        num: usize,
        faces: NonZeroUInt,
    ) -> OResult<impl Iterator<Item = UInt> + '_> {
        self.count_rolls(num)?;
        let roller = &mut self.roller;
        Ok((0..num).map(move |_| roller.roll(faces)))
    }

    pub fn roll_one(&mut self, faces: NonZeroUInt) -> OResult<UInt> {
        self.count_rolls(1)?;
        Ok(self.roller.roll(faces))
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new_bounded(DEFAULT_MAX_ROLLS, rand::thread_rng())
    }
}
