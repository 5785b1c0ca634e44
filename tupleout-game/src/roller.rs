//! Dice-source seam between the turn machine and its randomness.
//!
//! The turn controller never talks to an RNG directly; it draws faces through
//! [`DiceSource`] so sessions can run on seeded streams and tests on scripted
//! faces.

use crate::constants::DICE_PER_ROLL;
use crate::dice::{DiceOutcome, FixedDice};

/// Supplier of individual die faces.
///
/// `roll` and `reroll` are derived from `roll_face`, so an implementation
/// only has to answer "what does the next die show?".
pub trait DiceSource {
    /// Draw one uniformly distributed face in `[1, DIE_SIDES]`.
    fn roll_face(&mut self) -> u8;

    /// Throw a complete outcome.
    fn roll(&mut self) -> DiceOutcome {
        let mut faces = [0u8; DICE_PER_ROLL];
        for face in &mut faces {
            *face = self.roll_face();
        }
        DiceOutcome::new(faces)
    }

    /// Throw again, keeping every position whose value is fixed and
    /// redrawing each remaining position independently.
    fn reroll(&mut self, current: DiceOutcome, fixed: &FixedDice) -> DiceOutcome {
        let mut faces = current.faces();
        for face in &mut faces {
            if !fixed.contains(face) {
                *face = self.roll_face();
            }
        }
        DiceOutcome::new(faces)
    }
}

/// Hands each registered player their own dice source.
///
/// The production implementation is [`crate::seed::RollStreams`]; tests
/// substitute scripted supplies to force specific outcomes.
pub trait DiceSupply {
    /// Dice source for the player at the given registration index.
    ///
    /// # Panics
    ///
    /// Implementations may panic when the index is outside the registered
    /// player range.
    fn source(&mut self, player: usize) -> &mut dyn DiceSource;
}
