//! Dice outcomes and the pure evaluation rules applied to them.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{DICE_PER_ROLL, DIE_SIDES, FIXED_PAIR_COUNT};

/// Die values that appear exactly twice in the current outcome, stored
/// inline. With three dice at most one value can qualify, but the container
/// stays general so the arity constant can change without touching callers.
pub type FixedDice = SmallVec<[u8; DICE_PER_ROLL]>;

/// One settled throw of all dice. Immutable once produced; re-rolls replace
/// it wholesale with a new outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiceOutcome([u8; DICE_PER_ROLL]);

impl DiceOutcome {
    /// Wrap already-drawn faces. Faces outside `[1, DIE_SIDES]` are a bug in
    /// the producing dice source.
    #[must_use]
    pub fn new(faces: [u8; DICE_PER_ROLL]) -> Self {
        debug_assert!(faces.iter().all(|f| (1..=DIE_SIDES).contains(f)));
        Self(faces)
    }

    /// The faces in roll order.
    #[must_use]
    pub const fn faces(&self) -> [u8; DICE_PER_ROLL] {
        self.0
    }

    /// Sum of all faces; the turn score when the player settles.
    #[must_use]
    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&f| u32::from(f)).sum()
    }

    /// True when every die shows the same value, ending the turn at zero.
    #[must_use]
    pub fn is_tuple_out(&self) -> bool {
        self.0.iter().all(|&f| f == self.0[0])
    }

    /// Values occurring exactly twice, ascending. Recomputed from scratch on
    /// every evaluation; a tuple-out outcome always yields an empty set.
    #[must_use]
    pub fn fixed_dice(&self) -> FixedDice {
        let mut fixed = FixedDice::new();
        for face in 1..=DIE_SIDES {
            let count = self.0.iter().filter(|&&f| f == face).count();
            if count == FIXED_PAIR_COUNT {
                fixed.push(face);
            }
        }
        fixed
    }
}

impl std::fmt::Display for DiceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{face}")?;
        }
        write!(f, ")")
    }
}
