//! Game-wide constants shared by the core crate and its front-ends.

/// Number of dice rolled on every throw.
pub const DICE_PER_ROLL: usize = 3;

/// Faces on each die; rolls are uniform in `[1, DIE_SIDES]`.
pub const DIE_SIDES: u8 = 6;

/// Occurrence count that marks a die value as fixed for re-rolls.
pub const FIXED_PAIR_COUNT: usize = 2;

/// Default cumulative score a player must reach to end the game.
pub const DEFAULT_TARGET_SCORE: u32 = 50;

/// Default pause before a roll is revealed, in milliseconds.
pub const DEFAULT_ROLL_DELAY_MS: u64 = 1000;

/// Upper bound accepted for the roll-reveal pause.
pub const MAX_ROLL_DELAY_MS: u64 = 60_000;
