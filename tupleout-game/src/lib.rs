//! Tuple Out Game Engine
//!
//! Platform-agnostic core logic for the Tuple Out dice game. This crate
//! provides the dice rules, the turn state machine, and the session loop
//! without terminals, timers, or platform-specific dependencies; front-ends
//! plug in through the [`PlayerIo`] and [`roller::DiceSource`] seams.

pub mod config;
pub mod constants;
pub mod dice;
pub mod roller;
pub mod seed;
pub mod session;
pub mod turn;

// Re-export commonly used types
pub use config::{ConfigError, FinishRule, GameConfig};
pub use dice::{DiceOutcome, FixedDice};
pub use roller::{DiceSource, DiceSupply};
pub use seed::{RollStream, RollStreams, derive_stream_seed};
pub use session::{GameSession, GameSummary, RoundSnapshot, SetupError, TurnRecord};
pub use turn::{
    Evaluation, RerollChoice, RollKind, TurnEnding, TurnOutcome, evaluate, play_turn,
};

/// Trait for abstracting player-facing input/output during a turn.
/// Platform-specific implementations should provide this; the console
/// front-end blocks on stdin and paces rolls with a sleep, test doubles
/// answer from scripts.
pub trait PlayerIo {
    type Error: std::error::Error + Send + Sync + 'static;

    /// A player's turn is starting.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot reach the player.
    fn turn_started(&mut self, player: &str) -> Result<(), Self::Error> {
        let _ = player;
        Ok(())
    }

    /// Dice are in motion. Implementations may block here to pace the roll;
    /// the core never sleeps on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot reach the player.
    fn rolling(&mut self, player: &str) -> Result<(), Self::Error>;

    /// A throw has settled.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot reach the player.
    fn roll_revealed(
        &mut self,
        player: &str,
        outcome: DiceOutcome,
        kind: RollKind,
    ) -> Result<(), Self::Error>;

    /// Report the fixed dice (possibly none) and ask whether to re-roll the
    /// rest. Called once per evaluate/decide cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn decide_reroll(
        &mut self,
        player: &str,
        fixed: &FixedDice,
    ) -> Result<RerollChoice, Self::Error>;

    /// The turn reached a terminal state.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot reach the player.
    fn turn_finished(&mut self, player: &str, turn: &TurnOutcome) -> Result<(), Self::Error> {
        let _ = (player, turn);
        Ok(())
    }
}
