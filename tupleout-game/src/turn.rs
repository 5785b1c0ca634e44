//! Single-turn state machine: roll, evaluate, decide, re-roll, settle.
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::PlayerIo;
use crate::dice::{DiceOutcome, FixedDice};
use crate::roller::DiceSource;

/// Player's answer to the re-roll prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RerollChoice {
    /// Redraw every non-fixed die and evaluate again.
    Reroll,
    /// Settle the turn on the current outcome.
    Stop,
}

/// Whether a revealed outcome came from the opening throw or a re-roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    Initial,
    Reroll,
}

/// How a turn reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEnding {
    /// All dice matched; the turn scores zero.
    TupleOut,
    /// The player stopped re-rolling; the turn scores the final sum.
    Settled,
}

/// Result of one completed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub ending: TurnEnding,
    /// Zero on tuple-out, otherwise the sum of the final outcome.
    pub score: u32,
    pub final_roll: DiceOutcome,
    /// Total throws taken, the opening roll included.
    pub rolls: u32,
    /// Wall-clock time from turn start to terminal state.
    pub elapsed: Duration,
}

/// What an outcome forces before the player gets a say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Terminal: every die matched.
    TupleOut,
    /// The player decides whether to re-roll around these fixed dice.
    Decide(FixedDice),
}

/// Pure evaluation step of the turn machine.
#[must_use]
pub fn evaluate(outcome: DiceOutcome) -> Evaluation {
    if outcome.is_tuple_out() {
        Evaluation::TupleOut
    } else {
        Evaluation::Decide(outcome.fixed_dice())
    }
}

/// Play one turn for `player`, drawing dice from `dice` and talking to the
/// player through `io`.
///
/// The machine runs Start → Evaluate → Decide → Reroll → Evaluate … until a
/// tuple-out or a stop answer; there is no cap on re-rolls. The fixed set is
/// recomputed from the current outcome on every evaluation.
///
/// # Errors
///
/// Propagates any error raised by the I/O provider.
pub fn play_turn<D, IO>(player: &str, dice: &mut D, io: &mut IO) -> Result<TurnOutcome, IO::Error>
where
    D: DiceSource + ?Sized,
    IO: PlayerIo + ?Sized,
{
    let start = Instant::now();
    io.turn_started(player)?;

    io.rolling(player)?;
    let mut outcome = dice.roll();
    io.roll_revealed(player, outcome, RollKind::Initial)?;
    let mut rolls = 1u32;

    let ending = loop {
        match evaluate(outcome) {
            Evaluation::TupleOut => break TurnEnding::TupleOut,
            Evaluation::Decide(fixed) => match io.decide_reroll(player, &fixed)? {
                RerollChoice::Stop => break TurnEnding::Settled,
                RerollChoice::Reroll => {
                    io.rolling(player)?;
                    outcome = dice.reroll(outcome, &fixed);
                    rolls += 1;
                    io.roll_revealed(player, outcome, RollKind::Reroll)?;
                }
            },
        }
    };

    let turn = TurnOutcome {
        ending,
        score: match ending {
            TurnEnding::TupleOut => 0,
            TurnEnding::Settled => outcome.sum(),
        },
        final_roll: outcome,
        rolls,
        elapsed: start.elapsed(),
    };
    io.turn_finished(player, &turn)?;
    Ok(turn)
}
