//! Interactive console provider: setup prompts and the in-turn dialogue.
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use tupleout_game::{
    DiceOutcome, FixedDice, PlayerIo, RerollChoice, RollKind, TurnEnding, TurnOutcome,
};

/// Console-backed [`PlayerIo`] reading answers from any buffered input.
/// Generic over the reader so tests can feed a `Cursor` instead of stdin.
pub struct ConsoleIo<R> {
    input: R,
    roll_delay: Duration,
}

impl<R: BufRead> ConsoleIo<R> {
    pub fn new(input: R, roll_delay: Duration) -> Self {
        Self { input, roll_delay }
    }

    /// Print a prompt without a newline and read the trimmed answer.
    ///
    /// # Errors
    ///
    /// Returns an error when stdout or the input cannot be used.
    pub fn prompt_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    /// Prompt for the roster: a count, then one name per player. Malformed
    /// numbers are fatal.
    ///
    /// # Errors
    ///
    /// Returns an error when input fails or the count does not parse.
    pub fn read_players(&mut self) -> Result<Vec<String>> {
        let answer = self.prompt_line("Enter the number of players: ")?;
        let count: usize = answer
            .parse()
            .with_context(|| format!("player count must be a whole number, got '{answer}'"))?;
        let mut players = Vec::with_capacity(count);
        for i in 1..=count {
            players.push(self.prompt_line(&format!("Enter player {i}'s name: "))?);
        }
        Ok(players)
    }

    /// Prompt for the target score. Malformed numbers are fatal.
    ///
    /// # Errors
    ///
    /// Returns an error when input fails or the number does not parse.
    pub fn read_target(&mut self) -> Result<u32> {
        let answer = self.prompt_line("Enter the target score to win: ")?;
        answer
            .parse()
            .with_context(|| format!("target score must be a whole number, got '{answer}'"))
    }
}

/// Interpret a re-roll answer: exactly `y` (case-insensitive) re-rolls,
/// anything else stops the turn.
pub fn parse_reroll_answer(answer: &str) -> RerollChoice {
    let normalized = answer.trim().to_lowercase();
    if normalized == "y" {
        RerollChoice::Reroll
    } else {
        if !matches!(normalized.as_str(), "" | "n" | "no") {
            log::debug!("unrecognized re-roll answer {answer:?}, treating as stop");
        }
        RerollChoice::Stop
    }
}

fn render_faces(outcome: DiceOutcome) -> String {
    outcome
        .faces()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl<R: BufRead> PlayerIo for ConsoleIo<R> {
    type Error = io::Error;

    fn turn_started(&mut self, player: &str) -> Result<(), Self::Error> {
        println!();
        println!("🎲 {}", format!("{player}'s turn!").bold());
        Ok(())
    }

    fn rolling(&mut self, _player: &str) -> Result<(), Self::Error> {
        if !self.roll_delay.is_zero() {
            println!("{}", "Rolling...".dimmed());
            thread::sleep(self.roll_delay);
        }
        Ok(())
    }

    fn roll_revealed(
        &mut self,
        _player: &str,
        outcome: DiceOutcome,
        kind: RollKind,
    ) -> Result<(), Self::Error> {
        let label = match kind {
            RollKind::Initial => "Initial roll",
            RollKind::Reroll => "Re-roll result",
        };
        println!("{label}: [ {} ]", render_faces(outcome).bright_cyan().bold());
        Ok(())
    }

    fn decide_reroll(
        &mut self,
        _player: &str,
        fixed: &FixedDice,
    ) -> Result<RerollChoice, Self::Error> {
        if fixed.is_empty() {
            println!("No fixed dice.");
        } else {
            let values = fixed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!("Fixed dice: {}", values.yellow());
        }
        let answer = self.prompt_line("Re-roll the non-fixed dice? (y/n): ")?;
        Ok(parse_reroll_answer(&answer))
    }

    fn turn_finished(&mut self, player: &str, turn: &TurnOutcome) -> Result<(), Self::Error> {
        match turn.ending {
            TurnEnding::TupleOut => {
                println!("{}", "Tuple out! You score 0 points this turn.".red());
            }
            TurnEnding::Settled => {
                println!(
                    "{player} scores {} points this turn.",
                    turn.score.to_string().green().bold()
                );
            }
        }
        println!(
            "{}",
            format!("Turn duration: {:.2} seconds", turn.elapsed.as_secs_f64()).dimmed()
        );
        Ok(())
    }
}
