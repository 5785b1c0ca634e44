//! Game session: players, rounds, cumulative scores, and termination.
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use thiserror::Error;

use crate::PlayerIo;
use crate::config::{ConfigError, FinishRule, GameConfig};
use crate::roller::DiceSupply;
use crate::seed::RollStreams;
use crate::turn::play_turn;

/// One completed turn as kept in the session log. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: String,
    pub duration: Duration,
}

/// Cumulative score of every player at the end of one round, in
/// registration order. Used only for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// 1-based round index.
    pub round: u32,
    pub totals: Vec<u32>,
}

/// Final result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub winner: String,
    pub winning_score: u32,
    pub rounds: u32,
    /// `(player, cumulative score)` in registration order.
    pub standings: Vec<(String, u32)>,
}

/// Roster or configuration problems caught before play starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("at least one player is required")]
    NoPlayers,
    #[error("player names must not be blank")]
    BlankName,
    #[error("duplicate player name: {0}")]
    DuplicateName(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One game from setup to winner. Owns the score table, the turn log, the
/// round history, and the per-player dice supply; turns and rounds mutate it
/// through `&mut self` rather than any ambient state.
#[derive(Debug, Clone)]
pub struct GameSession<S = RollStreams> {
    players: Vec<String>,
    scores: HashMap<String, u32>,
    turn_log: Vec<TurnRecord>,
    history: Vec<RoundSnapshot>,
    supply: S,
    cfg: GameConfig,
    rounds_played: u32,
    seed: u64,
}

impl GameSession<RollStreams> {
    /// Start a session on seeded per-player dice streams.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` for an empty roster, blank or duplicate names,
    /// or an invalid configuration.
    pub fn new(players: Vec<String>, seed: u64, cfg: GameConfig) -> Result<Self, SetupError> {
        let supply = RollStreams::from_user_seed(seed, &players);
        Self::with_supply(players, supply, cfg, seed)
    }
}

impl<S: DiceSupply> GameSession<S> {
    /// Start a session on an explicit dice supply. Tests use this to force
    /// specific outcomes; [`GameSession::new`] is the production path.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` for an empty roster, blank or duplicate names,
    /// or an invalid configuration.
    pub fn with_supply(
        players: Vec<String>,
        supply: S,
        cfg: GameConfig,
        seed: u64,
    ) -> Result<Self, SetupError> {
        cfg.validate()?;
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        let mut seen = HashSet::new();
        for name in &players {
            if name.trim().is_empty() {
                return Err(SetupError::BlankName);
            }
            if !seen.insert(name.as_str()) {
                return Err(SetupError::DuplicateName(name.clone()));
            }
        }
        let scores = players.iter().map(|name| (name.clone(), 0)).collect();
        Ok(Self {
            players,
            scores,
            turn_log: Vec::new(),
            history: Vec::new(),
            supply,
            cfg,
            rounds_played: 0,
            seed,
        })
    }

    /// Registered players in turn order.
    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Seed the session was started with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.cfg
    }

    /// One player's cumulative score.
    #[must_use]
    pub fn score(&self, player: &str) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    /// `(player, cumulative score)` pairs in registration order.
    #[must_use]
    pub fn standings(&self) -> Vec<(String, u32)> {
        self.players
            .iter()
            .map(|name| (name.clone(), self.score(name)))
            .collect()
    }

    /// Every completed turn so far, in play order.
    #[must_use]
    pub fn turn_log(&self) -> &[TurnRecord] {
        &self.turn_log
    }

    /// Per-round cumulative score history.
    #[must_use]
    pub fn history(&self) -> &[RoundSnapshot] {
        &self.history
    }

    /// Rounds fully or partially played so far.
    #[must_use]
    pub const fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// True when any player has reached the target score.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.players
            .iter()
            .any(|name| self.score(name) >= self.cfg.target_score)
    }

    /// First player in registration order holding the maximum score. Ties
    /// resolve to the earlier registrant.
    #[must_use]
    pub fn leader(&self) -> Option<&str> {
        let mut best: Option<(&str, u32)> = None;
        for name in &self.players {
            let score = self.score(name);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((name.as_str(), score));
            }
        }
        best.map(|(name, _)| name)
    }

    /// Play one round: one turn per player in registration order.
    ///
    /// Under [`FinishRule::RoundBoundary`] every player takes their turn even
    /// when an earlier player has already reached the target this round.
    /// Under [`FinishRule::EveryTurn`] the round stops before the first turn
    /// that would follow a win. The returned snapshot always carries every
    /// player's cumulative score.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the I/O provider.
    pub fn play_round<IO>(&mut self, io: &mut IO) -> Result<RoundSnapshot, IO::Error>
    where
        IO: PlayerIo + ?Sized,
    {
        let round = self.rounds_played + 1;
        for idx in 0..self.players.len() {
            if self.cfg.finish_rule == FinishRule::EveryTurn && self.is_finished() {
                break;
            }
            let player = self.players[idx].clone();
            let turn = play_turn(&player, self.supply.source(idx), io)?;
            *self.scores.entry(player.clone()).or_default() += turn.score;
            self.turn_log.push(TurnRecord {
                player,
                duration: turn.elapsed,
            });
        }
        self.rounds_played = round;
        let snapshot = RoundSnapshot {
            round,
            totals: self.players.iter().map(|name| self.score(name)).collect(),
        };
        self.history.push(snapshot.clone());
        Ok(snapshot)
    }

    /// Run rounds until the game finishes, invoking `after_round` with the
    /// fresh snapshot after every round (scoreboard and chart in the CLI).
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the I/O provider.
    pub fn run<IO>(
        &mut self,
        io: &mut IO,
        mut after_round: impl FnMut(&Self, &RoundSnapshot),
    ) -> Result<GameSummary, IO::Error>
    where
        IO: PlayerIo + ?Sized,
    {
        while !self.is_finished() {
            let snapshot = self.play_round(io)?;
            after_round(self, &snapshot);
        }
        Ok(self.summary())
    }

    /// Summary of the game as it stands; meaningful once finished.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        let winner = self.leader().unwrap_or_default().to_string();
        GameSummary {
            winning_score: self.score(&winner),
            winner,
            rounds: self.rounds_played,
            standings: self.standings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{DiceOutcome, FixedDice};
    use crate::roller::DiceSource;
    use crate::turn::{RerollChoice, RollKind, TurnOutcome};
    use std::collections::VecDeque;
    use std::convert::Infallible;

    /// Per-player queues of scripted faces.
    struct ScriptSupply {
        per_player: Vec<VecDeque<u8>>,
    }

    impl ScriptSupply {
        fn new(faces: &[&[u8]]) -> Self {
            Self {
                per_player: faces.iter().map(|f| f.iter().copied().collect()).collect(),
            }
        }
    }

    impl DiceSource for VecDeque<u8> {
        fn roll_face(&mut self) -> u8 {
            self.pop_front().expect("scripted faces exhausted")
        }
    }

    impl DiceSupply for ScriptSupply {
        fn source(&mut self, player: usize) -> &mut dyn DiceSource {
            &mut self.per_player[player]
        }
    }

    /// Always answers "stop" and records nothing.
    struct StopIo;

    impl PlayerIo for StopIo {
        type Error = Infallible;

        fn rolling(&mut self, _player: &str) -> Result<(), Self::Error> {
            Ok(())
        }

        fn roll_revealed(
            &mut self,
            _player: &str,
            _outcome: DiceOutcome,
            _kind: RollKind,
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        fn decide_reroll(
            &mut self,
            _player: &str,
            _fixed: &FixedDice,
        ) -> Result<RerollChoice, Self::Error> {
            Ok(RerollChoice::Stop)
        }
    }

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn config(target: u32, finish_rule: FinishRule) -> GameConfig {
        GameConfig {
            target_score: target,
            finish_rule,
            roll_delay_ms: 0,
        }
    }

    #[test]
    fn setup_rejects_bad_rosters() {
        let cfg = GameConfig::default();
        assert_eq!(
            GameSession::new(Vec::new(), 1, cfg.clone()).unwrap_err(),
            SetupError::NoPlayers
        );
        assert_eq!(
            GameSession::new(roster(&["alice", "  "]), 1, cfg.clone()).unwrap_err(),
            SetupError::BlankName
        );
        assert_eq!(
            GameSession::new(roster(&["alice", "alice"]), 1, cfg).unwrap_err(),
            SetupError::DuplicateName("alice".to_string())
        );
    }

    #[test]
    fn setup_rejects_invalid_config() {
        let cfg = config(0, FinishRule::RoundBoundary);
        assert!(matches!(
            GameSession::new(roster(&["alice"]), 1, cfg),
            Err(SetupError::Config(ConfigError::TargetScore))
        ));
    }

    #[test]
    fn round_accumulates_scores_and_history() {
        // alice settles (6, 6, 1) = 13, bob settles (2, 3, 4) = 9.
        let supply = ScriptSupply::new(&[&[6, 6, 1], &[2, 3, 4]]);
        let mut session = GameSession::with_supply(
            roster(&["alice", "bob"]),
            supply,
            config(100, FinishRule::RoundBoundary),
            0,
        )
        .unwrap();

        let snapshot = session.play_round(&mut StopIo).unwrap();
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.totals, vec![13, 9]);
        assert_eq!(session.score("alice"), 13);
        assert_eq!(session.score("bob"), 9);
        assert_eq!(session.turn_log().len(), 2);
        assert_eq!(session.turn_log()[0].player, "alice");
        assert_eq!(session.history(), &[snapshot]);
        assert!(!session.is_finished());
    }

    #[test]
    fn later_player_still_plays_after_target_reached_same_round() {
        // Target 10: alice settles 13 on her turn; under the round-boundary
        // rule bob's turn still runs before the game is declared over.
        let supply = ScriptSupply::new(&[&[6, 6, 1], &[2, 3, 4]]);
        let mut session = GameSession::with_supply(
            roster(&["alice", "bob"]),
            supply,
            config(10, FinishRule::RoundBoundary),
            0,
        )
        .unwrap();

        let snapshot = session.play_round(&mut StopIo).unwrap();
        assert_eq!(snapshot.totals, vec![13, 9]);
        assert_eq!(session.turn_log().len(), 2, "bob's turn must execute");
        assert!(session.is_finished());
        assert_eq!(session.leader(), Some("alice"));
    }

    #[test]
    fn every_turn_rule_cuts_the_round_short() {
        let supply = ScriptSupply::new(&[&[6, 6, 1], &[2, 3, 4]]);
        let mut session = GameSession::with_supply(
            roster(&["alice", "bob"]),
            supply,
            config(10, FinishRule::EveryTurn),
            0,
        )
        .unwrap();

        let snapshot = session.play_round(&mut StopIo).unwrap();
        assert_eq!(snapshot.totals, vec![13, 0], "bob never rolled");
        assert_eq!(session.turn_log().len(), 1);
        assert!(session.is_finished());
    }

    #[test]
    fn tie_resolves_to_first_registrant() {
        // Both reach exactly 12; alice registered first and wins.
        let supply = ScriptSupply::new(&[&[6, 5, 1], &[4, 5, 3]]);
        let mut session = GameSession::with_supply(
            roster(&["alice", "bob"]),
            supply,
            config(12, FinishRule::RoundBoundary),
            0,
        )
        .unwrap();

        session.play_round(&mut StopIo).unwrap();
        assert!(session.is_finished());
        let summary = session.summary();
        assert_eq!(summary.winner, "alice");
        assert_eq!(summary.winning_score, 12);
    }

    #[test]
    fn run_reports_after_every_round() {
        // Round 1: 9 + 6; round 2: alice tuple-out (0), bob 12 -> 18 >= 15.
        let supply = ScriptSupply::new(&[&[2, 3, 4, 1, 1, 1], &[1, 2, 3, 6, 2, 4]]);
        let mut session = GameSession::with_supply(
            roster(&["alice", "bob"]),
            supply,
            config(15, FinishRule::RoundBoundary),
            0,
        )
        .unwrap();

        let mut seen_rounds = Vec::new();
        let summary = session
            .run(&mut StopIo, |_, snapshot| seen_rounds.push(snapshot.round))
            .unwrap();

        assert_eq!(seen_rounds, vec![1, 2]);
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.winner, "bob");
        assert_eq!(summary.winning_score, 18);
        assert_eq!(session.score("alice"), 9, "tuple-out adds nothing");
    }

    #[test]
    fn scores_never_decrease() {
        // Round scores: alice 9, 0 (tuple out), 12; bob 6, 12, 0 (tuple out).
        let supply =
            ScriptSupply::new(&[&[2, 3, 4, 1, 1, 1, 5, 5, 2], &[1, 2, 3, 6, 2, 4, 3, 3, 3]]);
        let mut session = GameSession::with_supply(
            roster(&["alice", "bob"]),
            supply,
            config(20, FinishRule::RoundBoundary),
            0,
        )
        .unwrap();
        session
            .run(&mut StopIo, |session, snapshot| {
                let previous = session.history().len().checked_sub(2);
                if let Some(prev_idx) = previous {
                    let earlier = &session.history()[prev_idx];
                    for (before, after) in earlier.totals.iter().zip(&snapshot.totals) {
                        assert!(after >= before);
                    }
                }
            })
            .unwrap();
    }
}
