mod chart;
mod console;
mod export;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use console::ConsoleIo;
use tupleout_game::{FinishRule, GameConfig, GameSession, GameSummary, constants};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FinishArg {
    /// Check the target once per round; the full round always plays out
    Round,
    /// Check before every turn; the round ends as soon as someone wins
    Turn,
}

impl From<FinishArg> for FinishRule {
    fn from(value: FinishArg) -> Self {
        match value {
            FinishArg::Round => Self::RoundBoundary,
            FinishArg::Turn => Self::EveryTurn,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tupleout", version)]
#[command(about = "Tuple Out - a turn-based dice game for local players")]
struct Args {
    /// Player names (comma-separated); prompted for when omitted
    #[arg(long)]
    players: Option<String>,

    /// Target score that ends the game; prompted for when omitted
    #[arg(long)]
    target: Option<u32>,

    /// Dice seed for a replayable game; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Pause before each roll is revealed, in milliseconds
    #[arg(long, default_value_t = constants::DEFAULT_ROLL_DELAY_MS)]
    delay_ms: u64,

    /// When the target-score check runs
    #[arg(long, value_enum, default_value_t = FinishArg::Round)]
    finish: FinishArg,

    /// Path for the turn-duration CSV written when the game ends
    #[arg(long, default_value = "player_turn_durations.csv")]
    csv: PathBuf,

    /// Skip the per-round score chart
    #[arg(long)]
    no_chart: bool,

    /// Optional path for a JSON game summary written when the game ends
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    announce_banner();

    let stdin = io::stdin();
    let mut console = ConsoleIo::new(stdin.lock(), Duration::from_millis(args.delay_ms));

    let players = match &args.players {
        Some(names) => split_csv(names),
        None => console.read_players()?,
    };
    let target = match args.target {
        Some(target) => target,
        None => console.read_target()?,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("dice seed {seed}");

    let cfg = GameConfig {
        target_score: target,
        finish_rule: args.finish.into(),
        roll_delay_ms: args.delay_ms,
    };
    let mut session = GameSession::new(players, seed, cfg).context("invalid game setup")?;
    println!(
        "{}",
        format!("Target score: {target}  |  replay this game with --seed {seed}").dimmed()
    );

    let no_chart = args.no_chart;
    let summary = session.run(&mut console, |session, _snapshot| {
        print_scoreboard(session.standings());
        if !no_chart {
            print!("{}", chart::render(session.players(), session.history()));
        }
    })?;

    announce_winner(&summary);
    export::write_turn_log(&args.csv, session.turn_log())?;
    println!("Turn durations saved to '{}'.", args.csv.display());

    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Game summary saved to '{}'.", path.display());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn announce_banner() {
    println!("{}", "🎲 Welcome to the Tuple Out Dice Game!".bright_cyan().bold());
    println!("{}", "======================================".cyan());
}

fn print_scoreboard(standings: Vec<(String, u32)>) {
    println!();
    println!("{}", "Current Scores:".bold());
    for (player, score) in standings {
        println!("{player}: {score} points");
    }
    println!();
}

fn announce_winner(summary: &GameSummary) {
    println!();
    println!(
        "🏆 {}",
        format!(
            "Congratulations, {}! You won the game with {} points after {} rounds.",
            summary.winner, summary.winning_score, summary.rounds
        )
        .bright_green()
        .bold()
    );
}

fn split_csv(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}
