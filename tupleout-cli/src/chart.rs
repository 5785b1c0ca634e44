//! Terminal chart of cumulative scores across rounds, one series per player.
use colored::{ColoredString, Colorize};
use tupleout_game::RoundSnapshot;

const GLYPHS: [char; 6] = ['●', '▲', '■', '◆', '▼', '★'];

/// Plot glyph for a player, cycling when the roster outgrows the set.
#[must_use]
pub fn player_glyph(idx: usize) -> char {
    GLYPHS[idx % GLYPHS.len()]
}

fn legend_name(idx: usize, name: &str) -> ColoredString {
    match idx % 6 {
        0 => name.green(),
        1 => name.cyan(),
        2 => name.yellow(),
        3 => name.magenta(),
        4 => name.blue(),
        _ => name.red(),
    }
}

/// Render the score progression as a text chart: score levels down the left,
/// one column group per round, one glyph per player. Returns an empty string
/// when there is nothing to plot yet.
#[must_use]
pub fn render(players: &[String], history: &[RoundSnapshot]) -> String {
    if players.is_empty() || history.is_empty() {
        return String::new();
    }

    let max_score = history
        .iter()
        .flat_map(|snapshot| snapshot.totals.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);

    // Bucket scores into at most `value_rows` levels above zero.
    let value_rows: u32 = 8;
    let step = max_score.div_ceil(value_rows).max(1);
    let level_of = |score: u32| (score + step / 2) / step;
    let top_level = level_of(max_score);

    let col_w = (players.len() + 1).max(4);
    let mut out = String::new();
    out.push_str("📈 Scores over rounds\n");

    for level in (0..=top_level).rev() {
        let mut line = format!("{:>5} |", level * step);
        for snapshot in history {
            let mut slot = vec![' '; col_w];
            for (idx, &total) in snapshot.totals.iter().enumerate() {
                if level_of(total) == level && idx < col_w {
                    slot[idx] = player_glyph(idx);
                }
            }
            line.extend(slot);
        }
        line.push('\n');
        out.push_str(&line);
    }

    out.push_str("      +");
    out.push_str(&"-".repeat(col_w * history.len()));
    out.push('\n');
    out.push_str("       ");
    for snapshot in history {
        out.push_str(&format!("{:^col_w$}", snapshot.round));
    }
    out.push_str("(round)\n");

    let legend = players
        .iter()
        .enumerate()
        .map(|(idx, name)| format!("{} {}", player_glyph(idx), legend_name(idx, name)))
        .collect::<Vec<_>>()
        .join("   ");
    out.push_str("  ");
    out.push_str(&legend);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn snapshot(round: u32, totals: &[u32]) -> RoundSnapshot {
        RoundSnapshot {
            round,
            totals: totals.to_vec(),
        }
    }

    #[test]
    fn empty_history_renders_nothing() {
        assert_eq!(render(&roster(&["alice"]), &[]), "");
        assert_eq!(render(&[], &[snapshot(1, &[5])]), "");
    }

    #[test]
    fn chart_carries_axis_rounds_and_legend() {
        let players = roster(&["Alice", "Bob"]);
        let history = vec![snapshot(1, &[8, 5]), snapshot(2, &[14, 11])];
        let chart = render(&players, &history);

        assert!(chart.contains("Scores over rounds"));
        assert!(chart.contains("Alice"));
        assert!(chart.contains("Bob"));
        assert!(chart.contains("(round)"));
        assert!(chart.contains('●'));
        assert!(chart.contains('▲'));
        assert!(chart.contains("    0 |"));
    }

    #[test]
    fn top_row_label_covers_the_maximum_score() {
        let players = roster(&["Alice"]);
        let history = vec![snapshot(1, &[40])];
        let chart = render(&players, &history);
        let top_label: u32 = chart
            .lines()
            .nth(1)
            .and_then(|line| line.split('|').next())
            .and_then(|label| label.trim().parse().ok())
            .expect("top row label");
        assert!(top_label >= 40);
    }

    #[test]
    fn glyphs_cycle_for_large_rosters() {
        assert_eq!(player_glyph(0), player_glyph(6));
    }
}
