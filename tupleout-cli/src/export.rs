//! Flat CSV export of turn durations, written once when the game ends.
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tupleout_game::TurnRecord;

/// Quote a field when it would break the row.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render the turn log as `player,duration_secs` rows.
///
/// # Errors
///
/// Returns an error when the writer fails.
pub fn render_csv<W: Write>(out: &mut W, records: &[TurnRecord]) -> std::io::Result<()> {
    writeln!(out, "player,duration_secs")?;
    for record in records {
        writeln!(
            out,
            "{},{:.3}",
            csv_field(&record.player),
            record.duration.as_secs_f64()
        )?;
    }
    Ok(())
}

/// Write the turn log to `path`, truncating any previous run's file.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub fn write_turn_log(path: &Path, records: &[TurnRecord]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    render_csv(&mut writer, records)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    log::debug!("wrote {} turn records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(player: &str, millis: u64) -> TurnRecord {
        TurnRecord {
            player: player.to_string(),
            duration: Duration::from_millis(millis),
        }
    }

    #[test]
    fn renders_header_and_rows() {
        let mut buffer = Vec::new();
        let records = vec![record("Alice", 1250), record("Bob", 980)];
        render_csv(&mut buffer, &records).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv, "player,duration_secs\nAlice,1.250\nBob,0.980\n");
    }

    #[test]
    fn empty_log_renders_header_only() {
        let mut buffer = Vec::new();
        render_csv(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "player,duration_secs\n");
    }

    #[test]
    fn awkward_names_are_quoted() {
        let mut buffer = Vec::new();
        render_csv(&mut buffer, &[record("Bonnie, \"the Boss\"", 500)]).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.contains("\"Bonnie, \"\"the Boss\"\"\",0.500"));
    }

    #[test]
    fn write_truncates_previous_runs() {
        let path = std::env::temp_dir().join("tupleout-turn-durations.csv");
        write_turn_log(&path, &[record("Alice", 1000), record("Bob", 2000)]).unwrap();
        write_turn_log(&path, &[record("Carol", 1500)]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "player,duration_secs\nCarol,1.500\n");
    }
}
