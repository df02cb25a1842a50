use crate::app_dirs::AppDirs;
use crate::drill::Summary;
use chrono::prelude::*;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Append one finished session to the results log. Creates the file (and
/// a header line) on first use. Callers treat failures as best effort.
pub fn append(summary: &Summary, word_count: usize, elapsed_secs: f64) -> io::Result<()> {
    if let Some(log_path) = AppDirs::results_log_path() {
        append_to(&log_path, summary, word_count, elapsed_secs)?;
    }

    Ok(())
}

pub fn append_to(
    log_path: &Path,
    summary: &Summary,
    word_count: usize,
    elapsed_secs: f64,
) -> io::Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // If the log file doesn't exist, we need to emit a header
    let needs_header = !log_path.exists();

    let mut log_file = OpenOptions::new().append(true).create(true).open(log_path)?;

    if needs_header {
        writeln!(log_file, "date,words,elapsed_secs,wpm,raw_wpm,accuracy")?;
    }

    writeln!(
        log_file,
        "{},{},{:.2},{:.2},{:.2},{:.2}",
        Local::now().format("%c"),
        word_count,
        elapsed_secs,
        summary.wpm,
        summary.raw_wpm,
        summary.accuracy,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn summary() -> Summary {
        Summary {
            wpm: 42.5,
            raw_wpm: 50.0,
            accuracy: 96.3,
        }
    }

    #[test]
    fn first_append_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");

        append_to(&path, &summary(), 3, 12.5).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,words,elapsed_secs,wpm,raw_wpm,accuracy"
        );
        assert!(lines.next().unwrap().ends_with(",3,12.50,42.50,50.00,96.30"));
    }

    #[test]
    fn second_append_skips_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");

        append_to(&path, &summary(), 3, 12.5).unwrap();
        append_to(&path, &summary(), 5, 20.0).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
    }
}
