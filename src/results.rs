//! Append-only result log sink
//!
//! Each game gets its own text file; the core appends one line per
//! terminal outcome and never reads anything back. Write failures are
//! logged and swallowed so gameplay is unaffected.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Destination for terminal-outcome result lines.
pub trait ResultSink {
    /// Append one line to the log keyed by `game`.
    fn append(&mut self, game: &str, line: &str);
}

/// File-backed sink: one `<game>.txt` per game under a base directory.
///
/// The sink owns timestamping so game cores stay wall-clock-free.
pub struct FileResultSink {
    dir: PathBuf,
}

impl FileResultSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the log file for a game key.
    pub fn path_for(&self, game: &str) -> PathBuf {
        self.dir.join(format!("{game}.txt"))
    }

    fn stamp() -> String {
        let now = OffsetDateTime::now_utc();
        now.format(&Rfc3339)
            .unwrap_or_else(|_| now.unix_timestamp().to_string())
    }
}

impl ResultSink for FileResultSink {
    fn append(&mut self, game: &str, line: &str) {
        let path = self.path_for(game);
        let stamped = format!("{line} | {}\n", Self::stamp());
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| file.write_all(stamped.as_bytes()));
        match written {
            Ok(()) => log::info!("Result logged to {}", path.display()),
            Err(err) => log::warn!("Skipping result write to {}: {err}", path.display()),
        }
    }
}

/// In-memory sink for tests: records `(game, line)` pairs verbatim.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for MemorySink {
    fn append(&mut self, game: &str, line: &str) {
        self.lines.push((game.to_string(), line.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        sink.append("zombie_escape_results", "Player - Survived");
        sink.append("codebreaker_leaderboard", "Player cracked the code in 3 attempts.");
        assert_eq!(sink.lines.len(), 2);
        assert_eq!(sink.lines[0].0, "zombie_escape_results");
        assert!(sink.lines[1].1.contains("3 attempts"));
    }

    #[test]
    fn test_file_sink_appends_and_survives_bad_dir() {
        let dir = std::env::temp_dir().join("gamehub_sink_test");
        let _ = std::fs::create_dir_all(&dir);
        let mut sink = FileResultSink::new(dir.clone());
        sink.append("swapcards_best_score", "Completed in 12 moves");
        sink.append("swapcards_best_score", "Completed in 9 moves");
        let contents = std::fs::read_to_string(sink.path_for("swapcards_best_score")).unwrap();
        assert!(contents.lines().count() >= 2);
        let _ = std::fs::remove_dir_all(&dir);

        // Unwritable directory: must not panic
        let mut bad = FileResultSink::new(PathBuf::from("/definitely/not/a/dir"));
        bad.append("swapcards_best_score", "Completed in 1 move");
    }
}
