//! High scores: top-10 records persisted as JSON (XDG config or ~/.config).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const FILENAME: &str = "highscores.json";

/// How many records the table keeps.
pub const KEPT_SCORES: usize = 10;

/// One finished round, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    /// Seconds since the Unix epoch at the moment the round ended.
    pub timestamp: u64,
    /// Grid side length the round was played on.
    pub size: u16,
    /// Round duration in seconds.
    pub duration: u64,
    pub score: u32,
}

/// Where finished rounds report their score. Fire-and-forget: implementors
/// swallow their own failures, the round never sees them.
pub trait HighScoreSink {
    fn append(&mut self, size: u16, duration: u64, score: u32);
}

/// Insert a record, keep the list sorted by descending score, drop
/// everything past the top 10. Stable sort, so older entries win ties.
pub fn insert_score(scores: &mut Vec<HighScore>, entry: HighScore) {
    scores.push(entry);
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(KEPT_SCORES);
}

/// Path to the high scores file (config dir / numlinktui / highscores.json).
fn config_path() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if xdg.is_empty() {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".config")
        } else {
            PathBuf::from(xdg)
        }
    } else {
        std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from("."))
    };
    base.join("numlinktui").join(FILENAME)
}

/// JSON-file-backed score table. Every failure degrades to "no scores" or a
/// silently dropped write; a broken disk never breaks a round.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn at_default_location() -> Self {
        Self {
            path: config_path(),
        }
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Stored records, best first. Missing or unparsable file reads as empty.
    pub fn load(&self) -> Vec<HighScore> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn save(&self, scores: &[HighScore]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(scores)?;
        fs::write(&self.path, json)
    }
}

impl HighScoreSink for FileStore {
    fn append(&mut self, size: u16, duration: u64, score: u32) {
        let mut scores = self.load();
        insert_score(
            &mut scores,
            HighScore {
                timestamp: unix_now(),
                size,
                duration,
                score,
            },
        );
        let _ = self.save(&scores);
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: u64, score: u32) -> HighScore {
        HighScore {
            timestamp,
            size: 6,
            duration: 60,
            score,
        }
    }

    #[test]
    fn insert_keeps_descending_order() {
        let mut scores = Vec::new();
        insert_score(&mut scores, record(1, 30));
        insert_score(&mut scores, record(2, 90));
        insert_score(&mut scores, record(3, 60));
        let ordered: Vec<u32> = scores.iter().map(|s| s.score).collect();
        assert_eq!(ordered, vec![90, 60, 30]);
    }

    #[test]
    fn insert_truncates_to_top_ten() {
        let mut scores = Vec::new();
        for i in 0..12 {
            insert_score(&mut scores, record(i, i as u32 * 10));
        }
        assert_eq!(scores.len(), KEPT_SCORES);
        assert_eq!(scores[0].score, 110);
        assert_eq!(scores[KEPT_SCORES - 1].score, 20);
    }

    #[test]
    fn ties_keep_the_older_entry_first() {
        let mut scores = Vec::new();
        insert_score(&mut scores, record(1, 50));
        insert_score(&mut scores, record(2, 50));
        assert_eq!(scores[0].timestamp, 1);
        assert_eq!(scores[1].timestamp, 2);
    }

    #[test]
    fn file_store_round_trips_and_tolerates_missing_file() {
        let path = std::env::temp_dir().join(format!(
            "numlinktui-scores-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let mut store = FileStore::new(path.clone());
        assert!(store.load().is_empty());

        store.append(6, 60, 120);
        store.append(6, 60, 300);
        let scores = store.load();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].score, 300);
        assert_eq!(scores[1].score, 120);

        let _ = fs::remove_file(&path);
    }
}
