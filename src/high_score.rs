//! High score persistence.
//!
//! The record is a single JSON object, `{"high_score": <n>}`, stored at a
//! path relative to the working directory.

use crate::utils::persistence::{load_json, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// On-disk shape of the high score file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// Reads and writes the high score file.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored high score, or 0 if the file is missing or malformed.
    pub fn load(&self) -> u32 {
        if !self.exists() {
            log::info!("No high score file at {}, starting at 0", self.path.display());
            return 0;
        }
        match load_json::<HighScoreRecord>(&self.path) {
            Ok(record) => {
                log::info!("Loaded high score {}", record.high_score);
                record.high_score
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable high score file {}: {}",
                    self.path.display(),
                    e
                );
                0
            }
        }
    }

    /// Overwrite the stored high score.
    pub fn save(&self, high_score: u32) -> io::Result<()> {
        save_json(&self.path, &HighScoreRecord { high_score })?;
        log::info!("High score {} saved to {}", high_score, self.path.display());
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_store(name: &str) -> HighScoreStore {
        let path = std::env::temp_dir().join(format!(
            "turmac_high_score_{}_{}.json",
            std::process::id(),
            name
        ));
        fs::remove_file(&path).ok();
        HighScoreStore::new(path)
    }

    #[test]
    fn test_save_and_load() {
        let store = temp_store("roundtrip");

        store.save(42).expect("Failed to save high score");
        assert!(store.exists());
        assert_eq!(store.load(), 42);

        fs::remove_file(store.path()).expect("Failed to remove high score file");
    }

    #[test]
    fn test_file_format() {
        let store = temp_store("format");
        store.save(7).unwrap();

        let json = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["high_score"], 7);

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_load_nonexistent() {
        let store = temp_store("missing");
        assert!(!store.exists());
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_load_corrupt() {
        let store = temp_store("corrupt");

        fs::write(store.path(), "high score: lots").unwrap();
        assert_eq!(store.load(), 0);

        fs::write(store.path(), r#"{"high_score": -3}"#).unwrap();
        assert_eq!(store.load(), 0);

        fs::write(store.path(), r#"{"best": 12}"#).unwrap();
        assert_eq!(store.load(), 0);

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_save_into_missing_directory_fails_cleanly() {
        // A path whose parent is a regular file cannot be created
        let blocker = temp_store("blocker");
        fs::write(blocker.path(), "x").unwrap();
        let store = HighScoreStore::new(blocker.path().join("high_score.json"));

        assert!(store.save(5).is_err());

        fs::remove_file(blocker.path()).ok();
    }
}
