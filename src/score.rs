use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Sole owner of the high-score file. Neither call ever fails: a missing or
/// unreadable record counts as a first run, and write errors are only logged.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> u32 {
        match self.read() {
            Ok(score) => {
                debug!("loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(e) => {
                warn!("resetting high score: {:#}", e);
                self.save(0);
                0
            }
        }
    }

    /// Replaces the stored value, whatever it was.
    pub fn save(&self, score: u32) {
        match self.write(score) {
            Ok(()) => debug!("saved high score {} to {}", score, self.path.display()),
            Err(e) => error!("failed to save high score: {:#}", e),
        }
    }

    fn read(&self) -> Result<u32> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("could not read {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&raw)
            .with_context(|| format!("malformed record in {}", self.path.display()))?;

        Ok(record.high_score)
    }

    fn write(&self, score: u32) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("could not create {}", dir.display()))?;
        }

        let data = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, data)
            .with_context(|| format!("could not write {}", self.path.display()))
    }
}

/// A fresh file path under the system temp dir, unique to this test process.
#[cfg(test)]
pub fn scratch_path(tag: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join(format!("grid-snake-{}", std::process::id()))
        .join(format!("{}.json", tag));
    let _ = fs::remove_file(&path);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_value(store: &HighScoreStore) -> serde_json::Value {
        let raw = fs::read_to_string(store.path()).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn missing_file_loads_zero_and_persists_it() {
        let store = HighScoreStore::new(scratch_path("missing"));
        assert!(!store.path().exists());

        assert_eq!(store.load(), 0);
        assert_eq!(stored_value(&store), serde_json::json!({ "high_score": 0 }));
    }

    #[test]
    fn empty_file_loads_zero_and_persists_it() {
        let store = HighScoreStore::new(scratch_path("empty"));
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "").unwrap();

        assert_eq!(store.load(), 0);
        assert_eq!(stored_value(&store), serde_json::json!({ "high_score": 0 }));
    }

    #[test]
    fn malformed_records_load_zero() {
        let store = HighScoreStore::new(scratch_path("malformed"));
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        for junk in &["{", "null", r#"{"score": 9}"#, r#"{"high_score": -3}"#, r#"{"high_score": "9"}"#] {
            fs::write(store.path(), junk).unwrap();
            assert_eq!(store.load(), 0, "record {:?}", junk);
            assert_eq!(stored_value(&store)["high_score"], 0);
        }
    }

    #[test]
    fn load_returns_last_save() {
        let store = HighScoreStore::new(scratch_path("roundtrip"));
        store.save(42);
        assert_eq!(store.load(), 42);

        store.save(7);
        assert_eq!(store.load(), 7);
    }

    #[test]
    fn save_creates_missing_directories() {
        let path = scratch_path("nested").with_extension("").join("assets").join("high_score.json");
        let store = HighScoreStore::new(&path);

        store.save(3);
        assert_eq!(HighScoreStore::new(path).load(), 3);
    }
}
