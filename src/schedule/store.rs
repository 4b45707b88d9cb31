use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{default_schedule, TimeBlock};
use crate::config;

/// The schedule file: a JSON array of `{start, end, label}` records.
pub struct ScheduleStore {
    path: PathBuf,
}

/// What reading the schedule file produced.
enum ReadOutcome {
    Loaded(Vec<TimeBlock>),
    /// Missing, blank, `null`, `{}` or not JSON at all: safe to overwrite.
    Unusable,
    /// Valid JSON with bad records, or an I/O failure: keep the file as is.
    Rejected(anyhow::Error),
}

impl ScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(config::config_dir()?.join("schedule.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the schedule.
    ///
    /// A missing or syntactically broken file is replaced with the default
    /// schedule. Bad records or read failures fall back to the default in
    /// memory only, leaving the file for the user to fix.
    pub fn load(&self) -> Vec<TimeBlock> {
        match self.read() {
            ReadOutcome::Loaded(schedule) => {
                info!("Loaded {} time blocks from {}", schedule.len(), self.path.display());
                schedule
            }
            ReadOutcome::Unusable => {
                info!("No usable schedule at {}, writing default schedule", self.path.display());
                self.reset_to_default()
            }
            ReadOutcome::Rejected(e) => {
                warn!("Using default schedule, {} left untouched: {:#}", self.path.display(), e);
                default_schedule()
            }
        }
    }

    pub fn save(&self, schedule: &[TimeBlock]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(schedule)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }

    fn read(&self) -> ReadOutcome {
        if !self.path.exists() {
            return ReadOutcome::Unusable;
        }

        let contents = match fs::read_to_string(&self.path).context("Failed to read schedule file") {
            Ok(contents) => contents,
            Err(e) => return ReadOutcome::Rejected(e),
        };

        let value: serde_json::Value = match serde_json::from_str(contents.trim()) {
            Ok(value) => value,
            Err(e) => {
                warn!("Schedule file is not valid JSON: {}", e);
                return ReadOutcome::Unusable;
            }
        };
        match &value {
            serde_json::Value::Null => return ReadOutcome::Unusable,
            serde_json::Value::Object(map) if map.is_empty() => return ReadOutcome::Unusable,
            _ => {}
        }

        match serde_json::from_value(value).context("Invalid schedule records") {
            Ok(schedule) => ReadOutcome::Loaded(schedule),
            Err(e) => ReadOutcome::Rejected(e),
        }
    }

    fn reset_to_default(&self) -> Vec<TimeBlock> {
        let schedule = default_schedule();
        if let Err(e) = self.save(&schedule) {
            warn!("Could not write default schedule: {:#}", e);
        }
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimeOfDay;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, ScheduleStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ScheduleStore::new(dir.path().join("schedule.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_writes_default() {
        let (_dir, store) = temp_store();
        let schedule = store.load();
        assert_eq!(schedule, default_schedule());
        assert!(store.path().exists());
    }

    #[test]
    fn test_unparseable_file_resets() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "[{\"start\": \"25:00\"").unwrap();
        assert_eq!(store.load(), default_schedule());
        let on_disk: Vec<TimeBlock> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk, default_schedule());

        for blank in ["{}", "null", "   "] {
            fs::write(store.path(), blank).unwrap();
            assert_eq!(store.load(), default_schedule());
            assert_ne!(fs::read_to_string(store.path()).unwrap(), blank);
        }
    }

    #[test]
    fn test_bad_record_keeps_user_file() {
        let (_dir, store) = temp_store();
        let user_file = r#"[
            {"start": "07:00", "end": "08:00", "label": "My Gym"},
            {"start": "24:00", "end": "09:00", "label": "Typo"}
        ]"#;
        fs::write(store.path(), user_file).unwrap();

        assert_eq!(store.load(), default_schedule());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), user_file);
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = temp_store();
        let schedule = vec![TimeBlock::new(
            TimeOfDay::from_hm(23, 0).unwrap(),
            TimeOfDay::from_hm(1, 0).unwrap(),
            "Night shift",
        )];
        store.save(&schedule).unwrap();
        assert_eq!(store.load(), schedule);
    }

    #[test]
    fn test_empty_array_is_valid() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "[]").unwrap();
        assert!(store.load().is_empty());
    }
}
