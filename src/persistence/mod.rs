use std::{
    collections::{
        BTreeMap,
        HashSet,
    },
    fs,
    path::PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::LexmineError,
    journal::GroupJournal,
};

const APP_NAME: &str = "lexmine";
const PROGRESS_FILE: &str = "progress.json";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join(APP_NAME)
    } else {
        PathBuf::from(".")
    }
}

/// The durable image of selection and journaling state. Everything else
/// (decks, translations, the review session) is reproducible or ephemeral.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressRecord {
    #[serde(rename = "usedWords")]
    pub used_words: Vec<String>,

    #[serde(rename = "wordGroups")]
    pub word_groups: BTreeMap<String, Vec<String>>,
}

impl ProgressRecord {
    pub fn from_state(seen: &HashSet<String>, journal: &GroupJournal) -> Self {
        let mut used_words: Vec<String> = seen.iter().cloned().collect();
        used_words.sort();

        Self { used_words, word_groups: journal.as_map().clone() }
    }

    pub fn into_state(self) -> (HashSet<String>, GroupJournal) {
        (self.used_words.into_iter().collect(), GroupJournal::from_map(self.word_groups))
    }
}

#[derive(Debug, Clone)]
pub struct PersistenceLayer {
    file_path: PathBuf,
}

impl PersistenceLayer {
    pub fn new() -> Self {
        Self { file_path: get_app_data_dir().join(PROGRESS_FILE) }
    }

    pub fn at_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    /// Reads the durable record. A missing or corrupt file yields an empty
    /// record so the system stays usable on first run.
    pub fn load(&self) -> ProgressRecord {
        if !self.file_path.exists() {
            log::info!("no progress file at {}, starting fresh", self.file_path.display());
            return ProgressRecord::default();
        }

        let json = match fs::read_to_string(&self.file_path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!(
                    "failed to read progress file {}: {}, starting fresh",
                    self.file_path.display(),
                    e
                );
                return ProgressRecord::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(record) => record,
            Err(e) => {
                log::warn!(
                    "failed to parse progress file {}: {}, starting fresh",
                    self.file_path.display(),
                    e
                );
                ProgressRecord::default()
            }
        }
    }

    /// Writes the full record, temp-then-rename so a crash mid-write cannot
    /// clobber the previous good state.
    pub fn save(&self, record: &ProgressRecord) -> Result<(), LexmineError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(record)?;
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.file_path)?;

        log::debug!("progress saved to {}", self.file_path.display());
        Ok(())
    }
}

impl Default for PersistenceLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProgressRecord {
        let mut seen = HashSet::new();
        seen.insert("apple".to_string());
        seen.insert("banana".to_string());

        let mut journal = GroupJournal::new();
        journal.append("2026-08-01", &["apple".to_string(), "banana".to_string()]);
        journal.append("2026-08-02", &["cherry".to_string()]);

        ProgressRecord::from_state(&seen, &journal)
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let layer = PersistenceLayer::at_path(dir.path().join("progress.json"));

        let record = sample_record();
        layer.save(&record).unwrap();

        assert_eq!(layer.load(), record);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let layer = PersistenceLayer::at_path(dir.path().join("progress.json"));

        assert_eq!(layer.load(), ProgressRecord::default());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{ not json").unwrap();

        let layer = PersistenceLayer::at_path(path);
        assert_eq!(layer.load(), ProgressRecord::default());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let layer = PersistenceLayer::at_path(dir.path().join("nested").join("progress.json"));

        layer.save(&sample_record()).unwrap();
        assert!(layer.file_path().exists());
    }

    #[test]
    fn test_record_state_conversion() {
        let record = sample_record();
        let (seen, journal) = record.clone().into_state();

        assert!(seen.contains("apple"));
        assert!(seen.contains("banana"));
        assert_eq!(journal.get("2026-08-02"), ["cherry".to_string()].as_slice());
        assert_eq!(ProgressRecord::from_state(&seen, &journal), record);
    }
}
