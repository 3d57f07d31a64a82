use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

/// Date-keyed history of the word batches handed out to the user.
///
/// Keys are ISO `YYYY-MM-DD` dates, so the `BTreeMap` ordering is
/// chronological and the last key is always the newest group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupJournal {
    groups: BTreeMap<String, Vec<String>>,
}

impl GroupJournal {
    pub fn new() -> Self {
        Self { groups: BTreeMap::new() }
    }

    pub fn from_map(groups: BTreeMap<String, Vec<String>>) -> Self {
        Self { groups }
    }

    /// Merges `words` into the group at `date_key`, creating it if absent.
    ///
    /// Words already present keep their position; new words are appended in
    /// the order given. Appending the same batch twice is a no-op.
    pub fn append(&mut self, date_key: &str, words: &[String]) {
        let group = self.groups.entry(date_key.to_string()).or_default();
        for word in words {
            if !group.contains(word) {
                group.push(word.clone());
            }
        }
    }

    /// The group under the newest date key, or empty if nothing was journaled.
    pub fn latest(&self) -> &[String] {
        self.groups.iter().next_back().map(|(_, words)| words.as_slice()).unwrap_or(&[])
    }

    /// Exact-key lookup. An absent key is a normal outcome, not an error.
    pub fn get(&self, date_key: &str) -> &[String] {
        self.groups.get(date_key).map(|words| words.as_slice()).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.groups
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_append_creates_and_merges() {
        let mut journal = GroupJournal::new();
        journal.append("2026-08-01", &words(&["apple", "banana"]));
        journal.append("2026-08-01", &words(&["banana", "cherry"]));

        assert_eq!(journal.get("2026-08-01"), words(&["apple", "banana", "cherry"]).as_slice());
    }

    #[test]
    fn test_append_is_idempotent() {
        let mut journal = GroupJournal::new();
        let batch = words(&["apple", "banana", "cherry"]);
        journal.append("2026-08-01", &batch);
        journal.append("2026-08-01", &batch);

        assert_eq!(journal.get("2026-08-01"), batch.as_slice());
    }

    #[test]
    fn test_latest_picks_newest_date() {
        let mut journal = GroupJournal::new();
        journal.append("2026-07-30", &words(&["apple"]));
        journal.append("2026-08-02", &words(&["cherry"]));
        journal.append("2026-08-01", &words(&["banana"]));

        assert_eq!(journal.latest(), words(&["cherry"]).as_slice());
    }

    #[test]
    fn test_latest_and_get_on_empty_journal() {
        let journal = GroupJournal::new();
        assert!(journal.latest().is_empty());
        assert!(journal.get("2026-08-01").is_empty());
    }

    #[test]
    fn test_clear_empties_all_groups() {
        let mut journal = GroupJournal::new();
        journal.append("2026-08-01", &words(&["apple"]));
        journal.clear();

        assert!(journal.is_empty());
        assert!(journal.latest().is_empty());
    }
}
