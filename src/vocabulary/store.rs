use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use serde::Deserialize;

pub const FALLBACK_DECK_NAME: &str = "default";

pub const UNKNOWN_TRANSLATION: &str = "未知";

const FALLBACK_WORDS: &[&str] = &[
    "apple", "banana", "cherry", "date", "elderberry", "fig", "grape", "honeydew", "kiwi",
    "lemon", "mango", "nectarine", "orange", "papaya",
];

const SAMPLE_TRANSLATIONS: &[(&str, &str)] = &[
    ("apple", "苹果"),
    ("banana", "香蕉"),
    ("cherry", "樱桃"),
    ("date", "枣"),
    ("elderberry", "接骨木莓"),
    ("fig", "无花果"),
    ("grape", "葡萄"),
    ("honeydew", "哈密瓜"),
    ("kiwi", "猕猴桃"),
    ("lemon", "柠檬"),
    ("mango", "芒果"),
    ("nectarine", "油桃"),
    ("orange", "橙子"),
    ("papaya", "木瓜"),
];

#[derive(Debug, Deserialize)]
struct TranslationEntry {
    translation: String,
}

#[derive(Debug, Deserialize)]
struct WordRecord {
    word: String,
    #[serde(default)]
    translations: Vec<TranslationEntry>,
}

/// The two accepted source shapes, resolved once at load time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeckFile {
    /// Records carrying a word and candidate translations; the first
    /// candidate is canonical.
    Records(Vec<WordRecord>),
    /// Named decks mapped straight to word lists, no translations.
    Named(HashMap<String, Vec<String>>),
}

/// Owns the deck-name → word-list mapping and the word → translation
/// mapping for the currently loaded source. Immutable until the next
/// load or switch.
#[derive(Debug, Clone)]
pub struct VocabularyStore {
    decks: HashMap<String, Vec<String>>,
    translations: HashMap<String, String>,
    active: String,
}

impl VocabularyStore {
    /// The built-in startup store: the fallback deck together with its
    /// sample translations.
    pub fn builtin() -> Self {
        let words = FALLBACK_WORDS.iter().map(|w| w.to_string()).collect();
        let translations = SAMPLE_TRANSLATIONS
            .iter()
            .map(|(word, translation)| (word.to_string(), translation.to_string()))
            .collect();

        Self {
            decks: HashMap::from([(FALLBACK_DECK_NAME.to_string(), words)]),
            translations,
            active: FALLBACK_DECK_NAME.to_string(),
        }
    }

    fn fallback() -> Self {
        let words = FALLBACK_WORDS.iter().map(|w| w.to_string()).collect();

        Self {
            decks: HashMap::from([(FALLBACK_DECK_NAME.to_string(), words)]),
            translations: HashMap::new(),
            active: FALLBACK_DECK_NAME.to_string(),
        }
    }

    /// Parses a vocabulary source. Malformed input or an I/O failure is
    /// recoverable: the built-in fallback deck is returned with an empty
    /// translation mapping, and the condition is logged.
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to read deck source {}: {}, using fallback deck", path.display(), e);
                return Self::fallback();
            }
        };

        let parsed: DeckFile = match serde_json::from_str(&json) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!(
                    "deck source {} is not a recognized shape: {}, using fallback deck",
                    path.display(),
                    e
                );
                return Self::fallback();
            }
        };

        let deck_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(FALLBACK_DECK_NAME)
            .to_string();

        match parsed {
            DeckFile::Records(records) => {
                let mut words = Vec::new();
                let mut translations = HashMap::new();
                for record in records {
                    if words.contains(&record.word) {
                        continue;
                    }
                    if let Some(entry) = record.translations.into_iter().next() {
                        translations.insert(record.word.clone(), entry.translation);
                    }
                    words.push(record.word);
                }

                log::info!("loaded deck '{}' with {} words", deck_name, words.len());
                Self {
                    decks: HashMap::from([(deck_name.clone(), words)]),
                    translations,
                    active: deck_name,
                }
            }
            DeckFile::Named(raw_decks) => {
                let mut decks: HashMap<String, Vec<String>> = HashMap::new();
                for (name, raw_words) in raw_decks {
                    let mut words = Vec::new();
                    for word in raw_words {
                        if !words.contains(&word) {
                            words.push(word);
                        }
                    }
                    decks.insert(name, words);
                }

                let active = if decks.contains_key(&deck_name) {
                    deck_name
                } else {
                    let mut names: Vec<&String> = decks.keys().collect();
                    names.sort();
                    names.first().map(|n| n.to_string()).unwrap_or_else(|| deck_name.clone())
                };

                if decks.is_empty() {
                    log::warn!("deck source {} holds no decks, using fallback deck", path.display());
                    return Self::fallback();
                }

                log::info!("loaded {} deck(s), active '{}'", decks.len(), active);
                Self { decks, translations: HashMap::new(), active }
            }
        }
    }

    /// Enumerates loadable sources in `dir` as sorted file stems.
    /// Side-effect-free; an unreadable directory yields an empty list.
    pub fn list_available(dir: &Path) -> Vec<String> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("failed to read deck directory {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut sources: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .filter_map(|path| {
                path.file_stem().and_then(|stem| stem.to_str()).map(|s| s.to_string())
            })
            .collect();

        sources.sort();
        sources
    }

    pub fn activate(&mut self, name: &str) -> bool {
        if self.decks.contains_key(name) {
            self.active = name.to_string();
            true
        } else {
            false
        }
    }

    pub fn deck_name(&self) -> &str {
        &self.active
    }

    pub fn deck_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.decks.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn active_words(&self) -> &[String] {
        self.decks.get(&self.active).map(|words| words.as_slice()).unwrap_or(&[])
    }

    /// The canonical translation for `word`, or the unknown sentinel.
    pub fn translation(&self, word: &str) -> &str {
        self.translations.get(word).map(|t| t.as_str()).unwrap_or(UNKNOWN_TRANSLATION)
    }

    pub fn translations(&self) -> &HashMap<String, String> {
        &self.translations
    }
}
