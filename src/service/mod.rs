use std::{
    collections::HashSet,
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use chrono::Local;
use rand::{
    rng,
    seq::SliceRandom,
};

use crate::{
    core::{
        LexmineError,
        QuizMode,
        ReviewScope,
    },
    journal::GroupJournal,
    persistence::{
        PersistenceLayer,
        ProgressRecord,
    },
    reminder::{
        parse_interval,
        Notifier,
        ReminderScheduler,
    },
    review::ReviewSession,
    vocabulary::{
        selection::select_unseen,
        VocabularyStore,
        FALLBACK_DECK_NAME,
    },
};

const MIN_BATCH: usize = 10;
const HISTORY_SAMPLE: usize = 10;
const ENCOURAGEMENT: &str = "Perfect score! Keep going, the deck is almost yours.";

const HELP_TEXT: &str = "\
Commands:
  add-words <count>        pick new words (at least 10) and journal them
  review <mode> <type>     mode: 1 = word to meaning, 2 = meaning to word
                           type: 1 = latest group, 2 = random from history,
                           or a date (YYYY-MM-DD) for that day's group
  verify <answer>...       grade the pending review
  switch-deck <name|list>  activate a deck source, or list the available ones
  clear                    wipe the journal and the seen history
  set-timer <spec|cancel>  periodic study reminder (one day, N hours, N minutes)
  help                     this text";

fn today_key() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs % 3600 == 0 {
        format!("{} hour(s)", secs / 3600)
    } else {
        format!("{} minute(s)", secs.div_ceil(60))
    }
}

struct Progress {
    seen: HashSet<String>,
    journal: GroupJournal,
}

/// The one stateful object behind every command: it owns the vocabulary
/// store, the selection/journal state, the review session and the reminder
/// timer, and funnels every mutation through its locks so concurrent
/// commands cannot lose updates.
pub struct WordTrainer {
    store: Mutex<VocabularyStore>,
    progress: Mutex<Progress>,
    session: Mutex<ReviewSession>,
    scheduler: Mutex<ReminderScheduler>,
    persistence: PersistenceLayer,
    deck_dir: PathBuf,
}

impl WordTrainer {
    /// Builds the service with the built-in deck and whatever progress the
    /// persistence layer still holds from earlier runs.
    pub fn init(deck_dir: PathBuf, persistence: PersistenceLayer, notifier: Notifier) -> Self {
        let (seen, journal) = persistence.load().into_state();
        log::info!(
            "trainer initialized: {} seen words, {} journaled groups",
            seen.len(),
            journal.len()
        );

        Self {
            store: Mutex::new(VocabularyStore::builtin()),
            progress: Mutex::new(Progress { seen, journal }),
            session: Mutex::new(ReviewSession::new()),
            scheduler: Mutex::new(ReminderScheduler::new(notifier)),
            persistence,
            deck_dir,
        }
    }

    fn save(&self, progress: &Progress) -> Result<(), LexmineError> {
        self.persistence.save(&ProgressRecord::from_state(&progress.seen, &progress.journal))
    }

    /// Selects at least ten fresh words, journals them under today's date
    /// and persists before replying.
    pub fn add_words(&self, count: usize) -> Result<String, LexmineError> {
        let count = count.max(MIN_BATCH);

        let store = self.store.lock().unwrap();
        let mut progress = self.progress.lock().unwrap();

        let selected = select_unseen(count, store.active_words(), &mut progress.seen);
        if selected.is_empty() {
            return Err(LexmineError::EmptyDeck);
        }

        let today = today_key();
        progress.journal.append(&today, &selected);
        self.save(&progress)?;

        let mut lines = vec![format!("Picked {} words for {}:", selected.len(), today)];
        for (i, word) in selected.iter().enumerate() {
            lines.push(format!("{}. {} - {}", i + 1, word, store.translation(word)));
        }
        Ok(lines.join("\n"))
    }

    /// Begins a review round over the chosen scope and returns the prompts.
    pub fn review(&self, mode: QuizMode, scope: ReviewScope) -> Result<String, LexmineError> {
        let store = self.store.lock().unwrap();

        let words: Vec<String> = {
            let progress = self.progress.lock().unwrap();
            match scope {
                ReviewScope::LatestGroup => {
                    let latest = progress.journal.latest();
                    if latest.is_empty() {
                        return Err(LexmineError::EmptyJournal);
                    }
                    latest.to_vec()
                }
                ReviewScope::Group(date) => {
                    let group = progress.journal.get(&date);
                    if group.is_empty() {
                        return Err(LexmineError::UnknownGroup(date));
                    }
                    group.to_vec()
                }
                ReviewScope::RandomHistory => {
                    if progress.seen.is_empty() {
                        return Err(LexmineError::EmptyHistory);
                    }
                    let mut history: Vec<&String> = progress.seen.iter().collect();
                    history.shuffle(&mut rng());
                    history.truncate(HISTORY_SAMPLE);
                    history.into_iter().cloned().collect()
                }
            }
        };

        let prompts = self.session.lock().unwrap().begin(mode, words, store.translations())?;

        let header = match mode {
            QuizMode::EnToCn => "Give the Chinese meaning of each word:",
            QuizMode::CnToEn => "Give the English word for each meaning:",
        };
        Ok(format!("{}\n{}\nReply with: verify <answer>...", header, prompts.join("\n")))
    }

    /// Grades the pending review round.
    pub fn verify(&self, answers: &[String]) -> Result<String, LexmineError> {
        let store = self.store.lock().unwrap();
        let report = self.session.lock().unwrap().verify(answers, store.translations())?;

        let mut lines: Vec<String> = report
            .verdicts
            .iter()
            .map(|verdict| {
                if verdict.correct {
                    format!("{}. correct", verdict.position)
                } else {
                    format!("{}. wrong, expected: {}", verdict.position, verdict.expected)
                }
            })
            .collect();

        lines.push(format!("Score: {}/{}", report.correct, report.total));
        if report.is_perfect() {
            lines.push(ENCOURAGEMENT.to_string());
        }
        Ok(lines.join("\n"))
    }

    pub fn list_decks(&self) -> String {
        let mut sources = VocabularyStore::list_available(&self.deck_dir);
        if !sources.iter().any(|s| s == FALLBACK_DECK_NAME) {
            sources.insert(0, FALLBACK_DECK_NAME.to_string());
        }

        let mut lines = vec!["Available decks:".to_string()];
        for (i, name) in sources.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, name));
        }
        lines.join("\n")
    }

    /// Activates a deck source and resets the seen history, which is scoped
    /// to the deck it was built against.
    pub fn switch_deck(&self, name: &str) -> Result<String, LexmineError> {
        let new_store = if name == FALLBACK_DECK_NAME {
            VocabularyStore::builtin()
        } else {
            let path = self.deck_dir.join(format!("{}.json", name));
            if !path.exists() {
                return Err(LexmineError::UnknownDeck(name.to_string()));
            }
            let mut loaded = VocabularyStore::load(&path);
            loaded.activate(name);
            loaded
        };

        let mut store = self.store.lock().unwrap();
        let mut progress = self.progress.lock().unwrap();

        *store = new_store;
        progress.seen.clear();
        self.save(&progress)?;

        Ok(format!(
            "Switched to deck '{}' ({} words). Seen history was reset.",
            store.deck_name(),
            store.active_words().len()
        ))
    }

    /// Empties the journal and the seen history together.
    pub fn clear(&self) -> Result<String, LexmineError> {
        let mut progress = self.progress.lock().unwrap();
        progress.seen.clear();
        progress.journal.clear();
        self.save(&progress)?;

        Ok("Cleared the word journal and the seen history.".to_string())
    }

    /// Configures the reminder timer; "cancel" stops it (a no-op when
    /// nothing is running).
    pub fn set_timer(&self, spec: &str) -> String {
        let mut scheduler = self.scheduler.lock().unwrap();

        if spec.trim().eq_ignore_ascii_case("cancel") {
            scheduler.cancel();
            return "Reminder timer cancelled.".to_string();
        }

        let interval = parse_interval(spec);
        scheduler.set(interval);
        format!("Reminder set for every {}.", format_interval(interval))
    }

    pub fn help(&self) -> &'static str {
        HELP_TEXT
    }

    pub fn shutdown(&self) {
        self.scheduler.lock().unwrap().cancel();
    }
}
