use std::collections::HashMap;

use crate::{
    core::{
        LexmineError,
        QuizMode,
        Verdict,
        VerifyReport,
    },
    vocabulary::UNKNOWN_TRANSLATION,
};

fn translation_of<'a>(translations: &'a HashMap<String, String>, word: &str) -> &'a str {
    translations.get(word).map(|t| t.as_str()).unwrap_or(UNKNOWN_TRANSLATION)
}

/// Per-scope quiz state: the words last shown and the mode they were shown
/// in. Idle until the first `begin`; each `begin` overwrites the previous
/// round; `verify` reads without consuming, so re-grading is idempotent.
#[derive(Debug, Default)]
pub struct ReviewSession {
    last_shown: Vec<String>,
    last_mode: Option<QuizMode>,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.last_mode.is_some() && !self.last_shown.is_empty()
    }

    /// Starts a round over `words`, returning the numbered prompt lines.
    /// An empty word list leaves the session untouched.
    pub fn begin(
        &mut self,
        mode: QuizMode,
        words: Vec<String>,
        translations: &HashMap<String, String>,
    ) -> Result<Vec<String>, LexmineError> {
        if words.is_empty() {
            return Err(LexmineError::EmptyReview);
        }

        let prompts = words
            .iter()
            .enumerate()
            .map(|(i, word)| match mode {
                QuizMode::EnToCn => format!("{}. {}", i + 1, word),
                QuizMode::CnToEn => format!("{}. {}", i + 1, translation_of(translations, word)),
            })
            .collect();

        self.last_shown = words;
        self.last_mode = Some(mode);
        Ok(prompts)
    }

    /// Grades `answers` against the pending round.
    ///
    /// Expected values are re-derived from the shown words and the stored
    /// mode on every call, so a translation map refreshed between begin and
    /// verify is picked up rather than served stale.
    pub fn verify(
        &self,
        answers: &[String],
        translations: &HashMap<String, String>,
    ) -> Result<VerifyReport, LexmineError> {
        let mode = match self.last_mode {
            Some(mode) if !self.last_shown.is_empty() => mode,
            _ => return Err(LexmineError::NoActiveReview),
        };

        let expected: Vec<String> = self
            .last_shown
            .iter()
            .map(|word| match mode {
                QuizMode::EnToCn => translation_of(translations, word).to_string(),
                QuizMode::CnToEn => word.clone(),
            })
            .collect();

        if answers.len() != expected.len() {
            return Err(LexmineError::AnswerCountMismatch {
                expected: expected.len(),
                got: answers.len(),
            });
        }

        let verdicts: Vec<Verdict> = expected
            .into_iter()
            .zip(answers.iter())
            .enumerate()
            .map(|(i, (expected, answer))| {
                let correct = answer.trim().eq_ignore_ascii_case(expected.trim());
                Verdict { position: i + 1, correct, expected }
            })
            .collect();

        let correct = verdicts.iter().filter(|v| v.correct).count();
        let total = verdicts.len();
        Ok(VerifyReport { verdicts, correct, total })
    }
}
