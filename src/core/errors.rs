use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexmineError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("A review needs at least one word.")]
    EmptyReview,

    #[error("No review is in progress. Start one with the review command.")]
    NoActiveReview,

    #[error("Expected {expected} answers but got {got}.")]
    AnswerCountMismatch { expected: usize, got: usize },

    #[error("No word group recorded for {0}.")]
    UnknownGroup(String),

    #[error("No word groups have been recorded yet.")]
    EmptyJournal,

    #[error("The active deck has no words.")]
    EmptyDeck,

    #[error("No words have been handed out yet.")]
    EmptyHistory,

    #[error("Unknown deck source: {0}")]
    UnknownDeck(String),

    #[error("LexmineError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for LexmineError {
    fn from(error: std::io::Error) -> Self {
        LexmineError::Io(Box::new(error))
    }
}
