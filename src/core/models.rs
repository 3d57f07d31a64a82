/// Direction of a quiz round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    /// Show the English word, expect the Chinese translation.
    EnToCn,
    /// Show the Chinese translation, expect the English word.
    CnToEn,
}

/// Where the words for a review round come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewScope {
    /// The most recently journaled group.
    LatestGroup,
    /// The group journaled under an exact date key (YYYY-MM-DD).
    Group(String),
    /// A random sample from everything handed out so far.
    RandomHistory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub position: usize,
    pub correct: bool,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub verdicts: Vec<Verdict>,
    pub correct: usize,
    pub total: usize,
}

impl VerifyReport {
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}
