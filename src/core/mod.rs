pub mod errors;
pub mod models;

pub use errors::LexmineError;
pub use models::{ QuizMode, ReviewScope, Verdict, VerifyReport };
