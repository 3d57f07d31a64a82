pub mod selection;
pub mod store;

pub use store::{ VocabularyStore, FALLBACK_DECK_NAME, UNKNOWN_TRANSLATION };
