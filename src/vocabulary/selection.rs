use std::collections::HashSet;

use rand::{
    rng,
    seq::SliceRandom,
};

/// Picks `count` words the user has not seen in the current cycle, marking
/// them seen. The returned order carries no meaning.
///
/// A request larger than the deck is clamped to the deck size. When fewer
/// unseen words remain than requested, the seen set is cleared and the whole
/// deck becomes the candidate pool again; a word may therefore reappear right
/// after a reset, but never twice within one cycle.
pub fn select_unseen(count: usize, deck: &[String], seen: &mut HashSet<String>) -> Vec<String> {
    if deck.is_empty() {
        return Vec::new();
    }

    let count = if count > deck.len() {
        log::warn!("requested {} words but the deck holds {}, clamping", count, deck.len());
        deck.len()
    } else {
        count
    };

    let mut available: Vec<&String> = deck.iter().filter(|word| !seen.contains(*word)).collect();
    if available.len() < count {
        log::info!(
            "only {} unseen words left for a request of {}, starting a new cycle",
            available.len(),
            count
        );
        seen.clear();
        available = deck.iter().collect();
    }

    let mut rng = rng();
    available.shuffle(&mut rng);
    available.truncate(count);

    let selected: Vec<String> = available.into_iter().cloned().collect();
    for word in &selected {
        seen.insert(word.clone());
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_repeats_within_a_cycle() {
        let deck = deck(&["a", "b", "c", "d", "e", "f"]);
        let mut seen = HashSet::new();

        let first = select_unseen(3, &deck, &mut seen);
        let second = select_unseen(3, &deck, &mut seen);

        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);
        for word in &second {
            assert!(!first.contains(word), "{} was selected twice in one cycle", word);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_exhaustion_triggers_reset() {
        let deck = deck(&["a", "b", "c", "d"]);
        let mut seen = HashSet::new();

        let first = select_unseen(4, &deck, &mut seen);
        let second = select_unseen(4, &deck, &mut seen);

        let full: HashSet<String> = deck.iter().cloned().collect();
        assert_eq!(first.iter().cloned().collect::<HashSet<_>>(), full);
        assert_eq!(second.iter().cloned().collect::<HashSet<_>>(), full);
    }

    #[test]
    fn test_partial_exhaustion_resets_too() {
        let deck = deck(&["a", "b", "c"]);
        let mut seen = HashSet::new();

        select_unseen(2, &deck, &mut seen);
        // One unseen word left, request two: a fresh cycle must begin.
        let batch = select_unseen(2, &deck, &mut seen);

        assert_eq!(batch.len(), 2);
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_count_is_clamped_to_deck_size() {
        let deck = deck(&["a", "b", "c"]);
        let mut seen = HashSet::new();

        let batch = select_unseen(10, &deck, &mut seen);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_empty_deck_yields_nothing() {
        let mut seen = HashSet::new();
        assert!(select_unseen(5, &[], &mut seen).is_empty());
        assert!(seen.is_empty());
    }

    #[test]
    fn test_orphaned_seen_words_are_ignored() {
        let deck = deck(&["a", "b"]);
        let mut seen: HashSet<String> = ["stale".to_string()].into_iter().collect();

        let batch = select_unseen(2, &deck, &mut seen);
        assert_eq!(batch.len(), 2);
        // The orphan is ignored, not removed, until a cycle reset wipes it.
        assert!(seen.contains("stale"));

        let next = select_unseen(1, &deck, &mut seen);
        assert_eq!(next.len(), 1);
        assert!(!seen.contains("stale"));
    }
}
