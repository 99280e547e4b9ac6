use std::hash::Hash;

use ahash::HashMap;

/// How a stored score relates to the true minimax value of its position.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Bound {
    Exact,
    /// The search failed high, the value is at least `score`.
    Lower,
    /// The search failed low, the value is at most `score`.
    Upper,
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub struct Entry {
    pub score: i32,
    pub bound: Bound,
}

impl Entry {
    /// Classifies `score` against the window it was searched with.
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        let bound = if score <= alpha {
            Bound::Upper
        } else if score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        Self { score, bound }
    }
}

/// Transposition table for a single root search.
///
/// Scores are depth adjusted and a position's depth follows from how many marks
/// were added since the root, so entries are only valid while the root stays the
/// same. The searcher clears the cache before every root search.
pub trait Cache<S> {
    fn store(&mut self, state: &S, entry: Entry);
    fn probe(&mut self, state: &S) -> Option<Entry>;
    fn clear(&mut self);
}

#[derive(Debug, Clone)]
pub struct HashMapCache<S>(HashMap<S, Entry>);

impl<S> HashMapCache<S> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S> Default for HashMapCache<S> {
    fn default() -> Self {
        Self(HashMap::default())
    }
}

impl<S> Cache<S> for HashMapCache<S> where S: Eq + Hash + Clone {
    fn store(&mut self, state: &S, entry: Entry) {
        self.0.insert(state.clone(), entry);
    }

    fn probe(&mut self, state: &S) -> Option<Entry> {
        self.0.get(state).copied()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Default)]
pub struct NullCache;

impl<S> Cache<S> for NullCache {
    fn store(&mut self, _state: &S, _entry: Entry) {}

    fn probe(&mut self, _state: &S) -> Option<Entry> {
        None
    }

    fn clear(&mut self) {}
}

#[cfg(test)]
mod test {
    use crate::min_max::cache::{Bound, Cache, Entry, HashMapCache};

    #[test]
    fn classify() {
        assert_eq!(Entry::classify(-3, -3, 5).bound, Bound::Upper);
        assert_eq!(Entry::classify(5, -3, 5).bound, Bound::Lower);
        assert_eq!(Entry::classify(0, -3, 5).bound, Bound::Exact);
        assert_eq!(Entry::classify(0, -i32::MAX, i32::MAX).bound, Bound::Exact);
    }

    #[test]
    fn store_probe_clear() {
        let mut cache = HashMapCache::<&str>::default();
        let entry = Entry { score: 7, bound: Bound::Exact };
        cache.store(&"state", entry);
        assert_eq!(cache.probe(&"state"), Some(entry));
        assert_eq!(cache.probe(&"other"), None);
        cache.clear();
        assert!(cache.is_empty());
    }
}
