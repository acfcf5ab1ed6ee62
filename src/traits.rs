//! # Sequenced Map Trait
//!
//! The end-aware seam shared by [`OrderedMap`](crate::map::OrderedMap) and
//! its [`ReversedMap`](crate::view::ReversedMap) view: code that only needs
//! "peek/pop/position at either end" can run against either direction
//! without knowing which one it holds.

use std::hash::Hash;

use crate::map::OrderedMap;
use crate::view::ReversedMap;

/// Map with a well-defined encounter order and operations on both ends.
///
/// "First" is the eldest end of the encounter order and "last" the newest;
/// on a reversed view the ends swap accordingly.
pub trait SequencedMap<K, V> {
    /// Returns the eldest entry without removing or reordering it.
    ///
    /// # Example
    ///
    /// ```
    /// use seqmap::map::OrderedMap;
    /// use seqmap::traits::SequencedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.put("a", 1);
    /// map.put("b", 2);
    /// assert_eq!(SequencedMap::first_entry(&map), Some((&"a", &1)));
    /// ```
    fn first_entry(&self) -> Option<(&K, &V)>;

    /// Returns the newest entry without removing or reordering it.
    fn last_entry(&self) -> Option<(&K, &V)>;

    /// Removes and returns the eldest entry.
    ///
    /// # Example
    ///
    /// ```
    /// use seqmap::map::OrderedMap;
    /// use seqmap::traits::SequencedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.put("a", 1);
    /// map.put("b", 2);
    /// assert_eq!(SequencedMap::poll_first_entry(&mut map), Some(("a", 1)));
    /// assert_eq!(map.len(), 1);
    /// ```
    fn poll_first_entry(&mut self) -> Option<(K, V)>;

    /// Removes and returns the newest entry.
    fn poll_last_entry(&mut self) -> Option<(K, V)>;

    /// Inserts or replaces `key` and positions its entry at the eldest end.
    ///
    /// Explicit positioning: never treated as an access and never triggers
    /// eviction.
    ///
    /// # Example
    ///
    /// ```
    /// use seqmap::map::OrderedMap;
    /// use seqmap::traits::SequencedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.put("a", 1);
    /// SequencedMap::put_first(&mut map, "z", 26);
    /// assert_eq!(map.first_entry(), Some((&"z", &26)));
    /// ```
    fn put_first(&mut self, key: K, value: V) -> Option<V>;

    /// Inserts or replaces `key` and positions its entry at the newest end.
    fn put_last(&mut self, key: K, value: V) -> Option<V>;
}

impl<K: Eq + Hash + Clone, V> SequencedMap<K, V> for OrderedMap<K, V> {
    fn first_entry(&self) -> Option<(&K, &V)> {
        OrderedMap::first_entry(self)
    }

    fn last_entry(&self) -> Option<(&K, &V)> {
        OrderedMap::last_entry(self)
    }

    fn poll_first_entry(&mut self) -> Option<(K, V)> {
        OrderedMap::poll_first_entry(self)
    }

    fn poll_last_entry(&mut self) -> Option<(K, V)> {
        OrderedMap::poll_last_entry(self)
    }

    fn put_first(&mut self, key: K, value: V) -> Option<V> {
        OrderedMap::put_first(self, key, value)
    }

    fn put_last(&mut self, key: K, value: V) -> Option<V> {
        OrderedMap::put_last(self, key, value)
    }
}

impl<K: Eq + Hash + Clone, V> SequencedMap<K, V> for ReversedMap<'_, K, V> {
    fn first_entry(&self) -> Option<(&K, &V)> {
        ReversedMap::first_entry(self)
    }

    fn last_entry(&self) -> Option<(&K, &V)> {
        ReversedMap::last_entry(self)
    }

    fn poll_first_entry(&mut self) -> Option<(K, V)> {
        ReversedMap::poll_first_entry(self)
    }

    fn poll_last_entry(&mut self) -> Option<(K, V)> {
        ReversedMap::poll_last_entry(self)
    }

    fn put_first(&mut self, key: K, value: V) -> Option<V> {
        ReversedMap::put_first(self, key, value)
    }

    fn put_last(&mut self, key: K, value: V) -> Option<V> {
        ReversedMap::put_last(self, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::OrderedMap;

    fn drain_oldest<K, V, M: SequencedMap<K, V>>(map: &mut M, n: usize) -> Vec<(K, V)> {
        let mut out = Vec::new();
        for _ in 0..n {
            match map.poll_first_entry() {
                Some(entry) => out.push(entry),
                None => break,
            }
        }
        out
    }

    #[test]
    fn generic_code_runs_against_the_map() {
        let mut map = OrderedMap::new();
        map.put(1, "a");
        map.put(2, "b");
        map.put(3, "c");
        assert_eq!(drain_oldest(&mut map, 2), vec![(1, "a"), (2, "b")]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn generic_code_runs_against_the_reversed_view() {
        let mut map = OrderedMap::new();
        map.put(1, "a");
        map.put(2, "b");
        map.put(3, "c");
        let mut rev = map.reversed();
        // The view's eldest end is the base's newest.
        assert_eq!(drain_oldest(&mut rev, 2), vec![(3, "c"), (2, "b")]);
        assert_eq!(rev.len(), 1);
    }
}
