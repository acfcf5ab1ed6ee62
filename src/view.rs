//! Live reversed view over an [`OrderedMap`].
//!
//! [`ReversedMap`] holds no entries of its own: it borrows the base map
//! exclusively and delegates every operation, swapping head/tail semantics.
//! Mutations through the view land in the base map; reversing the view again
//! hands the base borrow back, so double reversal is identity.
//!
//! ```
//! use seqmap::map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.put("a", 1);
//! map.put("b", 2);
//!
//! let mut rev = map.reversed();
//! assert_eq!(rev.first_entry(), Some((&"b", &2)));
//! rev.put_first("c", 3); // lands at the base's newest end
//!
//! let base = rev.reversed();
//! assert_eq!(base.last_entry(), Some((&"c", &3)));
//! ```

use std::fmt;
use std::hash::Hash;
use std::iter::Rev;

use crate::map::{Cursor, Iter, Keys, OrderedMap, OrderingMode, Values};

/// Zero-copy adapter presenting the base map with the opposite traversal
/// direction.
pub struct ReversedMap<'a, K, V> {
    base: &'a mut OrderedMap<K, V>,
}

impl<'a, K, V> ReversedMap<'a, K, V> {
    pub(crate) fn new(base: &'a mut OrderedMap<K, V>) -> Self {
        Self { base }
    }

    /// Returns the number of entries in the base map.
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Returns `true` if the base map is empty.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Returns the base map's ordering mode.
    pub fn mode(&self) -> OrderingMode {
        self.base.mode()
    }

    /// Returns the base map's newest entry.
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.base.last_entry()
    }

    /// Returns the base map's eldest entry.
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.base.first_entry()
    }

    /// Returns a double-ended iterator over entries, newest first.
    pub fn iter(&self) -> Rev<Iter<'_, K, V>> {
        self.base.iter().rev()
    }

    /// Returns a double-ended iterator over keys, newest first.
    pub fn keys(&self) -> Rev<Keys<'_, K, V>> {
        self.base.keys().rev()
    }

    /// Returns a double-ended iterator over values, newest first.
    pub fn values(&self) -> Rev<Values<'_, K, V>> {
        self.base.values().rev()
    }

    /// Applies `f` to every entry, newest first.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Rewrites every value, newest first, without reordering entries.
    pub fn replace_all(&mut self, f: impl FnMut(&K, &V) -> V) {
        self.base.replace_all_rev(f);
    }

    /// Creates a fail-fast cursor traversing newest to eldest.
    pub fn cursor(&self) -> Cursor {
        self.base.cursor_back()
    }

    /// Removes every entry from the base map.
    pub fn clear(&mut self) {
        self.base.clear();
    }

    /// Returns the base map: double reversal is identity.
    pub fn reversed(self) -> &'a mut OrderedMap<K, V> {
        self.base
    }
}

impl<K: Eq + Hash, V> ReversedMap<'_, K, V> {
    /// Returns `true` if the base map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.base.contains_key(key)
    }

    /// Returns the value for `key` without counting as an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.base.peek(key)
    }

    /// Returns the value for `key`; accesses land on the base map, so in
    /// access mode the entry moves to this view's oldest end.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.base.get(key)
    }

    /// Returns a mutable reference to the value for `key`, with the same
    /// access semantics as [`get`](Self::get).
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.base.get_mut(key)
    }

    /// Removes `key` from the base map, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.base.remove(key)
    }

    /// Removes `key` from the base map, returning the owned entry.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.base.remove_entry(key)
    }

    /// Removes and returns the base map's newest entry.
    pub fn poll_first_entry(&mut self) -> Option<(K, V)> {
        self.base.poll_last_entry()
    }

    /// Removes and returns the base map's eldest entry.
    pub fn poll_last_entry(&mut self) -> Option<(K, V)> {
        self.base.poll_first_entry()
    }
}

impl<K: Eq + Hash + Clone, V> ReversedMap<'_, K, V> {
    /// Inserts or replaces the value for `key` on the base map; reversal
    /// does not change `put` semantics.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.base.put(key, value)
    }

    /// Positions the entry first in this view, i.e. at the base map's
    /// newest end.
    pub fn put_first(&mut self, key: K, value: V) -> Option<V> {
        self.base.put_last(key, value)
    }

    /// Positions the entry last in this view, i.e. at the base map's
    /// oldest end.
    pub fn put_last(&mut self, key: K, value: V) -> Option<V> {
        self.base.put_first(key, value)
    }
}

impl<K, V: PartialEq> ReversedMap<'_, K, V> {
    /// Returns `true` if any entry holds `value`. O(n).
    pub fn contains_value(&self, value: &V) -> bool {
        self.base.contains_value(value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ReversedMap<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::map::{OrderedMap, OrderingMode};

    #[test]
    fn reversed_swaps_first_and_last() {
        let mut map = OrderedMap::new();
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);

        let rev = map.reversed();
        assert_eq!(rev.first_entry(), Some((&"c", &3)));
        assert_eq!(rev.last_entry(), Some((&"a", &1)));
        assert_eq!(rev.len(), 3);
    }

    #[test]
    fn double_reversal_is_identity() {
        let mut map = OrderedMap::new();
        map.put("a", 1);
        map.put("b", 2);

        let base = map.reversed().reversed();
        assert_eq!(base.first_entry(), Some((&"a", &1)));
        assert_eq!(base.last_entry(), Some((&"b", &2)));
    }

    #[test]
    fn reversed_iteration_is_newest_first() {
        let mut map = OrderedMap::new();
        map.put(1, "a");
        map.put(2, "b");
        map.put(3, "c");

        let rev = map.reversed();
        let keys: Vec<_> = rev.keys().copied().collect();
        assert_eq!(keys, [3, 2, 1]);

        // The view's own reverse direction is the base order again.
        let back: Vec<_> = rev.keys().rev().copied().collect();
        assert_eq!(back, [1, 2, 3]);
    }

    #[test]
    fn writes_through_the_view_land_in_the_base() {
        let mut map = OrderedMap::new();
        map.put("a", 1);

        {
            let mut rev = map.reversed();
            rev.put("b", 2);
            rev.put_first("c", 3);
            rev.put_last("d", 4);
            assert_eq!(rev.remove(&"a"), Some(1));
        }

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, ["d", "b", "c"]);
    }

    #[test]
    fn reversed_polls_swap_ends() {
        let mut map = OrderedMap::new();
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);

        let mut rev = map.reversed();
        assert_eq!(rev.poll_first_entry(), Some(("c", 3)));
        assert_eq!(rev.poll_last_entry(), Some(("a", 1)));
        assert_eq!(rev.len(), 1);
    }

    #[test]
    fn reversed_access_moves_entry_first_in_the_view() {
        let mut map = OrderedMap::with_mode(OrderingMode::Access);
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);

        let mut rev = map.reversed();
        rev.get(&"a");
        assert_eq!(rev.first_entry(), Some((&"a", &1)));
    }

    #[test]
    fn reversed_cursor_is_fail_fast() {
        let mut map = OrderedMap::new();
        map.put("a", 1);
        map.put("b", 2);

        let mut cursor = map.reversed().cursor();
        assert_eq!(cursor.next(&map).unwrap(), Some((&"b", &2)));
        map.remove(&"a");
        assert!(cursor.next(&map).is_err());
    }

    #[test]
    fn reversed_replace_all_and_for_each_walk_newest_first() {
        let mut map = OrderedMap::new();
        map.put(1, 10);
        map.put(2, 20);

        let mut rev = map.reversed();
        let mut visited = Vec::new();
        rev.for_each(|key, value| visited.push((*key, *value)));
        assert_eq!(visited, [(2, 20), (1, 10)]);

        rev.replace_all(|key, value| key + value);
        assert_eq!(rev.peek(&1), Some(&11));
        assert_eq!(rev.peek(&2), Some(&22));
    }

    #[test]
    fn reversed_debug_renders_newest_first() {
        let mut map = OrderedMap::new();
        map.put("a", 1);
        map.put("b", 2);
        assert_eq!(format!("{:?}", map.reversed()), r#"{"b": 2, "a": 1}"#);
    }
}
