//! Ordered associative map: hash-indexed entries threaded on an
//! encounter-order chain.
//!
//! [`OrderedMap`] pairs a hash index with an order list so that every entry
//! is simultaneously reachable by key in O(1) and positioned in a
//! deterministic traversal order. The order is either the order keys were
//! first inserted or the order entries were last accessed, fixed at
//! construction.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌───────────────────────────────┐
//!                 │ index: FxHashMap<K, EntryId>  │   key → stable handle
//!                 └──────────────┬────────────────┘
//!                                │
//!                                ▼
//!                 ┌───────────────────────────────┐
//!                 │ order: OrderList<Pair<K, V>>  │   owns every entry
//!                 │                               │
//!                 │  head (oldest) ◄──► ... ◄──►  │
//!                 │                tail (newest)  │
//!                 └───────────────────────────────┘
//! ```
//!
//! Every mutating operation locates (or creates) an entry through the index,
//! then updates its position in the order list according to the ordering
//! mode, then (for `put` insertions) consults the eviction policy.
//!
//! ## Key Components
//!
//! | Component        | Role                                                |
//! |------------------|-----------------------------------------------------|
//! | `OrderedMap`     | Public contract; composes index and order list      |
//! | `OrderingMode`   | `Insertion` or `Access`, immutable after build      |
//! | `EvictionPolicy` | Closure deciding whether to drop the eldest entry   |
//! | `Cursor`         | Detached fail-fast traversal handle                 |
//! | `Iter`/`Keys`/`Values` | Borrowing double-ended iterators              |
//!
//! ## Ordering Modes
//!
//! | Operation              | Insertion mode      | Access mode             |
//! |------------------------|---------------------|-------------------------|
//! | `get` / `get_mut`      | no reorder          | entry moves to tail     |
//! | `put` (existing key)   | keeps position      | entry moves to tail     |
//! | `put` (new key)        | appended at tail    | appended at tail        |
//! | `peek`                 | no reorder          | no reorder              |
//! | `put_first`/`put_last` | positioned at end   | positioned at end       |
//!
//! `put_first` and `put_last` are explicit-positioning operations: they never
//! count as accesses and never invoke the eviction policy.
//!
//! ## Example Usage
//!
//! ```
//! use seqmap::map::{OrderedMap, OrderingMode};
//!
//! let mut map = OrderedMap::with_mode(OrderingMode::Access);
//! map.put("a", 1);
//! map.put("b", 2);
//! map.put("c", 3);
//!
//! // Reading "a" promotes it to the newest end.
//! map.get(&"a");
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, ["b", "c", "a"]);
//!
//! // The eldest entry sits at the head.
//! assert_eq!(map.first_entry(), Some((&"b", &2)));
//! assert_eq!(map.poll_first_entry(), Some(("b", 2)));
//! ```
//!
//! ## Fail-Fast Traversal
//!
//! A monotonic modification counter ticks on every structural change: entry
//! creation, entry removal, `clear`, and any relocation that actually occurs
//! (access-mode promotion, explicit repositioning). Replacing a value in
//! place never ticks it. [`Cursor`] captures the counter at creation and
//! re-checks it at every step, returning
//! [`ConcurrentModificationError`](crate::error::ConcurrentModificationError)
//! on mismatch. This is a best-effort diagnostic for catching interleaved
//! mutation bugs, not a synchronization mechanism. The borrowing iterators
//! (`iter`, `keys`, `values`) hold a shared borrow for their whole lifetime,
//! so the borrow checker rules out structural change statically and they are
//! infallible.
//!
//! ## Complexity
//!
//! | Operation                        | Cost            |
//! |----------------------------------|-----------------|
//! | `get` / `put` / `remove`         | O(1) average    |
//! | `put_first` / `put_last`         | O(1) average    |
//! | `first_entry` / `poll_*_entry`   | O(1)            |
//! | `iter` / `for_each` / `replace_all` | O(n)         |
//! | `contains_value`                 | O(n)            |
//!
//! ## Thread Safety
//!
//! `OrderedMap` is a single-writer structure with no internal locking; Rust's
//! ownership rules enforce the contract (`&mut self` on every mutating
//! operation). Wrap it in external synchronization to share across threads.

use std::fmt;
use std::hash::Hash;

use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::ds::{EntryId, OrderIter, OrderList};
use crate::error::ConcurrentModificationError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::view::ReversedMap;

/// Traversal-order discipline, fixed for the map's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingMode {
    /// Entries iterate in the order their keys were first inserted.
    Insertion,
    /// Entries iterate from least to most recently accessed.
    Access,
}

/// Decides whether the eldest entry should be removed after an insertion.
///
/// Receives the eldest entry's key and value plus the post-insertion
/// population. Returning `true` removes the eldest; the default policy
/// (absent) never evicts.
pub type EvictionPolicy<K, V> = Box<dyn FnMut(&K, &V, usize) -> bool>;

struct Pair<K, V> {
    key: K,
    value: V,
}

/// Hash map with a deterministic, mutable encounter order.
pub struct OrderedMap<K, V> {
    index: FxHashMap<K, EntryId>,
    order: OrderList<Pair<K, V>>,
    mode: OrderingMode,
    mod_count: u64,
    evict: Option<EvictionPolicy<K, V>>,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty insertion-ordered map.
    pub fn new() -> Self {
        Self::with_mode(OrderingMode::Insertion)
    }

    /// Creates an empty map with the given ordering mode.
    pub fn with_mode(mode: OrderingMode) -> Self {
        Self {
            index: FxHashMap::default(),
            order: OrderList::new(),
            mode,
            mod_count: 0,
            evict: None,
        }
    }

    /// Creates an empty map with reserved capacity and the given mode.
    pub fn with_capacity(capacity: usize, mode: OrderingMode) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            order: OrderList::with_capacity(capacity),
            mode,
            mod_count: 0,
            evict: None,
        }
    }

    pub(crate) fn with_parts(
        entry_capacity: usize,
        index_capacity: usize,
        mode: OrderingMode,
        evict: Option<EvictionPolicy<K, V>>,
    ) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(index_capacity, FxBuildHasher),
            order: OrderList::with_capacity(entry_capacity),
            mode,
            mod_count: 0,
            evict,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the ordering mode fixed at construction.
    pub fn mode(&self) -> OrderingMode {
        self.mode
    }

    /// Returns the eldest entry without removing or reordering it.
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        let id = self.order.head_id()?;
        self.order.get(id).map(|pair| (&pair.key, &pair.value))
    }

    /// Returns the newest entry without removing or reordering it.
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        let id = self.order.tail_id()?;
        self.order.get(id).map(|pair| (&pair.key, &pair.value))
    }

    /// Returns a double-ended iterator over entries in encounter order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.order.iter_entries(),
        }
    }

    /// Returns a double-ended iterator over keys in encounter order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns a double-ended iterator over values in encounter order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Applies `f` to every entry in encounter order.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Rewrites every value in encounter order without reordering entries.
    ///
    /// A value rewrite is not a structural change; cursors stay valid.
    pub fn replace_all(&mut self, mut f: impl FnMut(&K, &V) -> V) {
        let mut current = self.order.head_id();
        while let Some(id) = current {
            current = self.order.after_of(id);
            if let Some(pair) = self.order.get_mut(id) {
                pair.value = f(&pair.key, &pair.value);
            }
        }
    }

    pub(crate) fn replace_all_rev(&mut self, mut f: impl FnMut(&K, &V) -> V) {
        let mut current = self.order.tail_id();
        while let Some(id) = current {
            current = self.order.before_of(id);
            if let Some(pair) = self.order.get_mut(id) {
                pair.value = f(&pair.key, &pair.value);
            }
        }
    }

    /// Creates a fail-fast cursor positioned before the eldest entry.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            next: self.order.head_id(),
            last: None,
            expected: self.mod_count,
            reverse: false,
        }
    }

    /// Creates a fail-fast cursor positioned before the newest entry,
    /// traversing towards the eldest.
    pub fn cursor_back(&self) -> Cursor {
        Cursor {
            next: self.order.tail_id(),
            last: None,
            expected: self.mod_count,
            reverse: true,
        }
    }

    /// Removes every entry. Counts as a structural change.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.mod_count += 1;
    }

    /// Returns a live reversed view of this map.
    ///
    /// The view writes through to this map; dropping it (or calling
    /// [`ReversedMap::reversed`]) hands the borrow back.
    pub fn reversed(&mut self) -> ReversedMap<'_, K, V> {
        ReversedMap::new(self)
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns the current structural-modification counter.
    pub fn modification_count(&self) -> u64 {
        self.mod_count
    }
}

impl<K: Eq + Hash, V> OrderedMap<K, V> {
    /// Returns `true` if the map contains `key`. Never counts as an access.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the value for `key` without counting as an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = self.index.get(key).copied()?;
        self.order.get(id).map(|pair| &pair.value)
    }

    /// Returns the value for `key`.
    ///
    /// In access mode this is a qualifying access: the entry moves to the
    /// newest end, and the modification counter ticks if it actually moved.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.index.get(key).copied()?;
        if self.mode == OrderingMode::Access && self.order.move_to_tail(id) {
            self.mod_count += 1;
        }
        self.order.get(id).map(|pair| &pair.value)
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// Carries the same access semantics as [`get`](Self::get).
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.index.get(key).copied()?;
        if self.mode == OrderingMode::Access && self.order.move_to_tail(id) {
            self.mod_count += 1;
        }
        self.order.get_mut(id).map(|pair| &mut pair.value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the owned entry.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.index.remove(key)?;
        let pair = self.order.unlink(id)?;
        self.mod_count += 1;
        Some((pair.key, pair.value))
    }

    /// Removes and returns the eldest entry as one logical operation.
    pub fn poll_first_entry(&mut self) -> Option<(K, V)> {
        let pair = self.order.pop_head()?;
        self.index.remove(&pair.key);
        self.mod_count += 1;
        Some((pair.key, pair.value))
    }

    /// Removes and returns the newest entry as one logical operation.
    pub fn poll_last_entry(&mut self) -> Option<(K, V)> {
        let pair = self.order.pop_tail()?;
        self.index.remove(&pair.key);
        self.mod_count += 1;
        Some((pair.key, pair.value))
    }

    pub(crate) fn remove_by_id(&mut self, id: EntryId) -> Option<(K, V)> {
        let pair = self.order.unlink(id)?;
        self.index.remove(&pair.key);
        self.mod_count += 1;
        Some((pair.key, pair.value))
    }

    fn run_eviction_policy(&mut self) {
        let population = self.order.len();
        let evict_now = match (self.evict.as_mut(), self.order.head_id()) {
            (Some(policy), Some(head)) => self
                .order
                .get(head)
                .map(|pair| policy(&pair.key, &pair.value, population))
                .unwrap_or(false),
            _ => false,
        };
        if evict_now {
            if let Some(pair) = self.order.pop_head() {
                self.index.remove(&pair.key);
                self.mod_count += 1;
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Verifies the cross-layer invariants between the index and the chain.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index population {} != order chain length {}",
                self.index.len(),
                self.order.len()
            )));
        }

        let mut walked = 0usize;
        let mut last_seen = None;
        let mut current = self.order.head_id();
        while let Some(id) = current {
            let Some(pair) = self.order.get(id) else {
                return Err(InvariantError::new("order chain references a freed entry"));
            };
            match self.index.get(&pair.key) {
                Some(&mapped) if mapped == id => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "index maps a key to a different entry than the chain holds",
                    ));
                },
                None => return Err(InvariantError::new("chain entry key missing from index")),
            }
            walked += 1;
            if walked > self.order.len() {
                return Err(InvariantError::new("order chain contains a cycle"));
            }
            last_seen = Some(id);
            current = self.order.after_of(id);
        }
        if walked != self.order.len() {
            return Err(InvariantError::new(format!(
                "forward walk visited {} entries, expected {}",
                walked,
                self.order.len()
            )));
        }
        if last_seen != self.order.tail_id() {
            return Err(InvariantError::new(
                "forward walk did not terminate at the tail",
            ));
        }

        let mut back_walked = 0usize;
        let mut current = self.order.tail_id();
        while let Some(id) = current {
            back_walked += 1;
            if back_walked > self.order.len() {
                return Err(InvariantError::new(
                    "reverse order chain contains a cycle",
                ));
            }
            current = self.order.before_of(id);
        }
        if back_walked != self.order.len() {
            return Err(InvariantError::new(format!(
                "reverse walk visited {} entries, expected {}",
                back_walked,
                self.order.len()
            )));
        }

        Ok(())
    }
}

impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
    /// Inserts or replaces the value for `key`, returning the old value.
    ///
    /// An existing key keeps its position in insertion mode and is treated
    /// as accessed in access mode. A new key is appended at the newest end;
    /// after the insertion the eviction policy, if any, is consulted with
    /// the current eldest entry and may remove it.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(id) = self.index.get(&key).copied() {
            if let Some(pair) = self.order.get_mut(id) {
                let old = std::mem::replace(&mut pair.value, value);
                if self.mode == OrderingMode::Access && self.order.move_to_tail(id) {
                    self.mod_count += 1;
                }
                return Some(old);
            }
        }
        let id = self.order.link_at_tail(Pair {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.mod_count += 1;
        self.run_eviction_policy();
        None
    }

    /// Inserts or replaces the value for `key` and positions the entry at
    /// the oldest end, returning the old value.
    ///
    /// Explicit positioning: never an access, never consults the eviction
    /// policy, regardless of mode.
    pub fn put_first(&mut self, key: K, value: V) -> Option<V> {
        if let Some(id) = self.index.get(&key).copied() {
            if let Some(pair) = self.order.get_mut(id) {
                let old = std::mem::replace(&mut pair.value, value);
                if self.order.move_to_head(id) {
                    self.mod_count += 1;
                }
                return Some(old);
            }
        }
        let id = self.order.link_at_head(Pair {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.mod_count += 1;
        None
    }

    /// Inserts or replaces the value for `key` and positions the entry at
    /// the newest end, returning the old value.
    ///
    /// Explicit positioning: never an access, never consults the eviction
    /// policy, regardless of mode.
    pub fn put_last(&mut self, key: K, value: V) -> Option<V> {
        if let Some(id) = self.index.get(&key).copied() {
            if let Some(pair) = self.order.get_mut(id) {
                let old = std::mem::replace(&mut pair.value, value);
                if self.order.move_to_tail(id) {
                    self.mod_count += 1;
                }
                return Some(old);
            }
        }
        let id = self.order.link_at_tail(Pair {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.mod_count += 1;
        None
    }
}

impl<K, V: PartialEq> OrderedMap<K, V> {
    /// Returns `true` if any entry holds `value`. O(n).
    pub fn contains_value(&self, value: &V) -> bool {
        self.order.iter().any(|pair| pair.value == *value)
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.order.iter().map(|pair| (&pair.key, &pair.value)))
            .finish()
    }
}

impl<K: Eq + Hash + Clone, V> Extend<(K, V)> for OrderedMap<K, V> {
    /// Bulk copy: each mapping is one `put`, in source order, so in access
    /// mode every copied mapping counts as an access.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Double-ended iterator over `(&K, &V)` in encounter order.
pub struct Iter<'a, K, V> {
    inner: OrderIter<'a, Pair<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, pair)| (&pair.key, &pair.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(_, pair)| (&pair.key, &pair.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Double-ended iterator over keys in encounter order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Double-ended iterator over values in encounter order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Detached fail-fast traversal handle.
///
/// A cursor does not borrow the map between steps, so the map may be mutated
/// mid-traversal; the cursor detects structural changes through the map's
/// modification counter and reports them instead of yielding stale entries.
///
/// # Example
///
/// ```
/// use seqmap::map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.put("a", 1);
/// map.put("b", 2);
///
/// let mut cursor = map.cursor();
/// assert_eq!(cursor.next(&map).unwrap(), Some((&"a", &1)));
///
/// map.remove(&"b");
/// assert!(cursor.next(&map).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    next: Option<EntryId>,
    last: Option<EntryId>,
    expected: u64,
    reverse: bool,
}

impl Cursor {
    /// Advances to the next entry.
    ///
    /// Returns `Ok(None)` once the traversal is exhausted, and an error if
    /// the map's structure changed since the cursor was created or last
    /// resynchronized.
    pub fn next<'a, K, V>(
        &mut self,
        map: &'a OrderedMap<K, V>,
    ) -> Result<Option<(&'a K, &'a V)>, ConcurrentModificationError> {
        if self.expected != map.mod_count {
            return Err(ConcurrentModificationError::new(
                "map structure changed during cursor traversal",
            ));
        }
        let Some(id) = self.next else {
            return Ok(None);
        };
        let Some(pair) = map.order.get(id) else {
            return Err(ConcurrentModificationError::new(
                "cursor position is no longer present in the map",
            ));
        };
        self.next = if self.reverse {
            map.order.before_of(id)
        } else {
            map.order.after_of(id)
        };
        self.last = Some(id);
        Ok(Some((&pair.key, &pair.value)))
    }

    /// Removes the entry last yielded by [`next`](Self::next) and
    /// resynchronizes the cursor with the map.
    ///
    /// Returns `Ok(None)` when nothing has been yielded since the last
    /// removal. Cursor-driven removal does not trip fail-fast detection.
    pub fn remove_current<K: Eq + Hash, V>(
        &mut self,
        map: &mut OrderedMap<K, V>,
    ) -> Result<Option<(K, V)>, ConcurrentModificationError> {
        if self.expected != map.mod_count {
            return Err(ConcurrentModificationError::new(
                "map structure changed during cursor traversal",
            ));
        }
        let Some(id) = self.last.take() else {
            return Ok(None);
        };
        let removed = map.remove_by_id(id);
        self.expected = map.mod_count;
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
