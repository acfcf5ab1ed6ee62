//! Doubly-linked encounter-order chain with inline storage.
//!
//! `OrderList` owns its cells directly in a `Vec`, each cell carrying the
//! value together with its `before`/`after` links. A freed cell's index goes
//! on a free list and is recycled by the next link, so an `EntryId` stays
//! stable for the lifetime of its entry and every chain operation is an
//! index hop rather than a pointer chase. `head` is the oldest end of the
//! chain and `tail` the newest.
//!
//! ## Architecture
//!
//! ```text
//!   cells: Vec<Option<Cell<T>>>
//!   ┌───────┬────────────────────────────────────────────────┐
//!   │ index │ Cell { value, before, after }                  │
//!   ├───────┼────────────────────────────────────────────────┤
//!   │ 0     │ { value: A, before: None, after: Some(1) }     │
//!   │ 1     │ { value: B, before: Some(0), after: Some(2) }  │
//!   │ 2     │ { value: C, before: Some(1), after: None }     │
//!   │ 3     │ None                          (on free list)   │
//!   └───────┴────────────────────────────────────────────────┘
//!
//!   head (oldest) ─► [0] ◄──► [1] ◄──► [2] ◄── tail (newest)
//! ```
//!
//! ## Operations
//! - `link_at_tail` / `link_at_head`: insert at an end
//! - `move_to_tail` / `move_to_head`: splice out + reattach at an end
//! - `unlink(id)` / `pop_head` / `pop_tail`: splice out + free the cell
//!
//! All of the above are O(1); iteration is O(n) and double-ended.
//!
//! `debug_validate_invariants()` is available in debug/test builds.

/// Stable handle to an entry in an [`OrderList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Cell<T> {
    value: T,
    before: Option<EntryId>,
    after: Option<EntryId>,
}

#[derive(Debug)]
/// Doubly-linked encounter-order chain owning its cells inline.
pub struct OrderList<T> {
    cells: Vec<Option<Cell<T>>>,
    free: Vec<usize>,
    live: usize,
    head: Option<EntryId>,
    tail: Option<EntryId>,
}

impl<T> OrderList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            free: Vec::new(),
            live: 0,
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved cell capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
            head: None,
            tail: None,
        }
    }

    /// Returns the number of entries in the chain.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the id of the oldest entry.
    pub fn head_id(&self) -> Option<EntryId> {
        self.head
    }

    /// Returns the id of the newest entry.
    pub fn tail_id(&self) -> Option<EntryId> {
        self.tail
    }

    /// Returns the id of the entry after `id` (towards the tail), if any.
    pub fn after_of(&self, id: EntryId) -> Option<EntryId> {
        self.cell(id).and_then(|cell| cell.after)
    }

    /// Returns the id of the entry before `id` (towards the head), if any.
    pub fn before_of(&self, id: EntryId) -> Option<EntryId> {
        self.cell(id).and_then(|cell| cell.before)
    }

    /// Returns the value for an entry id, if present.
    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.cell(id).map(|cell| &cell.value)
    }

    /// Returns a mutable reference to an entry value, if present.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.cell_mut(id).map(|cell| &mut cell.value)
    }

    /// Inserts a new entry at the newest end and returns its `EntryId`.
    pub fn link_at_tail(&mut self, value: T) -> EntryId {
        let id = self.alloc(Cell {
            value,
            before: self.tail,
            after: None,
        });
        match self.tail {
            Some(old_tail) => {
                if let Some(cell) = self.cell_mut(old_tail) {
                    cell.after = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Inserts a new entry at the oldest end and returns its `EntryId`.
    pub fn link_at_head(&mut self, value: T) -> EntryId {
        let id = self.alloc(Cell {
            value,
            before: None,
            after: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(cell) = self.cell_mut(old_head) {
                    cell.before = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Removes the entry `id` from the chain, frees its cell, and returns
    /// the value.
    pub fn unlink(&mut self, id: EntryId) -> Option<T> {
        let cell = self.release(id)?;
        self.splice_out(cell.before, cell.after);
        Some(cell.value)
    }

    /// Removes and returns the oldest value.
    pub fn pop_head(&mut self) -> Option<T> {
        let id = self.head?;
        self.unlink(id)
    }

    /// Removes and returns the newest value.
    pub fn pop_tail(&mut self) -> Option<T> {
        let id = self.tail?;
        self.unlink(id)
    }

    /// Moves an existing entry to the newest end.
    ///
    /// Returns `true` only when the entry actually changed position; an
    /// entry already at the tail, or an id not in the list, returns `false`.
    pub fn move_to_tail(&mut self, id: EntryId) -> bool {
        if Some(id) == self.tail {
            return false;
        }
        let (before, after) = match self.cell(id) {
            Some(cell) => (cell.before, cell.after),
            None => return false,
        };
        self.splice_out(before, after);

        let old_tail = self.tail;
        if let Some(cell) = self.cell_mut(id) {
            cell.before = old_tail;
            cell.after = None;
        }
        match old_tail {
            Some(old_tail) => {
                if let Some(cell) = self.cell_mut(old_tail) {
                    cell.after = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        true
    }

    /// Moves an existing entry to the oldest end.
    ///
    /// Returns `true` only when the entry actually changed position.
    pub fn move_to_head(&mut self, id: EntryId) -> bool {
        if Some(id) == self.head {
            return false;
        }
        let (before, after) = match self.cell(id) {
            Some(cell) => (cell.before, cell.after),
            None => return false,
        };
        self.splice_out(before, after);

        let old_head = self.head;
        if let Some(cell) = self.cell_mut(id) {
            cell.before = None;
            cell.after = old_head;
        }
        match old_head {
            Some(old_head) => {
                if let Some(cell) = self.cell_mut(old_head) {
                    cell.before = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        true
    }

    /// Clears the chain and frees every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.free.clear();
        self.live = 0;
        self.head = None;
        self.tail = None;
    }

    /// Returns a double-ended iterator over values, oldest to newest.
    pub fn iter(&self) -> OrderValues<'_, T> {
        OrderValues {
            inner: self.iter_entries(),
        }
    }

    /// Returns a double-ended iterator of `(EntryId, &T)`, oldest to newest.
    pub fn iter_entries(&self) -> OrderIter<'_, T> {
        OrderIter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.live,
        }
    }

    fn cell(&self, id: EntryId) -> Option<&Cell<T>> {
        self.cells.get(id.0).and_then(|cell| cell.as_ref())
    }

    fn cell_mut(&mut self, id: EntryId) -> Option<&mut Cell<T>> {
        self.cells.get_mut(id.0).and_then(|cell| cell.as_mut())
    }

    fn alloc(&mut self, cell: Cell<T>) -> EntryId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.cells[index] = Some(cell);
            return EntryId(index);
        }
        self.cells.push(Some(cell));
        EntryId(self.cells.len() - 1)
    }

    fn release(&mut self, id: EntryId) -> Option<Cell<T>> {
        let cell = self.cells.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.live -= 1;
        Some(cell)
    }

    /// Bridges the neighbors of a removed or relocated entry to each other,
    /// updating `head`/`tail` when the gap was at an end.
    fn splice_out(&mut self, before: Option<EntryId>, after: Option<EntryId>) {
        match before {
            Some(before_id) => {
                if let Some(cell) = self.cell_mut(before_id) {
                    cell.after = after;
                }
            },
            None => self.head = after,
        }
        match after {
            Some(after_id) => {
                if let Some(cell) = self.cell_mut(after_id) {
                    cell.before = before;
                }
            },
            None => self.tail = before,
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.live, 0);
            return;
        }

        let occupied = self.cells.iter().filter(|cell| cell.is_some()).count();
        assert_eq!(occupied, self.live);
        assert_eq!(self.cells.len(), self.live + self.free.len());

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut before = None;

        while let Some(id) = current {
            assert!(seen.insert(id));
            let cell = self.cell(id).expect("cell missing");
            assert_eq!(cell.before, before);
            if let Some(after_id) = cell.after {
                let after_cell = self.cell(after_id).expect("after cell missing");
                assert_eq!(after_cell.before, Some(id));
            } else {
                assert_eq!(self.tail, Some(id));
            }

            before = Some(id);
            current = cell.after;
            count += 1;
            assert!(count <= self.live);
        }

        assert_eq!(count, self.live);
    }
}

impl<T> Default for OrderList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Double-ended iterator over `(EntryId, &T)`, oldest to newest.
pub struct OrderIter<'a, T> {
    list: &'a OrderList<T>,
    front: Option<EntryId>,
    back: Option<EntryId>,
    remaining: usize,
}

impl<'a, T> Iterator for OrderIter<'a, T> {
    type Item = (EntryId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        let cell = self.list.cell(id)?;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.front = cell.after;
        }
        Some((id, &cell.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for OrderIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        let cell = self.list.cell(id)?;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.back = cell.before;
        }
        Some((id, &cell.value))
    }
}

impl<T> ExactSizeIterator for OrderIter<'_, T> {}

/// Double-ended iterator over values, oldest to newest.
pub struct OrderValues<'a, T> {
    inner: OrderIter<'a, T>,
}

impl<'a, T> Iterator for OrderValues<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for OrderValues<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<T> ExactSizeIterator for OrderValues<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_list_basic_ops() {
        let mut list = OrderList::new();
        let a = list.link_at_head("a");
        let b = list.link_at_tail("b");
        let c = list.link_at_tail("c");

        assert_eq!(list.get(a), Some(&"a"));
        assert_eq!(list.head_id(), Some(a));
        assert_eq!(list.tail_id(), Some(c));
        assert_eq!(list.len(), 3);

        assert!(list.move_to_head(c));
        assert_eq!(list.head_id(), Some(c));
        assert_eq!(list.tail_id(), Some(b));

        assert_eq!(list.unlink(b), Some("b"));
        assert_eq!(list.len(), 2);

        assert_eq!(list.pop_head(), Some("c"));
        assert_eq!(list.pop_tail(), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.get(a), None);
    }

    #[test]
    fn order_list_recycles_freed_cells() {
        let mut list = OrderList::new();
        let a = list.link_at_tail("a");
        let b = list.link_at_tail("b");
        list.link_at_tail("c");

        // Unlinking the middle entry frees its cell; the next link reuses
        // that index while the chain order stays head-to-tail correct.
        assert_eq!(list.unlink(b), Some("b"));
        let d = list.link_at_tail("d");
        assert_eq!(d.index(), b.index());

        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec!["a", "c", "d"]);
        assert_eq!(list.get(a), Some(&"a"));
        list.debug_validate_invariants();
    }

    #[test]
    fn order_list_get_mut_rewrites_in_place() {
        let mut list = OrderList::new();
        let id = list.link_at_tail(10);
        if let Some(value) = list.get_mut(id) {
            *value = 20;
        }
        assert_eq!(list.get(id), Some(&20));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn order_list_iter_order() {
        let mut list = OrderList::new();
        list.link_at_tail(1);
        list.link_at_tail(2);
        list.link_at_tail(3);

        let forward: Vec<_> = list.iter().copied().collect();
        assert_eq!(forward, vec![1, 2, 3]);

        let backward: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(backward, vec![3, 2, 1]);
    }

    #[test]
    fn order_list_double_ended_iter_meets_in_middle() {
        let mut list = OrderList::new();
        list.link_at_tail(1);
        list.link_at_tail(2);
        list.link_at_tail(3);

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn order_list_move_reports_actual_relocation() {
        let mut list = OrderList::new();
        let a = list.link_at_tail("a");
        let b = list.link_at_tail("b");

        // Endpoint moves that change nothing report false.
        assert!(!list.move_to_tail(b));
        assert!(!list.move_to_head(a));

        assert!(list.move_to_tail(a));
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec!["b", "a"]);

        // Absent ids report false.
        list.unlink(b);
        assert!(!list.move_to_tail(b));
        assert!(!list.move_to_head(b));
    }

    #[test]
    fn order_list_single_entry_moves_are_noops() {
        let mut list = OrderList::new();
        let only = list.link_at_tail("x");
        assert_eq!(list.head_id(), list.tail_id());
        assert!(!list.move_to_tail(only));
        assert!(!list.move_to_head(only));
        list.debug_validate_invariants();
    }

    #[test]
    fn order_list_unlink_middle_and_ends() {
        let mut list = OrderList::new();
        let a = list.link_at_tail("a");
        let b = list.link_at_tail("b");
        let c = list.link_at_tail("c");

        assert_eq!(list.unlink(b), Some("b"));
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec!["a", "c"]);

        assert_eq!(list.unlink(a), Some("a"));
        assert_eq!(list.head_id(), Some(c));
        assert_eq!(list.tail_id(), Some(c));

        assert_eq!(list.unlink(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.head_id(), None);
        assert_eq!(list.tail_id(), None);
    }

    #[test]
    fn order_list_neighbor_links_stay_consistent() {
        let mut list = OrderList::new();
        let a = list.link_at_tail(1);
        let b = list.link_at_tail(2);
        let c = list.link_at_tail(3);

        assert_eq!(list.after_of(a), Some(b));
        assert_eq!(list.before_of(c), Some(b));

        list.unlink(b);
        assert_eq!(list.after_of(a), Some(c));
        assert_eq!(list.before_of(c), Some(a));
        list.debug_validate_invariants();
    }

    #[test]
    fn order_list_clear_resets_state() {
        let mut list = OrderList::new();
        let a = list.link_at_tail(1);
        list.link_at_tail(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.head_id(), None);
        assert_eq!(list.tail_id(), None);
        assert_eq!(list.pop_head(), None);
        assert_eq!(list.pop_tail(), None);
        assert_eq!(list.get(a), None);
        assert_eq!(list.unlink(a), None);
    }

    #[test]
    fn order_list_invariants_after_mixed_ops() {
        let mut list = OrderList::new();
        let a = list.link_at_tail(1);
        let b = list.link_at_head(2);
        let c = list.link_at_tail(3);
        list.move_to_head(c);
        list.move_to_tail(b);
        list.unlink(a);
        list.debug_validate_invariants();

        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec![3, 2]);
    }
}
