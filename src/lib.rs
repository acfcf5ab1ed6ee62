//! seqmap: hash map with deterministic, mutable encounter order.
//!
//! The core type is [`map::OrderedMap`]: entries are reachable by key in
//! O(1) through a hash index and simultaneously threaded on a doubly-linked
//! order chain, iterating in insertion or last-access order. On top of that
//! sit sequenced first/last operations, a live reversed view, a pluggable
//! eviction hook for building bounded caches, and fail-fast cursors.

pub mod builder;
pub mod ds;
pub mod error;
pub mod map;
pub mod prelude;
pub mod traits;
pub mod view;
