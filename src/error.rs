//! Error types for the seqmap library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. zero capacity, nonpositive load factor).
//! - [`ConcurrentModificationError`]: Returned when a cursor traversal
//!   observes that the map's structure changed since the traversal began.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use seqmap::builder::MapBuilder;
//! use seqmap::error::ConfigError;
//! use seqmap::map::OrderedMap;
//!
//! // Fallible constructor for user-configurable parameters
//! let map: Result<OrderedMap<String, i32>, ConfigError> =
//!     MapBuilder::new().capacity(100).try_build();
//! assert!(map.is_ok());
//!
//! // Invalid load factor is caught without panicking
//! let bad = MapBuilder::<String, i32>::new().load_factor(0.0).try_build();
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by [`MapBuilder::try_build`](crate::builder::MapBuilder::try_build)
/// when the requested capacity is zero or the load factor is nonpositive or
/// not finite. Carries a human-readable description of which parameter failed
/// validation.
///
/// # Example
///
/// ```
/// use seqmap::builder::MapBuilder;
///
/// let err = MapBuilder::<u64, u64>::new().capacity(0).try_build().unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// ConcurrentModificationError
// ---------------------------------------------------------------------------

/// Error returned when a traversal detects a structural change made behind
/// its back.
///
/// Produced by [`Cursor`](crate::map::Cursor) steps when the map's
/// modification counter no longer matches the value captured at cursor
/// creation. Detection is best-effort: it exists to catch bugs early, not to
/// make interleaved mutation safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcurrentModificationError(String);

impl ConcurrentModificationError {
    /// Creates a new `ConcurrentModificationError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConcurrentModificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConcurrentModificationError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal map invariants are violated.
///
/// Produced by the debug-only
/// [`OrderedMap::check_invariants`](crate::map::OrderedMap::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad load factor");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad load factor"));
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- ConcurrentModificationError --------------------------------------

    #[test]
    fn concurrent_modification_display_shows_message() {
        let err = ConcurrentModificationError::new("structure changed during traversal");
        assert_eq!(err.to_string(), "structure changed during traversal");
    }

    #[test]
    fn concurrent_modification_message_accessor() {
        let err = ConcurrentModificationError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn concurrent_modification_clone_and_eq() {
        let a = ConcurrentModificationError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn concurrent_modification_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConcurrentModificationError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("chain length mismatch");
        assert_eq!(err.to_string(), "chain length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
