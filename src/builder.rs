//! Validating builder for [`OrderedMap`].
//!
//! Collects the user-configurable construction parameters — capacity, load
//! factor, ordering mode, eviction policy — and validates them before
//! building, so invalid configurations surface as a
//! [`ConfigError`](crate::error::ConfigError) instead of a panic.
//!
//! ## Example
//!
//! ```rust
//! use seqmap::builder::MapBuilder;
//!
//! let mut map = MapBuilder::<u64, String>::new()
//!     .capacity(100)
//!     .access_order()
//!     .evict_when(|_, _, population| population > 100)
//!     .try_build()
//!     .unwrap();
//! map.put(1, "hello".to_string());
//! assert_eq!(map.get(&1), Some(&"hello".to_string()));
//! ```

use crate::error::ConfigError;
use crate::map::{EvictionPolicy, OrderedMap, OrderingMode};

const DEFAULT_CAPACITY: usize = 16;
const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Builder for [`OrderedMap`] instances.
pub struct MapBuilder<K, V> {
    capacity: usize,
    load_factor: f64,
    mode: OrderingMode,
    evict: Option<EvictionPolicy<K, V>>,
}

impl<K, V> MapBuilder<K, V> {
    /// Creates a builder with the defaults: capacity 16, load factor 0.75,
    /// insertion order, no eviction.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            mode: OrderingMode::Insertion,
            evict: None,
        }
    }

    /// Sets the expected number of entries. Must be greater than zero.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the hash-index load factor. Must be finite and greater than
    /// zero; only affects how much index space is reserved up front.
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Selects the ordering mode.
    pub fn mode(mut self, mode: OrderingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(OrderingMode::Access)`.
    pub fn access_order(self) -> Self {
        self.mode(OrderingMode::Access)
    }

    /// Shorthand for `mode(OrderingMode::Insertion)`.
    pub fn insertion_order(self) -> Self {
        self.mode(OrderingMode::Insertion)
    }

    /// Installs an eviction policy consulted after every `put` insertion
    /// with the eldest entry and the post-insertion population.
    ///
    /// # Example
    ///
    /// ```rust
    /// use seqmap::builder::MapBuilder;
    ///
    /// // A map bounded at 3 entries, oldest dropped first.
    /// let mut map = MapBuilder::<u64, u64>::new()
    ///     .evict_when(|_, _, population| population > 3)
    ///     .try_build()
    ///     .unwrap();
    /// for i in 0..5 {
    ///     map.put(i, i);
    /// }
    /// assert_eq!(map.len(), 3);
    /// ```
    pub fn evict_when(mut self, policy: impl FnMut(&K, &V, usize) -> bool + 'static) -> Self {
        self.evict = Some(Box::new(policy));
        self
    }

    /// Validates the configuration and builds the map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero or the load factor is
    /// nonpositive or not finite.
    pub fn try_build(self) -> Result<OrderedMap<K, V>, ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(ConfigError::new(format!(
                "load factor must be finite and greater than zero, got {}",
                self.load_factor
            )));
        }
        let index_capacity = (self.capacity as f64 / self.load_factor).ceil() as usize;
        Ok(OrderedMap::with_parts(
            self.capacity,
            index_capacity,
            self.mode,
            self.evict,
        ))
    }
}

impl<K, V> Default for MapBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_an_insertion_ordered_map() {
        let map = MapBuilder::<u64, u64>::new().try_build().unwrap();
        assert_eq!(map.mode(), OrderingMode::Insertion);
        assert!(map.is_empty());
    }

    #[test]
    fn access_order_shorthand_sets_the_mode() {
        let map = MapBuilder::<u64, u64>::new()
            .access_order()
            .try_build()
            .unwrap();
        assert_eq!(map.mode(), OrderingMode::Access);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = MapBuilder::<u64, u64>::new()
            .capacity(0)
            .try_build()
            .unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn nonpositive_load_factor_is_rejected() {
        let err = MapBuilder::<u64, u64>::new()
            .load_factor(0.0)
            .try_build()
            .unwrap_err();
        assert!(err.to_string().contains("load factor"));

        let err = MapBuilder::<u64, u64>::new()
            .load_factor(-0.5)
            .try_build()
            .unwrap_err();
        assert!(err.to_string().contains("load factor"));
    }

    #[test]
    fn non_finite_load_factor_is_rejected() {
        assert!(MapBuilder::<u64, u64>::new()
            .load_factor(f64::NAN)
            .try_build()
            .is_err());
        assert!(MapBuilder::<u64, u64>::new()
            .load_factor(f64::INFINITY)
            .try_build()
            .is_err());
    }

    #[test]
    fn built_map_applies_the_eviction_policy() {
        let mut map = MapBuilder::<u64, &str>::new()
            .capacity(2)
            .evict_when(|_, _, population| population > 2)
            .try_build()
            .unwrap();
        map.put(1, "one");
        map.put(2, "two");
        map.put(3, "three");

        assert_eq!(map.len(), 2);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));
        assert!(map.contains_key(&3));
    }
}
