pub use crate::builder::MapBuilder;
pub use crate::ds::{EntryId, OrderList};
pub use crate::error::{ConcurrentModificationError, ConfigError, InvariantError};
pub use crate::map::{Cursor, EvictionPolicy, OrderedMap, OrderingMode};
pub use crate::traits::SequencedMap;
pub use crate::view::ReversedMap;
