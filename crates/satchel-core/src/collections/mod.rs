//! Collection extension traits
//!
//! Grouping iterators into maps, multi-value map maintenance, set algebra
//! and wraparound list navigation.

pub mod dictionary;
pub mod list;
pub mod set;

pub use dictionary::{IteratorExt, MapExt, MultiMapExt, TwoLevelExt};
pub use list::{first_not_null, if_default_then, next_index, previous_index, ListExt};
pub use set::SetExt;
