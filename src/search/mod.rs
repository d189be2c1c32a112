//! Partition search.
//!
//! Explores random partitions of the roster to find one with balanced group
//! totals and full role coverage.

pub mod partition;

pub use partition::{
    objective, search, search_parallel, SearchConfig, SearchResult, DEFAULT_GOOD_ENOUGH,
    DEFAULT_MAX_TRIALS,
};
