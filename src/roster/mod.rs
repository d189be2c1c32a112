//! Roster representation.
//!
//! Contains tiers, roles, entries, groups, and the partition that assigns
//! entries to groups.

pub mod entry;
pub mod group;
pub mod partition;
pub mod role;
pub mod tier;

pub use entry::{Entry, EntryId};
pub use group::{group_label, Group, GROUP_CAPACITY, MAX_GROUPS};
pub use partition::{round1, Analysis, Partition};
pub use role::{Role, RoleSet, ALL_ROLES, CORE_ROLES};
pub use tier::{Tier, ALL_TIERS};
