//! Groups (teams) of at most five entries.

use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryId};
use crate::error::BalanceError;

/// Maximum members per group.
pub const GROUP_CAPACITY: usize = 5;

/// Number of group slots in a partition.
pub const MAX_GROUPS: usize = 6;

/// Display label for a group slot, e.g. `1팀` for slot 0.
pub fn group_label(slot: usize) -> String {
    format!("{}팀", slot + 1)
}

/// An unordered team of entries. Member order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    members: Vec<Entry>,
}

impl Group {
    pub fn new() -> Self {
        Group::default()
    }

    pub fn members(&self) -> &[Entry] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= GROUP_CAPACITY
    }

    /// Sum of member scores.
    pub fn total_score(&self) -> f64 {
        self.members.iter().map(|e| e.score).sum()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.members.iter().any(|e| e.id == id)
    }

    /// Adds a member. Fails with `CapacityExceeded` if the group is full.
    pub fn push(&mut self, entry: Entry) -> Result<(), BalanceError> {
        if self.is_full() {
            return Err(BalanceError::CapacityExceeded {
                requested: self.members.len() + 1,
                capacity: GROUP_CAPACITY,
            });
        }
        self.members.push(entry);
        Ok(())
    }

    /// Removes and returns the member with `id`, if present.
    pub fn take(&mut self, id: EntryId) -> Option<Entry> {
        let idx = self.members.iter().position(|e| e.id == id)?;
        Some(self.members.remove(idx))
    }

    pub(crate) fn replace(&mut self, id: EntryId, entry: Entry) -> Option<Entry> {
        let slot = self.members.iter_mut().find(|e| e.id == id)?;
        Some(std::mem::replace(slot, entry))
    }
}
