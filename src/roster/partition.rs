//! Partitions: a complete assignment of entries to group slots.
//!
//! A partition owns a fixed array of `MAX_GROUPS` slots plus the number of
//! slots in play. Unused slots are empty groups. Manual edits (`swap`,
//! `move_entry`) validate fully before mutating, so a failed edit leaves the
//! partition untouched.

use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryId};
use super::group::{Group, GROUP_CAPACITY, MAX_GROUPS};
use crate::error::BalanceError;

/// Rounds to one decimal place for display.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Score summary of the active groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Max minus min group total, rounded to one decimal.
    pub score_spread: f64,
    /// Per active group totals in slot order, rounded to one decimal.
    pub per_group_scores: Vec<f64>,
}

/// Assignment of entries to group slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    groups: [Group; MAX_GROUPS],
    group_count: usize,
}

impl Default for Partition {
    /// Two empty groups.
    fn default() -> Self {
        Partition {
            groups: Default::default(),
            group_count: 2,
        }
    }
}

impl Partition {
    /// Creates a partition with `group_count` empty slots in play.
    pub fn empty(group_count: usize) -> Result<Self, BalanceError> {
        if group_count == 0 || group_count > MAX_GROUPS {
            return Err(BalanceError::InvalidGroupCount(group_count));
        }
        Ok(Partition {
            groups: Default::default(),
            group_count,
        })
    }

    /// Builds a partition from dealt groups, one per slot in order.
    pub fn from_groups(groups: Vec<Vec<Entry>>) -> Result<Self, BalanceError> {
        let mut partition = Partition::empty(groups.len())?;
        for (slot, members) in groups.into_iter().enumerate() {
            for entry in members {
                partition.groups[slot].push(entry)?;
            }
        }
        Ok(partition)
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Changes the number of slots in play. Members of slots beyond the new
    /// count are kept but no longer reported as active.
    pub fn set_group_count(&mut self, group_count: usize) -> Result<(), BalanceError> {
        if group_count == 0 || group_count > MAX_GROUPS {
            return Err(BalanceError::InvalidGroupCount(group_count));
        }
        self.group_count = group_count;
        Ok(())
    }

    pub fn group(&self, slot: usize) -> Option<&Group> {
        self.groups.get(slot)
    }

    /// All slots, including unused ones.
    pub fn slots(&self) -> &[Group; MAX_GROUPS] {
        &self.groups
    }

    /// Non-empty groups among the first `group_count` slots, in slot order.
    pub fn active_groups(&self) -> Vec<(usize, &Group)> {
        self.groups
            .iter()
            .enumerate()
            .take(self.group_count)
            .filter(|(_, g)| !g.is_empty())
            .collect()
    }

    /// Total number of assigned entries across all slots.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Slot index holding `id`.
    pub fn locate(&self, id: EntryId) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(id))
    }

    /// Exchanges two entries between their groups. Entries already in the
    /// same group are left as they are. Both must sit in slots in play.
    pub fn swap(&mut self, a: EntryId, b: EntryId) -> Result<(), BalanceError> {
        let ga = self.locate(a).ok_or(BalanceError::UnknownEntry(a))?;
        let gb = self.locate(b).ok_or(BalanceError::UnknownEntry(b))?;
        for slot in [ga, gb] {
            if slot >= self.group_count {
                return Err(BalanceError::UnknownGroup(slot));
            }
        }
        if ga == gb {
            return Ok(());
        }
        let ea = self.member(ga, a)?;
        let eb = self.member(gb, b)?;
        self.groups[ga].replace(a, eb);
        self.groups[gb].replace(b, ea);
        Ok(())
    }

    /// Moves an entry from one group slot to another.
    pub fn move_entry(&mut self, id: EntryId, from: usize, to: usize) -> Result<(), BalanceError> {
        if from >= self.group_count {
            return Err(BalanceError::UnknownGroup(from));
        }
        if to >= self.group_count {
            return Err(BalanceError::UnknownGroup(to));
        }
        if !self.groups[from].contains(id) {
            return Err(BalanceError::EntryNotInGroup {
                entry: id,
                group: from,
            });
        }
        if from == to {
            return Ok(());
        }
        if self.groups[to].is_full() {
            return Err(BalanceError::CapacityExceeded {
                requested: self.groups[to].len() + 1,
                capacity: GROUP_CAPACITY,
            });
        }
        let entry = self.groups[from]
            .take(id)
            .ok_or(BalanceError::EntryNotInGroup {
                entry: id,
                group: from,
            })?;
        self.groups[to].push(entry)
    }

    /// Empties every slot, keeping the group count.
    pub fn clear(&mut self) {
        self.groups = Default::default();
    }

    /// Purges an entry from whichever group holds it.
    pub fn remove_entry(&mut self, id: EntryId) -> Option<Entry> {
        self.groups.iter_mut().find_map(|g| g.take(id))
    }

    /// Totals of the active groups in slot order.
    pub fn group_scores(&self) -> Vec<f64> {
        self.active_groups()
            .iter()
            .map(|(_, g)| g.total_score())
            .collect()
    }

    /// Rounded spread and per-group totals, or None with no active groups.
    pub fn analysis(&self) -> Option<Analysis> {
        let scores = self.group_scores();
        if scores.is_empty() {
            return None;
        }
        let (min, max) = min_max(&scores);
        Some(Analysis {
            score_spread: round1(max - min),
            per_group_scores: scores.into_iter().map(round1).collect(),
        })
    }

    fn member(&self, slot: usize, id: EntryId) -> Result<Entry, BalanceError> {
        self.groups[slot]
            .members()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(BalanceError::UnknownEntry(id))
    }
}

/// Minimum and maximum of a non-empty slice.
pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
