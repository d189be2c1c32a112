//! Bounded log of past balancing results.
//!
//! Records are value snapshots: each holds its own copy of the partition,
//! so later edits to the live partition never show through.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roster::partition::{round1, Partition};

/// Default number of records kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Snapshot of one balancing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    /// 1-based balancing attempt number within the session.
    pub attempt: u32,
    pub partition: Partition,
    pub group_count: usize,
    /// Rounded to one decimal.
    pub score_spread: f64,
    /// Rounded to one decimal, one per active group.
    pub per_group_scores: Vec<f64>,
}

impl HistoryRecord {
    /// Snapshots `partition` as the result of `attempt`.
    pub fn capture(attempt: u32, partition: &Partition) -> Self {
        let analysis = partition.analysis();
        HistoryRecord {
            timestamp: Utc::now(),
            attempt,
            partition: partition.clone(),
            group_count: partition.group_count(),
            score_spread: analysis.as_ref().map_or(0.0, |a| a.score_spread),
            per_group_scores: analysis
                .map(|a| a.per_group_scores)
                .unwrap_or_default()
                .into_iter()
                .map(round1)
                .collect(),
        }
    }
}

/// Most-recent-first ring buffer of history records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLog {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        HistoryLog::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    pub fn with_capacity(capacity: usize) -> Self {
        HistoryLog {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds a record at the front, dropping the oldest beyond capacity.
    pub fn push(&mut self, record: HistoryRecord) {
        if self.capacity == 0 {
            return;
        }
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }

    /// Records, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.front()
    }

    /// Finds the record for a given attempt number.
    pub fn get(&self, attempt: u32) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.attempt == attempt)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::entry::{Entry, EntryId};
    use crate::roster::role::{Role, RoleSet};
    use crate::roster::tier::Tier;

    fn partition(seed: u32) -> Partition {
        let e = |i: u32| Entry::new(EntryId(i), format!("p{}", i), Tier::Gold, RoleSet::single(Role::Mid));
        Partition::from_groups(vec![vec![e(seed), e(seed + 1)], vec![e(seed + 2)]]).unwrap()
    }

    #[test]
    fn keeps_most_recent_ten() {
        let mut log = HistoryLog::default();
        for attempt in 1..=12 {
            log.push(HistoryRecord::capture(attempt, &partition(attempt * 10)));
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.latest().map(|r| r.attempt), Some(12));
        assert!(log.get(2).is_none());
        assert!(log.get(3).is_some());
        let attempts: Vec<u32> = log.iter().map(|r| r.attempt).collect();
        assert_eq!(attempts, (3..=12).rev().collect::<Vec<_>>());
    }

    #[test]
    fn snapshot_does_not_alias_live_partition() {
        let mut live = partition(0);
        let record = HistoryRecord::capture(1, &live);
        live.move_entry(EntryId(2), 1, 0).unwrap();
        assert_eq!(record.partition.locate(EntryId(2)), Some(1));
        assert_eq!(record.group_count, 2);
        assert_eq!(record.per_group_scores, vec![13.8, 6.9]);
        assert_eq!(record.score_spread, 6.9);
    }

    #[test]
    fn json_snapshot_restores_memberships() {
        let record = HistoryRecord::capture(4, &partition(0));
        let json = serde_json::to_string(&record).unwrap();
        let back: HistoryRecord = serde_json::from_str(&json).unwrap();
        let ids = |p: &Partition| -> Vec<Vec<EntryId>> {
            p.slots()
                .iter()
                .map(|g| g.members().iter().map(|e| e.id).collect())
                .collect()
        };
        assert_eq!(ids(&back.partition), ids(&record.partition));
        assert_eq!(back.group_count, 2);
        assert_eq!(back.attempt, 4);
    }

    #[test]
    fn clear_empties_log() {
        let mut log = HistoryLog::with_capacity(3);
        log.push(HistoryRecord::capture(1, &partition(0)));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), 3);
    }
}
