//! Role coverage evaluation.
//!
//! Scores a grouping by whether each group can staff all five core roles.
//! This is a soft objective: infeasible groupings are ranked far worse, not
//! filtered out.
//!
//! Per group and core role:
//! - no eligible member: +100
//! - more than three eligible members: +15
//!
//! and -10 per group that covers all five core roles.

use crate::roster::entry::Entry;
use crate::roster::partition::Partition;
use crate::roster::role::CORE_ROLES;

/// Penalty for a core role nobody in the group can play.
pub const UNCOVERED_PENALTY: i32 = 100;

/// Penalty for a core role more than `CROWDED_THRESHOLD` members can play.
pub const CROWDED_PENALTY: i32 = 15;

/// Eligible-member count above which a role counts as crowded.
pub const CROWDED_THRESHOLD: u8 = 3;

/// Bonus (negative penalty) for a group covering every core role.
pub const FULL_COVERAGE_BONUS: i32 = -10;

/// Eligible-member counts per core role, in `CORE_ROLES` order.
pub fn group_coverage<'a, I>(members: I) -> [u8; 5]
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut counts = [0u8; 5];
    for entry in members {
        for (i, role) in CORE_ROLES.iter().enumerate() {
            if entry.can_play(*role) {
                counts[i] += 1;
            }
        }
    }
    counts
}

/// Penalty contributed by one group's coverage counts.
pub fn group_penalty(counts: &[u8; 5]) -> i32 {
    let mut penalty = 0;
    for &c in counts {
        if c == 0 {
            penalty += UNCOVERED_PENALTY;
        } else if c > CROWDED_THRESHOLD {
            penalty += CROWDED_PENALTY;
        }
    }
    if counts.iter().all(|&c| c > 0) {
        penalty += FULL_COVERAGE_BONUS;
    }
    penalty
}

/// Total coverage penalty across groups. May be negative.
pub fn coverage_penalty<'a, I, G>(groups: I) -> i32
where
    I: IntoIterator<Item = G>,
    G: IntoIterator<Item = &'a Entry>,
{
    groups
        .into_iter()
        .map(|g| group_penalty(&group_coverage(g)))
        .sum()
}

/// Coverage penalty over a partition's active groups.
pub fn partition_penalty(partition: &Partition) -> i32 {
    coverage_penalty(
        partition
            .active_groups()
            .into_iter()
            .map(|(_, g)| g.members().iter()),
    )
}

/// Role coverage of a partition's active groups, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Slot index and eligible-member counts in `CORE_ROLES` order.
    pub groups: Vec<(usize, [u8; 5])>,
    /// Same total as `partition_penalty`.
    pub penalty: i32,
}

/// Per-group coverage counts plus the total penalty, or None with no
/// active groups.
pub fn partition_coverage(partition: &Partition) -> Option<CoverageReport> {
    let groups: Vec<(usize, [u8; 5])> = partition
        .active_groups()
        .into_iter()
        .map(|(slot, g)| (slot, group_coverage(g.members())))
        .collect();
    if groups.is_empty() {
        return None;
    }
    Some(CoverageReport {
        groups,
        penalty: partition_penalty(partition),
    })
}
