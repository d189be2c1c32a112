//! League standings.

use serde::{Deserialize, Serialize};

use super::Match;

/// Wins and losses for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub group: usize,
    pub wins: u32,
    pub losses: u32,
}

/// Tallies decided matches, sorted by wins descending then losses
/// ascending. Groups with equal records keep their bracket order.
pub fn standings(groups: &[usize], matches: &[Match]) -> Vec<Standing> {
    let mut table: Vec<Standing> = groups
        .iter()
        .map(|&group| Standing {
            group,
            wins: 0,
            losses: 0,
        })
        .collect();

    for m in matches {
        let (Some(winner), Some(loser)) = (m.winner, m.loser()) else {
            continue;
        };
        if let Some(s) = table.iter_mut().find(|s| s.group == winner) {
            s.wins += 1;
        }
        if let Some(s) = table.iter_mut().find(|s| s.group == loser) {
            s.losses += 1;
        }
    }

    table.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.losses.cmp(&b.losses)));
    table
}
