//! Match brackets over finalized groups.
//!
//! The bracket shape depends on how many groups are playing:
//!
//! | groups | kind            | matches                                  |
//! |--------|-----------------|------------------------------------------|
//! | 2      | `single`        | one final                                |
//! | 3      | `round_robin_3` | (0,1), (1,2), (0,2)                      |
//! | 4      | `tournament_4`  | sf1 (0,1), sf2 (2,3), final of winners   |
//! | 5, 6   | `round_robin`   | every pair once, in shuffled order       |
//!
//! Groups are referenced by slot index. Each match moves from pending to
//! decided when a winner is recorded; the winner must be one of its two
//! participants.

pub mod builder;
pub mod standings;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::BalanceError;

pub use builder::build_bracket;
pub use standings::{standings, Standing};

/// Bracket shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketKind {
    Single,
    RoundRobin3,
    Tournament4,
    RoundRobin,
}

impl BracketKind {
    pub const fn label(self) -> &'static str {
        match self {
            BracketKind::Single => "single",
            BracketKind::RoundRobin3 => "round_robin_3",
            BracketKind::Tournament4 => "tournament_4",
            BracketKind::RoundRobin => "round_robin",
        }
    }

    /// Whether the bracket ends in a final that names a champion.
    pub const fn has_final(self) -> bool {
        matches!(self, BracketKind::Single | BracketKind::Tournament4)
    }
}

impl std::fmt::Display for BracketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies a match within its bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchId {
    /// League match, numbered from 1.
    Round(u32),
    Semifinal1,
    Semifinal2,
    Final,
}

impl MatchId {
    /// Parses `final`, `sf1`, `sf2`, or a league match number.
    pub fn parse(s: &str) -> Option<MatchId> {
        match s.trim() {
            "final" => Some(MatchId::Final),
            "sf1" => Some(MatchId::Semifinal1),
            "sf2" => Some(MatchId::Semifinal2),
            other => other.parse::<u32>().ok().filter(|n| *n > 0).map(MatchId::Round),
        }
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchId::Round(n) => write!(f, "{}", n),
            MatchId::Semifinal1 => f.write_str("sf1"),
            MatchId::Semifinal2 => f.write_str("sf2"),
            MatchId::Final => f.write_str("final"),
        }
    }
}

/// Lifecycle of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Pending,
    Decided,
}

/// A match between two group slots. A tournament final starts with both
/// participant slots unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub team1: Option<usize>,
    pub team2: Option<usize>,
    pub winner: Option<usize>,
}

impl Match {
    pub(crate) fn new(id: MatchId, team1: Option<usize>, team2: Option<usize>) -> Self {
        Match {
            id,
            team1,
            team2,
            winner: None,
        }
    }

    pub fn state(&self) -> MatchState {
        if self.winner.is_some() {
            MatchState::Decided
        } else {
            MatchState::Pending
        }
    }

    /// True once both participants are known.
    pub fn is_ready(&self) -> bool {
        self.team1.is_some() && self.team2.is_some()
    }

    pub fn involves(&self, group: usize) -> bool {
        self.team1 == Some(group) || self.team2 == Some(group)
    }

    /// The participant that did not win, if decided.
    pub fn loser(&self) -> Option<usize> {
        let winner = self.winner?;
        if self.team1 == Some(winner) {
            self.team2
        } else {
            self.team1
        }
    }
}

/// A match schedule with recorded results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    kind: BracketKind,
    /// Participating group slots in shuffled order.
    groups: Vec<usize>,
    matches: Vec<Match>,
}

impl Bracket {
    pub(crate) fn new(kind: BracketKind, groups: Vec<usize>, matches: Vec<Match>) -> Self {
        Bracket {
            kind,
            groups,
            matches,
        }
    }

    pub fn kind(&self) -> BracketKind {
        self.kind
    }

    pub fn groups(&self) -> &[usize] {
        &self.groups
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Records `winner` as the result of match `id`.
    ///
    /// In a four-group tournament a semifinal result also seeds the final:
    /// sf1 fills `team1`, sf2 fills `team2`. Re-deciding a semifinal replaces
    /// that slot and clears a final result that no longer fits.
    pub fn record_result(&mut self, id: MatchId, winner: usize) -> Result<(), BalanceError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| BalanceError::UnknownMatch(id.to_string()))?;
        if !self.matches[idx].involves(winner) {
            return Err(BalanceError::InvalidWinner {
                match_id: id.to_string(),
                winner,
            });
        }
        self.matches[idx].winner = Some(winner);
        info!(match_id = %id, winner, "match result recorded");

        if self.kind == BracketKind::Tournament4 {
            if let Some(fin) = self.matches.iter_mut().find(|m| m.id == MatchId::Final) {
                match id {
                    MatchId::Semifinal1 => fin.team1 = Some(winner),
                    MatchId::Semifinal2 => fin.team2 = Some(winner),
                    _ => {}
                }
                if let Some(w) = fin.winner {
                    if !fin.involves(w) {
                        fin.winner = None;
                    }
                }
            }
        }
        Ok(())
    }

    /// True when every match has a winner. Advisory for league formats.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| m.winner.is_some())
    }

    /// Winner of the final, for formats that have one.
    pub fn champion(&self) -> Option<usize> {
        if !self.kind.has_final() {
            return None;
        }
        self.get(MatchId::Final).and_then(|m| m.winner)
    }

    /// Win/loss table over the results recorded so far.
    pub fn standings(&self) -> Vec<Standing> {
        standings(&self.groups, &self.matches)
    }
}
