//! Error taxonomy for roster, search, and bracket operations.
//!
//! Every failure is a local validation error surfaced synchronously to the
//! caller. Nothing is retried and nothing degrades into a partial result.

use thiserror::Error;

use crate::roster::entry::EntryId;

/// Errors produced by the balancing core and the session layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BalanceError {
    #[error("unknown tier '{0}'")]
    InvalidTier(String),

    #[error("invalid role set: {0}")]
    InvalidRoleSet(String),

    #[error("capacity exceeded: {requested} entries do not fit in {capacity} slots")]
    CapacityExceeded { requested: usize, capacity: usize },

    #[error("no feasible partition found")]
    NoFeasiblePartition,

    #[error("group {winner} is not a participant of match {match_id}")]
    InvalidWinner { match_id: String, winner: usize },

    #[error("unknown match '{0}'")]
    UnknownMatch(String),

    #[error("group count {0} is out of range")]
    InvalidGroupCount(usize),

    #[error("need at least {groups} entries, have {entries}")]
    InsufficientEntries { entries: usize, groups: usize },

    #[error("unknown entry {0}")]
    UnknownEntry(EntryId),

    #[error("unknown group {0}")]
    UnknownGroup(usize),

    #[error("entry {entry} is not in group {group}")]
    EntryNotInGroup { entry: EntryId, group: usize },

    #[error("entry name must not be empty")]
    EmptyName,

    #[error("no partition has been built")]
    NoPartition,

    #[error("no bracket has been built")]
    NoBracket,

    #[error("no history record for attempt {0}")]
    UnknownRecord(u32),
}
