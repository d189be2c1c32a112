//! Session state.
//!
//! Owns the roster, the installed partition, the history log, and the
//! bracket, and exposes every caller-facing operation. Each mutating call
//! either succeeds completely or leaves the session as it was. Any change to
//! the installed partition discards the bracket.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::bracket::{build_bracket, Bracket, MatchId, Standing};
use crate::config::BalancerConfig;
use crate::error::BalanceError;
use crate::eval::coverage::{partition_coverage, CoverageReport};
use crate::eval::score::{parse_roles, parse_tier};
use crate::history::{HistoryLog, HistoryRecord};
use crate::protocol::export::{write_csv, ExportError};
use crate::roster::entry::{Entry, EntryId};
use crate::roster::group::{Group, MAX_GROUPS};
use crate::roster::partition::{Analysis, Partition};
use crate::search::{search_parallel, SearchResult};

/// Smallest group count a session balances into.
pub const MIN_GROUPS: usize = 2;

/// Explicitly owned balancing state.
pub struct Session {
    config: BalancerConfig,
    roster: Vec<Entry>,
    next_id: u32,
    partition: Partition,
    history: HistoryLog,
    attempts: u32,
    bracket: Option<Bracket>,
    rng: SmallRng,
}

impl Session {
    /// Creates a session. A zero seed draws the RNG from entropy.
    pub fn new(config: BalancerConfig) -> Result<Self, BalanceError> {
        if config.group_count < MIN_GROUPS || config.group_count > MAX_GROUPS {
            return Err(BalanceError::InvalidGroupCount(config.group_count));
        }
        let rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        Ok(Session {
            partition: Partition::empty(config.group_count)?,
            history: HistoryLog::with_capacity(config.history_capacity),
            config,
            roster: Vec::new(),
            next_id: 1,
            attempts: 0,
            bracket: None,
            rng,
        })
    }

    /// Session with default config and a fixed seed.
    pub fn with_seed(seed: u64) -> Result<Self, BalanceError> {
        Session::new(BalancerConfig {
            seed,
            ..BalancerConfig::default()
        })
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BalancerConfig {
        &mut self.config
    }

    pub fn roster(&self) -> &[Entry] {
        &self.roster
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.roster.iter().find(|e| e.id == id)
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn group_count(&self) -> usize {
        self.partition.group_count()
    }

    /// Number of balancing runs so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Validates and adds a roster entry, returning its id.
    pub fn add_entry<S: AsRef<str>>(
        &mut self,
        name: &str,
        tier: &str,
        roles: &[S],
    ) -> Result<EntryId, BalanceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BalanceError::EmptyName);
        }
        let tier = parse_tier(tier)?;
        let roles = parse_roles(roles)?;
        let id = EntryId(self.next_id);
        self.next_id += 1;
        let entry = Entry::new(id, name, tier, roles);
        info!(id = %id, name, score = entry.score, "entry added");
        self.roster.push(entry);
        Ok(id)
    }

    /// Removes an entry from the roster and from any group.
    pub fn remove_entry(&mut self, id: EntryId) -> Result<Entry, BalanceError> {
        let idx = self
            .roster
            .iter()
            .position(|e| e.id == id)
            .ok_or(BalanceError::UnknownEntry(id))?;
        let entry = self.roster.remove(idx);
        if self.partition.remove_entry(id).is_some() {
            self.bracket = None;
        }
        Ok(entry)
    }

    /// Sets how many groups to balance into (2 to 6).
    pub fn set_group_count(&mut self, count: usize) -> Result<(), BalanceError> {
        if count < MIN_GROUPS || count > MAX_GROUPS {
            return Err(BalanceError::InvalidGroupCount(count));
        }
        self.partition.set_group_count(count)?;
        self.config.group_count = count;
        self.bracket = None;
        Ok(())
    }

    /// Runs the partition search over the roster and installs the result.
    pub fn balance(&mut self) -> Result<HistoryRecord, BalanceError> {
        let group_count = self.config.group_count;
        let result: SearchResult = search_parallel(
            &self.roster,
            group_count,
            &self.config.search(),
            &mut self.rng,
        )?;

        self.partition = result.partition;
        self.bracket = None;
        self.attempts += 1;
        let record = HistoryRecord::capture(self.attempts, &self.partition);
        self.history.push(record.clone());
        info!(
            attempt = self.attempts,
            trials = result.trials,
            objective = result.objective,
            "partition installed"
        );
        Ok(record)
    }

    /// Empties every group. The roster is kept.
    pub fn reset(&mut self) {
        self.partition.clear();
        self.bracket = None;
    }

    /// Exchanges two entries between their groups.
    pub fn swap(&mut self, a: EntryId, b: EntryId) -> Result<(), BalanceError> {
        let before_a = self.partition.locate(a);
        self.partition.swap(a, b)?;
        if self.partition.locate(a) != before_a {
            self.bracket = None;
        }
        Ok(())
    }

    /// Moves an entry from one group slot to another.
    pub fn move_entry(&mut self, id: EntryId, from: usize, to: usize) -> Result<(), BalanceError> {
        self.partition.move_entry(id, from, to)?;
        if from != to {
            self.bracket = None;
        }
        Ok(())
    }

    /// Non-empty groups among the first `group_count` slots.
    pub fn active_groups(&self) -> Vec<(usize, &Group)> {
        self.partition.active_groups()
    }

    /// Spread and per-group totals of the installed partition.
    pub fn analysis(&self) -> Option<Analysis> {
        self.partition.analysis()
    }

    /// Role coverage counts of the active groups and their total penalty.
    pub fn coverage(&self) -> Option<CoverageReport> {
        partition_coverage(&self.partition)
    }

    /// History records, newest first.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Reinstalls a copy of the partition recorded for `attempt`.
    pub fn recall(&mut self, attempt: u32) -> Result<(), BalanceError> {
        let record = self
            .history
            .get(attempt)
            .ok_or(BalanceError::UnknownRecord(attempt))?;
        self.partition = record.partition.clone();
        self.config.group_count = record.group_count;
        self.bracket = None;
        info!(attempt, "history record recalled");
        Ok(())
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Builds a bracket over the active groups.
    pub fn build_bracket(&mut self) -> Result<&Bracket, BalanceError> {
        let slots: Vec<usize> = self
            .partition
            .active_groups()
            .into_iter()
            .map(|(slot, _)| slot)
            .collect();
        if slots.is_empty() {
            return Err(BalanceError::NoPartition);
        }
        let bracket = build_bracket(&slots, &mut self.rng)?;
        Ok(self.bracket.insert(bracket))
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.bracket.as_ref()
    }

    /// Records a match winner in the current bracket.
    pub fn record_result(&mut self, id: MatchId, winner: usize) -> Result<(), BalanceError> {
        self.bracket
            .as_mut()
            .ok_or(BalanceError::NoBracket)?
            .record_result(id, winner)
    }

    /// Standings of the current bracket.
    pub fn standings(&self) -> Result<Vec<Standing>, BalanceError> {
        Ok(self.bracket.as_ref().ok_or(BalanceError::NoBracket)?.standings())
    }

    /// Writes the CSV export of the installed partition.
    pub fn export_csv<W: Write>(&self, out: &mut W) -> Result<(), ExportError> {
        write_csv(&self.partition, out, self.config.export_bom)
    }
}
