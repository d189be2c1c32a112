//! Randomized multi-start partition search.
//!
//! Each trial shuffles the roster, deals it round-robin into the group
//! slots, and scores the result by weighted score spread plus role coverage
//! penalty. The lowest objective wins; ties keep the earliest trial. The
//! search stops early once a trial reaches `good_enough`.
//!
//! The search is non-deterministic. Callers pass the RNG in, so
//! tests can substitute a seeded one.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::BalanceError;
use crate::eval::coverage::{group_coverage, group_penalty};
use crate::roster::entry::Entry;
use crate::roster::group::{GROUP_CAPACITY, MAX_GROUPS};
use crate::roster::partition::{min_max, Partition};

/// Default number of trials.
pub const DEFAULT_MAX_TRIALS: usize = 5000;

/// Default objective at or below which the search stops early.
pub const DEFAULT_GOOD_ENOUGH: f64 = 1.0;

/// Search limits.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub max_trials: usize,
    pub good_enough: f64,
    /// Worker count for `search_parallel`. Ignored by `search`.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_trials: DEFAULT_MAX_TRIALS,
            good_enough: DEFAULT_GOOD_ENOUGH,
            threads: 1,
        }
    }
}

/// Best partition found and how the search got there.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub partition: Partition,
    pub objective: f64,
    /// Unrounded max minus min group total.
    pub spread: f64,
    pub penalty: i32,
    /// Trials actually run.
    pub trials: usize,
    /// Zero-based index of the winning trial.
    pub best_trial: usize,
    pub early_exit: bool,
}

/// Scored trial, holding groups as indices into the roster.
#[derive(Debug, Clone)]
struct Trial {
    index: usize,
    objective: f64,
    spread: f64,
    penalty: i32,
    groups: Vec<Vec<usize>>,
}

/// Deals `order` into `group_count` groups in round-robin slot order,
/// skipping any group already at capacity.
pub(crate) fn deal<T: Clone>(order: &[T], group_count: usize) -> Result<Vec<Vec<T>>, BalanceError> {
    validate(order.len(), group_count)?;
    let mut groups: Vec<Vec<T>> = (0..group_count)
        .map(|_| Vec::with_capacity(GROUP_CAPACITY))
        .collect();
    let mut slot = 0;
    for item in order {
        while groups[slot].len() >= GROUP_CAPACITY {
            slot = (slot + 1) % group_count;
        }
        groups[slot].push(item.clone());
        slot = (slot + 1) % group_count;
    }
    Ok(groups)
}

/// Combined objective: `spread * (1 + max / 100) + penalty`.
///
/// A fixed spread weighs more when absolute scores are high.
pub fn objective(group_scores: &[f64], penalty: i32) -> (f64, f64) {
    let (min, max) = min_max(group_scores);
    let spread = max - min;
    (spread, spread * (1.0 + max / 100.0) + penalty as f64)
}

/// Checks the search preconditions.
pub fn validate(entry_count: usize, group_count: usize) -> Result<(), BalanceError> {
    if group_count == 0 || group_count > MAX_GROUPS {
        return Err(BalanceError::InvalidGroupCount(group_count));
    }
    if entry_count < group_count {
        return Err(BalanceError::InsufficientEntries {
            entries: entry_count,
            groups: group_count,
        });
    }
    let capacity = group_count * GROUP_CAPACITY;
    if entry_count > capacity {
        return Err(BalanceError::CapacityExceeded {
            requested: entry_count,
            capacity,
        });
    }
    Ok(())
}

/// Runs one trial over a freshly shuffled order.
fn run_trial<R: Rng + ?Sized>(
    entries: &[Entry],
    order: &mut [usize],
    group_count: usize,
    index: usize,
    rng: &mut R,
) -> Result<Trial, BalanceError> {
    order.shuffle(rng);
    let groups = deal(order, group_count)?;

    let mut scores = [0.0f64; MAX_GROUPS];
    let mut penalty = 0;
    for (slot, members) in groups.iter().enumerate() {
        scores[slot] = members.iter().map(|&i| entries[i].score).sum();
        penalty += group_penalty(&group_coverage(members.iter().map(|&i| &entries[i])));
    }
    let (spread, objective) = objective(&scores[..group_count], penalty);

    Ok(Trial {
        index,
        objective,
        spread,
        penalty,
        groups,
    })
}

fn into_result(
    entries: &[Entry],
    best: Option<Trial>,
    trials: usize,
    early_exit: bool,
) -> Result<SearchResult, BalanceError> {
    let best = best.ok_or(BalanceError::NoFeasiblePartition)?;
    let groups: Vec<Vec<Entry>> = best
        .groups
        .iter()
        .map(|g| g.iter().map(|&i| entries[i].clone()).collect())
        .collect();
    let partition = Partition::from_groups(groups)?;

    info!(
        trials,
        best_trial = best.index,
        objective = best.objective,
        spread = best.spread,
        penalty = best.penalty,
        early_exit,
        "partition search finished"
    );

    Ok(SearchResult {
        partition,
        objective: best.objective,
        spread: best.spread,
        penalty: best.penalty,
        trials,
        best_trial: best.index,
        early_exit,
    })
}

/// Searches for a balanced partition of `entries` into `group_count` groups.
pub fn search<R: Rng + ?Sized>(
    entries: &[Entry],
    group_count: usize,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<SearchResult, BalanceError> {
    validate(entries.len(), group_count)?;

    let mut order: Vec<usize> = (0..entries.len()).collect();
    let mut best: Option<Trial> = None;
    let mut trials = 0;
    let mut early_exit = false;

    for t in 0..config.max_trials {
        let trial = run_trial(entries, &mut order, group_count, t, rng)?;
        trials += 1;
        let done = trial.objective <= config.good_enough;

        if best.as_ref().map_or(true, |b| trial.objective < b.objective) {
            debug!(
                trial = t,
                objective = trial.objective,
                spread = trial.spread,
                penalty = trial.penalty,
                "improved"
            );
            best = Some(trial);
        }
        if done {
            early_exit = true;
            break;
        }
    }

    into_result(entries, best, trials, early_exit)
}

/// Per-worker outcome of a parallel search.
struct WorkerOutcome {
    best: Option<Trial>,
    trials: usize,
}

/// Parallel variant of [`search`].
///
/// Workers claim trial indices from a shared counter, so `max_trials` bounds
/// the total across all workers, and the first worker to reach
/// `good_enough` stops the rest. The merged best is the lowest objective,
/// ties going to the lowest trial index.
pub fn search_parallel<R: Rng + ?Sized>(
    entries: &[Entry],
    group_count: usize,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<SearchResult, BalanceError> {
    if config.threads <= 1 {
        return search(entries, group_count, config, rng);
    }
    validate(entries.len(), group_count)?;

    let seeds: Vec<u64> = (0..config.threads).map(|_| rng.gen()).collect();
    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);

    let outcomes: Vec<WorkerOutcome> = seeds
        .into_par_iter()
        .map(|seed| -> Result<WorkerOutcome, BalanceError> {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut order: Vec<usize> = (0..entries.len()).collect();
            let mut best: Option<Trial> = None;
            let mut trials = 0;
            while !stop.load(Ordering::Relaxed) {
                let t = next.fetch_add(1, Ordering::Relaxed);
                if t >= config.max_trials {
                    break;
                }
                let trial = run_trial(entries, &mut order, group_count, t, &mut rng)?;
                trials += 1;
                let done = trial.objective <= config.good_enough;
                if best.as_ref().map_or(true, |b| better(&trial, b)) {
                    best = Some(trial);
                }
                if done {
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
            }
            Ok(WorkerOutcome { best, trials })
        })
        .collect::<Result<_, _>>()?;

    let trials = outcomes.iter().map(|o| o.trials).sum();
    let best = outcomes
        .into_iter()
        .filter_map(|o| o.best)
        .reduce(|a, b| if better(&b, &a) { b } else { a });

    into_result(entries, best, trials, stop.load(Ordering::Relaxed))
}

/// Lower objective wins; equal objectives go to the earlier trial.
fn better(a: &Trial, b: &Trial) -> bool {
    a.objective < b.objective || (a.objective == b.objective && a.index < b.index)
}
