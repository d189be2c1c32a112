//! Library-level balancing scenarios.
//!
//! Drives the public API the way a caller would: build a roster, balance,
//! edit, snapshot, and run a bracket.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use teamforge::bracket::{build_bracket, MatchId};
use teamforge::config::BalancerConfig;
use teamforge::eval::coverage::coverage_penalty;
use teamforge::eval::score::score_labels;
use teamforge::roster::entry::{Entry, EntryId};
use teamforge::roster::group::GROUP_CAPACITY;
use teamforge::roster::role::{Role, RoleSet};
use teamforge::roster::tier::{Tier, ALL_TIERS};
use teamforge::search::{search, search_parallel, SearchConfig};
use teamforge::{BalanceError, Session};

fn mixed_roster(n: usize) -> Vec<Entry> {
    let roles = [Role::Top, Role::Jungle, Role::Mid, Role::Bottom, Role::Support, Role::All];
    (0..n)
        .map(|i| {
            Entry::new(
                EntryId(i as u32 + 1),
                format!("p{}", i),
                ALL_TIERS[(i * 7) % ALL_TIERS.len()],
                RoleSet::single(roles[i % roles.len()]),
            )
        })
        .collect()
}

fn session(seed: u64) -> Session {
    let config = BalancerConfig {
        seed,
        max_trials: 500,
        ..BalancerConfig::default()
    };
    Session::new(config).unwrap()
}

#[test]
fn every_entry_placed_once_for_all_group_counts() {
    let mut rng = SmallRng::seed_from_u64(99);
    let config = SearchConfig {
        max_trials: 200,
        ..SearchConfig::default()
    };
    for groups in 2..=6 {
        for n in [groups, groups * 3, groups * GROUP_CAPACITY] {
            let entries = mixed_roster(n);
            let result = search(&entries, groups, &config, &mut rng).unwrap();
            let mut seen = HashSet::new();
            for g in result.partition.slots() {
                assert!(g.len() <= GROUP_CAPACITY);
                for e in g.members() {
                    assert!(seen.insert(e.id));
                }
            }
            assert_eq!(seen.len(), n, "groups {} entries {}", groups, n);
        }
    }
}

#[test]
fn oversized_roster_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(1);
    let entries = mixed_roster(16);
    let err = search(&entries, 3, &SearchConfig::default(), &mut rng).unwrap_err();
    assert_eq!(
        err,
        BalanceError::CapacityExceeded {
            requested: 16,
            capacity: 15
        }
    );
}

#[test]
fn score_is_monotonic_in_tier() {
    for roles in [vec!["탑"], vec!["정글", "서폿"], vec!["ALL"]] {
        let scores: Vec<f64> = ALL_TIERS
            .iter()
            .map(|t| score_labels(t.label(), &roles).unwrap())
            .collect();
        assert!(scores.windows(2).all(|w| w[0] < w[1]), "{:?}", scores);
    }
    assert!((score_labels("실버", &["정글"]).unwrap() - 4.8).abs() < 1e-9);
}

#[test]
fn missing_role_dominates_spread() {
    let full: Vec<Entry> = [Role::Top, Role::Jungle, Role::Mid, Role::Bottom, Role::Support]
        .iter()
        .enumerate()
        .map(|(i, r)| Entry::new(EntryId(i as u32), "a", Tier::Gold, RoleSet::single(*r)))
        .collect();
    let missing: Vec<Entry> = [Role::Top, Role::Jungle, Role::Mid, Role::Top, Role::Support]
        .iter()
        .enumerate()
        .map(|(i, r)| Entry::new(EntryId(10 + i as u32), "b", Tier::Gold, RoleSet::single(*r)))
        .collect();
    assert_eq!(coverage_penalty([full.iter()]), -10);
    assert_eq!(coverage_penalty([missing.iter()]), 100);
    assert_eq!(coverage_penalty([full.iter(), missing.iter()]), 90);
}

#[test]
fn uniform_wildcard_roster_has_zero_spread() {
    let mut s = session(4);
    for i in 0..10 {
        s.add_entry(&format!("s{}", i), "실버", &["ALL"]).unwrap();
    }
    let record = s.balance().unwrap();
    assert_eq!(record.score_spread, 0.0);
    assert_eq!(record.per_group_scores, vec![21.0, 21.0]);
}

#[test]
fn parallel_search_places_everyone() {
    let entries = mixed_roster(24);
    let config = SearchConfig {
        max_trials: 400,
        good_enough: f64::NEG_INFINITY,
        threads: 4,
    };
    let mut rng = SmallRng::seed_from_u64(12);
    let result = search_parallel(&entries, 6, &config, &mut rng).unwrap();
    assert_eq!(result.trials, 400);
    assert_eq!(result.partition.entry_count(), 24);
    assert_eq!(result.partition.active_groups().len(), 6);
}

#[test]
fn analysis_is_idempotent() {
    let mut s = session(5);
    for i in 0..12 {
        s.add_entry(&format!("x{}", i), ALL_TIERS[i % 10].label(), &["미드"]).unwrap();
    }
    s.set_group_count(3).unwrap();
    s.balance().unwrap();
    assert_eq!(s.analysis(), s.analysis());
}

#[test]
fn recalled_record_matches_snapshot_after_edits() {
    let mut s = session(6);
    let roles = ["탑", "정글", "미드", "원딜", "서폿"];
    for i in 0..10 {
        s.add_entry(&format!("r{}", i), "골드", &[roles[i % 5]]).unwrap();
    }
    let record = s.balance().unwrap();
    let a = s.partition().group(0).unwrap().members()[0].id;
    let b = s.partition().group(1).unwrap().members()[0].id;
    s.swap(a, b).unwrap();
    assert_ne!(s.partition(), &record.partition);
    assert_eq!(s.history().get(1).unwrap().partition, record.partition);

    s.recall(1).unwrap();
    assert_eq!(s.partition(), &record.partition);
    assert_eq!(s.group_count(), record.group_count);
}

#[test]
fn tournament_final_fills_from_semifinals() {
    let mut rng = SmallRng::seed_from_u64(8);
    let mut bracket = build_bracket(&[0, 1, 2, 3], &mut rng).unwrap();
    let sf1 = bracket.get(MatchId::Semifinal1).unwrap().clone();
    let sf2 = bracket.get(MatchId::Semifinal2).unwrap().clone();
    let fin = bracket.get(MatchId::Final).unwrap();
    assert_eq!((fin.team1, fin.team2), (None, None));

    let w1 = sf1.team1.unwrap();
    bracket.record_result(MatchId::Semifinal1, w1).unwrap();
    let fin = bracket.get(MatchId::Final).unwrap();
    assert_eq!((fin.team1, fin.team2), (Some(w1), None));

    let w2 = sf2.team2.unwrap();
    bracket.record_result(MatchId::Semifinal2, w2).unwrap();
    bracket.record_result(MatchId::Final, w2).unwrap();
    assert!(bracket.is_complete());
    assert_eq!(bracket.champion(), Some(w2));
}

#[test]
fn move_into_full_group_leaves_groups_unchanged() {
    let mut s = session(9);
    for i in 0..9 {
        s.add_entry(&format!("m{}", i), "브론즈", &["ALL"]).unwrap();
    }
    s.balance().unwrap();
    let (full, partial) = if s.partition().group(0).unwrap().is_full() {
        (0, 1)
    } else {
        (1, 0)
    };
    let id = s.partition().group(partial).unwrap().members()[0].id;
    let before = s.partition().clone();
    let err = s.move_entry(id, partial, full).unwrap_err();
    assert!(matches!(err, BalanceError::CapacityExceeded { .. }));
    assert_eq!(s.partition(), &before);
}

#[test]
fn swap_cannot_reach_slots_out_of_play() {
    let mut s = session(10);
    for i in 0..9 {
        s.add_entry(&format!("h{}", i), "골드", &["ALL"]).unwrap();
    }
    s.set_group_count(3).unwrap();
    s.balance().unwrap();
    s.set_group_count(2).unwrap();

    let visible = s.partition().group(0).unwrap().members()[0].id;
    let hidden = s.partition().group(2).unwrap().members()[0].id;
    let before = s.partition().clone();
    assert_eq!(s.swap(visible, hidden), Err(BalanceError::UnknownGroup(2)));
    assert_eq!(s.move_entry(hidden, 2, 0), Err(BalanceError::UnknownGroup(2)));
    assert_eq!(s.partition(), &before);
    assert_eq!(s.active_groups().len(), 2);
}
