//! Bracket construction.
//!
//! The participating groups are shuffled first, in every format. League
//! formats with five or six groups additionally shuffle the match order.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use super::{Bracket, BracketKind, Match, MatchId};
use crate::error::BalanceError;
use crate::roster::group::MAX_GROUPS;

/// Builds a bracket over the given group slots (2 to 6 of them).
pub fn build_bracket<R: Rng + ?Sized>(groups: &[usize], rng: &mut R) -> Result<Bracket, BalanceError> {
    if groups.len() < 2 || groups.len() > MAX_GROUPS {
        return Err(BalanceError::InvalidGroupCount(groups.len()));
    }

    let mut order = groups.to_vec();
    order.shuffle(rng);

    let (kind, matches) = match order.len() {
        2 => (
            BracketKind::Single,
            vec![Match::new(MatchId::Final, Some(order[0]), Some(order[1]))],
        ),
        3 => (
            BracketKind::RoundRobin3,
            vec![
                Match::new(MatchId::Round(1), Some(order[0]), Some(order[1])),
                Match::new(MatchId::Round(2), Some(order[1]), Some(order[2])),
                Match::new(MatchId::Round(3), Some(order[0]), Some(order[2])),
            ],
        ),
        4 => (
            BracketKind::Tournament4,
            vec![
                Match::new(MatchId::Semifinal1, Some(order[0]), Some(order[1])),
                Match::new(MatchId::Semifinal2, Some(order[2]), Some(order[3])),
                Match::new(MatchId::Final, None, None),
            ],
        ),
        _ => {
            let mut pairs = Vec::with_capacity(order.len() * (order.len() - 1) / 2);
            for i in 0..order.len() {
                for j in i + 1..order.len() {
                    pairs.push((order[i], order[j]));
                }
            }
            pairs.shuffle(rng);
            let matches = pairs
                .into_iter()
                .zip(1u32..)
                .map(|((a, b), n)| Match::new(MatchId::Round(n), Some(a), Some(b)))
                .collect();
            (BracketKind::RoundRobin, matches)
        }
    };

    info!(kind = %kind, groups = order.len(), "bracket built");
    Ok(Bracket::new(kind, order, matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(17)
    }

    #[test]
    fn rejects_bad_group_counts() {
        assert_eq!(
            build_bracket(&[0], &mut rng()),
            Err(BalanceError::InvalidGroupCount(1))
        );
        assert_eq!(
            build_bracket(&[0, 1, 2, 3, 4, 5, 6], &mut rng()),
            Err(BalanceError::InvalidGroupCount(7))
        );
    }

    #[test]
    fn two_groups_single_match() {
        let b = build_bracket(&[0, 1], &mut rng()).unwrap();
        assert_eq!(b.kind(), BracketKind::Single);
        assert_eq!(b.matches().len(), 1);
        let m = &b.matches()[0];
        assert!(m.is_ready());
        assert!(m.involves(0) && m.involves(1));
    }

    #[test]
    fn three_groups_fixed_pairing() {
        let b = build_bracket(&[0, 1, 2], &mut rng()).unwrap();
        assert_eq!(b.kind(), BracketKind::RoundRobin3);
        let o = b.groups();
        let pairs: Vec<_> = b.matches().iter().map(|m| (m.id, m.team1, m.team2)).collect();
        assert_eq!(
            pairs,
            vec![
                (MatchId::Round(1), Some(o[0]), Some(o[1])),
                (MatchId::Round(2), Some(o[1]), Some(o[2])),
                (MatchId::Round(3), Some(o[0]), Some(o[2])),
            ]
        );
    }

    #[test]
    fn four_groups_two_semis_and_empty_final() {
        let b = build_bracket(&[0, 1, 2, 3], &mut rng()).unwrap();
        assert_eq!(b.kind(), BracketKind::Tournament4);
        let o = b.groups();
        let sf1 = b.get(MatchId::Semifinal1).unwrap();
        let sf2 = b.get(MatchId::Semifinal2).unwrap();
        assert_eq!((sf1.team1, sf1.team2), (Some(o[0]), Some(o[1])));
        assert_eq!((sf2.team1, sf2.team2), (Some(o[2]), Some(o[3])));
        let fin = b.get(MatchId::Final).unwrap();
        assert_eq!((fin.team1, fin.team2, fin.winner), (None, None, None));
        assert_eq!(b.matches().len(), 3);
    }

    #[test]
    fn league_covers_every_pair_once() {
        for n in [5usize, 6] {
            let groups: Vec<usize> = (0..n).collect();
            let b = build_bracket(&groups, &mut rng()).unwrap();
            assert_eq!(b.kind(), BracketKind::RoundRobin);
            assert_eq!(b.matches().len(), n * (n - 1) / 2);
            let mut seen = HashSet::new();
            for (i, m) in b.matches().iter().enumerate() {
                assert_eq!(m.id, MatchId::Round(i as u32 + 1));
                let (a, c) = (m.team1.unwrap(), m.team2.unwrap());
                assert_ne!(a, c);
                assert!(seen.insert((a.min(c), a.max(c))));
            }
        }
    }

    #[test]
    fn shuffle_keeps_same_groups() {
        let b = build_bracket(&[1, 3, 4, 5], &mut rng()).unwrap();
        let mut g = b.groups().to_vec();
        g.sort_unstable();
        assert_eq!(g, vec![1, 3, 4, 5]);
    }
}
