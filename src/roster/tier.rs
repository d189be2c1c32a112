//! Skill tiers.
//!
//! Ten ordered ladder levels. Base scores grow super-linearly toward the
//! top of the ladder so that gaps between strong players weigh more.

use serde::{Deserialize, Serialize};

/// A ranked skill level, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

/// Number of tiers on the ladder.
pub const TIER_COUNT: usize = 10;

/// All tiers, weakest first.
pub const ALL_TIERS: [Tier; TIER_COUNT] = [
    Tier::Iron,
    Tier::Bronze,
    Tier::Silver,
    Tier::Gold,
    Tier::Platinum,
    Tier::Emerald,
    Tier::Diamond,
    Tier::Master,
    Tier::Grandmaster,
    Tier::Challenger,
];

/// Base score per tier, indexed by `Tier as usize`.
const BASE_SCORES: [f64; TIER_COUNT] = [1.0, 2.5, 4.0, 6.0, 8.5, 11.0, 15.0, 25.0, 35.0, 50.0];

impl Tier {
    /// Returns the base skill score for this tier.
    pub const fn base_score(self) -> f64 {
        BASE_SCORES[self as usize]
    }

    /// Returns the display label used in exports and responses.
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Iron => "아이언",
            Tier::Bronze => "브론즈",
            Tier::Silver => "실버",
            Tier::Gold => "골드",
            Tier::Platinum => "플래티넘",
            Tier::Emerald => "에메랄드",
            Tier::Diamond => "다이아",
            Tier::Master => "마스터",
            Tier::Grandmaster => "그마",
            Tier::Challenger => "챌린저",
        }
    }

    /// Parses a tier from its display label or a case-insensitive English name.
    pub fn from_label(s: &str) -> Option<Tier> {
        let s = s.trim();
        if let Some(t) = ALL_TIERS.iter().find(|t| t.label() == s) {
            return Some(*t);
        }
        match s.to_ascii_lowercase().as_str() {
            "iron" => Some(Tier::Iron),
            "bronze" => Some(Tier::Bronze),
            "silver" => Some(Tier::Silver),
            "gold" => Some(Tier::Gold),
            "platinum" | "plat" => Some(Tier::Platinum),
            "emerald" => Some(Tier::Emerald),
            "diamond" | "dia" => Some(Tier::Diamond),
            "master" => Some(Tier::Master),
            "grandmaster" | "gm" => Some(Tier::Grandmaster),
            "challenger" => Some(Tier::Challenger),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_roundtrip() {
        for t in ALL_TIERS {
            assert_eq!(Tier::from_label(t.label()), Some(t));
        }
        assert_eq!(Tier::from_label("wood"), None);
    }

    #[test]
    fn english_aliases() {
        assert_eq!(Tier::from_label("Silver"), Some(Tier::Silver));
        assert_eq!(Tier::from_label("GM"), Some(Tier::Grandmaster));
        assert_eq!(Tier::from_label(" challenger "), Some(Tier::Challenger));
    }

    #[test]
    fn base_scores_strictly_increase() {
        for pair in ALL_TIERS.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].base_score() < pair[1].base_score());
        }
        assert_eq!(Tier::Iron.base_score(), 1.0);
        assert_eq!(Tier::Silver.base_score(), 4.0);
        assert_eq!(Tier::Challenger.base_score(), 50.0);
    }
}
