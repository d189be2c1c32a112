//! Roster entries.
//!
//! An entry's score is derived once from its tier and roles at creation and
//! never mutated independently afterwards.

use serde::{Deserialize, Serialize};

use super::role::{Role, RoleSet};
use super::tier::Tier;
use crate::eval::score;

/// Session-stable identifier of a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u32);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant with a tier, eligible roles, and a cached skill score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub tier: Tier,
    pub roles: RoleSet,
    pub base_score: f64,
    pub role_multiplier: f64,
    pub score: f64,
}

impl Entry {
    /// Creates an entry, computing its score from `tier` and `roles`.
    pub fn new(id: EntryId, name: impl Into<String>, tier: Tier, roles: RoleSet) -> Self {
        let base_score = score::base_score(tier);
        let role_multiplier = score::role_multiplier(&roles);
        Entry {
            id,
            name: name.into(),
            tier,
            roles,
            base_score,
            role_multiplier,
            score: base_score * role_multiplier,
        }
    }

    /// Returns true if this entry can fill `role`.
    pub fn can_play(&self, role: Role) -> bool {
        self.roles.covers(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silver_jungle_scores_4_8() {
        let e = Entry::new(EntryId(1), "a", Tier::Silver, RoleSet::single(Role::Jungle));
        assert_eq!(e.base_score, 4.0);
        assert_eq!(e.role_multiplier, 1.2);
        assert!((e.score - 4.8).abs() < 1e-9);
    }

    #[test]
    fn can_play_through_wildcard() {
        let e = Entry::new(EntryId(2), "b", Tier::Gold, RoleSet::single(Role::All));
        assert!(e.can_play(Role::Support));
        let e = Entry::new(EntryId(3), "c", Tier::Gold, RoleSet::single(Role::Top));
        assert!(e.can_play(Role::Top));
        assert!(!e.can_play(Role::Mid));
    }
}
