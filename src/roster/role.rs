//! In-game roles and role sets.
//!
//! Five core roles must be staffed in every group. The `All` wildcard marks
//! a player who can fill any of them.

use serde::{Deserialize, Serialize};

/// A position a player can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bottom,
    Support,
    All,
}

/// Number of roles including the wildcard.
pub const ROLE_COUNT: usize = 6;

/// The roles every group needs covered.
pub const CORE_ROLES: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bottom, Role::Support];

/// Every role symbol, wildcard last.
pub const ALL_ROLES: [Role; ROLE_COUNT] = [
    Role::Top,
    Role::Jungle,
    Role::Mid,
    Role::Bottom,
    Role::Support,
    Role::All,
];

impl Role {
    /// Returns the score multiplier for this role.
    pub const fn weight(self) -> f64 {
        match self {
            Role::Top => 1.0,
            Role::Jungle => 1.2,
            Role::Mid => 1.15,
            Role::Bottom => 0.95,
            Role::Support => 1.1,
            Role::All => 1.05,
        }
    }

    /// Returns the display label used in exports and responses.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Top => "탑",
            Role::Jungle => "정글",
            Role::Mid => "미드",
            Role::Bottom => "원딜",
            Role::Support => "서폿",
            Role::All => "ALL",
        }
    }

    /// Parses a role from its display label or a case-insensitive English name.
    pub fn from_label(s: &str) -> Option<Role> {
        let s = s.trim();
        if let Some(r) = ALL_ROLES.iter().find(|r| r.label() == s) {
            return Some(*r);
        }
        match s.to_ascii_lowercase().as_str() {
            "top" => Some(Role::Top),
            "jungle" | "jg" => Some(Role::Jungle),
            "mid" => Some(Role::Mid),
            "bottom" | "bot" | "adc" => Some(Role::Bottom),
            "support" | "sup" => Some(Role::Support),
            "all" | "any" | "fill" => Some(Role::All),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One or two distinct roles a player is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSet {
    primary: Role,
    secondary: Option<Role>,
}

impl RoleSet {
    /// A set holding a single role.
    pub const fn single(role: Role) -> Self {
        RoleSet {
            primary: role,
            secondary: None,
        }
    }

    /// Builds a role set from a slice. Returns None unless the slice holds
    /// one or two distinct roles.
    pub fn from_roles(roles: &[Role]) -> Option<Self> {
        match roles {
            [a] => Some(RoleSet::single(*a)),
            [a, b] if a != b => Some(RoleSet {
                primary: *a,
                secondary: Some(*b),
            }),
            _ => None,
        }
    }

    /// Iterates the roles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        std::iter::once(self.primary).chain(self.secondary)
    }

    pub fn len(&self) -> usize {
        if self.secondary.is_some() {
            2
        } else {
            1
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, role: Role) -> bool {
        self.primary == role || self.secondary == Some(role)
    }

    /// Returns true if the holder can play `role`, directly or via the wildcard.
    pub fn covers(&self, role: Role) -> bool {
        self.contains(role) || self.contains(Role::All)
    }

    /// Labels joined by `/`, e.g. `정글/미드`.
    pub fn joined(&self) -> String {
        self.iter().map(Role::label).collect::<Vec<_>>().join("/")
    }
}
