//! Skill score model.
//!
//! `score = base_score(tier) * role_multiplier(roles)`. No rounding happens
//! here; display layers round to one decimal.

use crate::error::BalanceError;
use crate::roster::role::{Role, RoleSet};
use crate::roster::tier::Tier;

/// Base score for a tier.
pub fn base_score(tier: Tier) -> f64 {
    tier.base_score()
}

/// Highest role weight in the set.
pub fn role_multiplier(roles: &RoleSet) -> f64 {
    roles.iter().map(Role::weight).fold(f64::MIN, f64::max)
}

/// Skill score for a tier and role set.
pub fn score(tier: Tier, roles: &RoleSet) -> f64 {
    base_score(tier) * role_multiplier(roles)
}

/// Parses a tier label, failing with `InvalidTier`.
pub fn parse_tier(label: &str) -> Result<Tier, BalanceError> {
    Tier::from_label(label).ok_or_else(|| BalanceError::InvalidTier(label.to_string()))
}

/// Parses one or two distinct role labels, failing with `InvalidRoleSet`.
pub fn parse_roles<S: AsRef<str>>(labels: &[S]) -> Result<RoleSet, BalanceError> {
    if labels.is_empty() {
        return Err(BalanceError::InvalidRoleSet("no roles given".to_string()));
    }
    let mut roles = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.as_ref();
        let role = Role::from_label(label)
            .ok_or_else(|| BalanceError::InvalidRoleSet(format!("unknown role '{}'", label)))?;
        roles.push(role);
    }
    RoleSet::from_roles(&roles).ok_or_else(|| {
        BalanceError::InvalidRoleSet(format!(
            "expected 1 or 2 distinct roles, got {}",
            roles.len()
        ))
    })
}

/// Scores a tier label and role labels as submitted by the input form.
pub fn score_labels<S: AsRef<str>>(tier: &str, roles: &[S]) -> Result<f64, BalanceError> {
    let tier = parse_tier(tier)?;
    let roles = parse_roles(roles)?;
    Ok(score(tier, &roles))
}
