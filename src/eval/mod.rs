//! Scoring.
//!
//! Derives per-entry skill scores and evaluates how well a grouping can
//! staff every core role.

pub mod coverage;
pub mod score;

pub use coverage::{
    coverage_penalty, group_coverage, group_penalty, partition_coverage, partition_penalty,
    CoverageReport,
};
pub use score::{base_score, parse_roles, parse_tier, role_multiplier, score, score_labels};
