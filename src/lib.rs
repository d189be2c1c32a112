//! Teamforge balancer library.
//!
//! Exposes the roster model, scoring, partition search, brackets, history,
//! and protocol modules for use by integration tests and the binary entry
//! point.

pub mod bracket;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod history;
pub mod protocol;
pub mod roster;
pub mod search;
pub mod session;

pub use error::BalanceError;
pub use session::Session;
