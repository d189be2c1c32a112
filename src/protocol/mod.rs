//! Line protocol handling.
//!
//! The command parser for the main loop and the CSV export format.

pub mod export;
pub mod parser;

pub use export::{write_csv, ExportError};
pub use parser::{parse_command, Command};
