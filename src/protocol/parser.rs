//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the main loop can dispatch on. Group numbers are 1-based on the wire and
//! 0-based slot indices once parsed.

use tracing::warn;

use crate::bracket::MatchId;
use crate::roster::entry::EntryId;

/// A parsed client-to-balancer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a roster entry: `add <tier> <role[/role]> <name...>`.
    Add {
        tier: String,
        roles: Vec<String>,
        name: String,
    },

    /// Remove a roster entry and purge it from its group.
    Remove { id: EntryId },

    /// Set the number of groups to balance into.
    Groups { count: usize },

    /// Run the partition search.
    Balance,

    /// Empty every group, keeping the roster.
    Reset,

    /// Print the active groups.
    Show,

    /// Print the roster.
    Roster,

    /// Print the score analysis.
    Analysis,

    /// Print per-group role coverage.
    Coverage,

    /// Exchange two entries between their groups.
    Swap { a: EntryId, b: EntryId },

    /// Move an entry between group slots.
    Move { id: EntryId, from: usize, to: usize },

    /// Print the history log.
    History,

    /// Print the history log as JSON lines.
    DumpHistory,

    /// Reinstall the partition recorded for an attempt.
    Recall { attempt: u32 },

    /// Drop every history record.
    ClearHistory,

    /// Build a bracket over the active groups.
    Bracket,

    /// Record a match winner.
    Result { match_id: MatchId, group: usize },

    /// Print league standings.
    Standings,

    /// Write the CSV export.
    Export,

    /// Set an option: `setoption name <id> value <x>`.
    SetOption { name: String, value: String },

    /// Synchronization ping; the balancer replies `readyok`.
    IsReady,

    /// Terminate the process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "balance" => Some(Command::Balance),
        "reset" => Some(Command::Reset),
        "show" => Some(Command::Show),
        "roster" => Some(Command::Roster),
        "analysis" => Some(Command::Analysis),
        "coverage" => Some(Command::Coverage),
        "history" => Some(Command::History),
        "clearhistory" => Some(Command::ClearHistory),
        "dumphistory" => Some(Command::DumpHistory),
        "bracket" => Some(Command::Bracket),
        "standings" => Some(Command::Standings),
        "export" => Some(Command::Export),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),

        "add" => parse_add(&tokens),
        "remove" => parse_remove(&tokens),
        "groups" => parse_groups(&tokens),
        "swap" => parse_swap(&tokens),
        "move" => parse_move(&tokens),
        "recall" => parse_recall(&tokens),
        "result" => parse_result(&tokens),
        "setoption" => parse_setoption(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

fn parse_entry_id(token: &str) -> Option<EntryId> {
    match token.parse::<u32>() {
        Ok(v) => Some(EntryId(v)),
        Err(_) => {
            warn!("invalid entry id: '{}'", token);
            None
        }
    }
}

/// Parses a 1-based group number into a slot index.
fn parse_group(token: &str) -> Option<usize> {
    match token.parse::<usize>() {
        Ok(v) if v > 0 => Some(v - 1),
        _ => {
            warn!("invalid group number: '{}'", token);
            None
        }
    }
}

/// Parses `add <tier> <role[/role]> <name...>`.
fn parse_add(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 4 {
        warn!("malformed add: expected 'add <tier> <role[/role]> <name>'");
        return None;
    }
    let roles = tokens[2].split('/').map(str::to_string).collect();
    Some(Command::Add {
        tier: tokens[1].to_string(),
        roles,
        name: tokens[3..].join(" "),
    })
}

/// Parses `remove <id>`.
fn parse_remove(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!("malformed remove: expected 'remove <id>'");
        return None;
    }
    parse_entry_id(tokens[1]).map(|id| Command::Remove { id })
}

/// Parses `groups <n>`.
fn parse_groups(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!("malformed groups: expected 'groups <n>'");
        return None;
    }
    match tokens[1].parse::<usize>() {
        Ok(count) => Some(Command::Groups { count }),
        Err(_) => {
            warn!("invalid group count: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `swap <id> <id>`.
fn parse_swap(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        warn!("malformed swap: expected 'swap <id> <id>'");
        return None;
    }
    let a = parse_entry_id(tokens[1])?;
    let b = parse_entry_id(tokens[2])?;
    Some(Command::Swap { a, b })
}

/// Parses `move <id> <from> <to>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        warn!("malformed move: expected 'move <id> <from> <to>'");
        return None;
    }
    let id = parse_entry_id(tokens[1])?;
    let from = parse_group(tokens[2])?;
    let to = parse_group(tokens[3])?;
    Some(Command::Move { id, from, to })
}

/// Parses `recall <attempt>`.
fn parse_recall(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!("malformed recall: expected 'recall <attempt>'");
        return None;
    }
    match tokens[1].parse::<u32>() {
        Ok(attempt) => Some(Command::Recall { attempt }),
        Err(_) => {
            warn!("invalid attempt: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `result <match> <group>`.
fn parse_result(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        warn!("malformed result: expected 'result <match> <group>'");
        return None;
    }
    let match_id = match MatchId::parse(tokens[1]) {
        Some(id) => id,
        None => {
            warn!("invalid match id: '{}'", tokens[1]);
            return None;
        }
    };
    let group = parse_group(tokens[2])?;
    Some(Command::Result { match_id, group })
}

/// Parses `setoption name <id> value <x>`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 5 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> value <x>'");
        return None;
    }
    let value_idx = tokens.iter().position(|&t| t == "value")?;
    let name_parts = &tokens[2..value_idx];
    let value_parts = &tokens[value_idx + 1..];
    if name_parts.is_empty() || value_parts.is_empty() {
        warn!("malformed setoption: empty name or value");
        return None;
    }
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value: value_parts.join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("balance"), Some(Command::Balance));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("clearhistory"), Some(Command::ClearHistory));
        assert_eq!(parse_command("dumphistory"), Some(Command::DumpHistory));
        assert_eq!(parse_command("coverage"), Some(Command::Coverage));
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_add_with_two_roles_and_spaced_name() {
        assert_eq!(
            parse_command("add 실버 정글/미드 Lee Sang"),
            Some(Command::Add {
                tier: "실버".to_string(),
                roles: vec!["정글".to_string(), "미드".to_string()],
                name: "Lee Sang".to_string(),
            })
        );
    }

    #[test]
    fn parse_add_missing_name() {
        assert_eq!(parse_command("add gold top"), None);
    }

    #[test]
    fn parse_move_converts_to_slots() {
        assert_eq!(
            parse_command("move 7 1 3"),
            Some(Command::Move {
                id: EntryId(7),
                from: 0,
                to: 2
            })
        );
        assert_eq!(parse_command("move 7 0 3"), None);
        assert_eq!(parse_command("move x 1 3"), None);
    }

    #[test]
    fn parse_swap_and_remove() {
        assert_eq!(
            parse_command("swap 1 2"),
            Some(Command::Swap {
                a: EntryId(1),
                b: EntryId(2)
            })
        );
        assert_eq!(parse_command("remove 4"), Some(Command::Remove { id: EntryId(4) }));
        assert_eq!(parse_command("swap 1"), None);
    }

    #[test]
    fn parse_result_ids() {
        assert_eq!(
            parse_command("result sf1 2"),
            Some(Command::Result {
                match_id: MatchId::Semifinal1,
                group: 1
            })
        );
        assert_eq!(
            parse_command("result 4 6"),
            Some(Command::Result {
                match_id: MatchId::Round(4),
                group: 5
            })
        );
        assert_eq!(parse_command("result semi 2"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name Trials value 200"),
            Some(Command::SetOption {
                name: "Trials".to_string(),
                value: "200".to_string()
            })
        );
        assert_eq!(parse_command("setoption name Trials"), None);
        assert_eq!(parse_command("setoption Trials value 2"), None);
    }

    #[test]
    fn parse_groups_and_recall() {
        assert_eq!(parse_command("groups 4"), Some(Command::Groups { count: 4 }));
        assert_eq!(parse_command("recall 3"), Some(Command::Recall { attempt: 3 }));
        assert_eq!(parse_command("groups many"), None);
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_command("  standings  "), Some(Command::Standings));
    }
}
