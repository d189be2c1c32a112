//! Protocol command handling.
//!
//! Wraps a `Session` and turns each parsed command into response lines on
//! the given writer. Successful edits are silent; failures answer
//! `error <message>`.

use std::io::{self, Write};

use tracing::warn;

use crate::bracket::MatchId;
use crate::config::BalancerConfig;
use crate::error::BalanceError;
use crate::protocol::parser::Command;
use crate::roster::group::group_label;
use crate::roster::role::CORE_ROLES;
use crate::session::Session;

/// What the main loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Holds the session between commands.
pub struct Engine {
    session: Session,
}

impl Engine {
    pub fn new(config: BalancerConfig) -> Result<Self, BalanceError> {
        Ok(Engine {
            session: Session::new(config)?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatches one command, writing its response lines to `out`.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        match cmd {
            Command::Add { tier, roles, name } => self.handle_add(&name, &tier, &roles, out)?,
            Command::Remove { id } => {
                let result = self.session.remove_entry(id).map(|_| ());
                report(result, out)?;
            }
            Command::Groups { count } => {
                let result = self.session.set_group_count(count);
                report(result, out)?;
            }
            Command::Balance => self.handle_balance(out)?,
            Command::Reset => self.session.reset(),
            Command::Show => self.handle_show(out)?,
            Command::Roster => self.handle_roster(out)?,
            Command::Analysis => self.handle_analysis(out)?,
            Command::Coverage => self.handle_coverage(out)?,
            Command::Swap { a, b } => {
                let result = self.session.swap(a, b);
                report(result, out)?;
            }
            Command::Move { id, from, to } => {
                let result = self.session.move_entry(id, from, to);
                report(result, out)?;
            }
            Command::History => self.handle_history(out)?,
            Command::DumpHistory => self.handle_dumphistory(out)?,
            Command::Recall { attempt } => {
                let result = self.session.recall(attempt);
                report(result, out)?;
            }
            Command::ClearHistory => self.session.clear_history(),
            Command::Bracket => self.handle_bracket(out)?,
            Command::Result { match_id, group } => self.handle_result(match_id, group, out)?,
            Command::Standings => self.handle_standings(out)?,
            Command::Export => self.handle_export(out)?,
            Command::SetOption { name, value } => self.handle_setoption(&name, &value, out)?,
            Command::IsReady => self.handle_isready(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    fn handle_add<W: Write>(
        &mut self,
        name: &str,
        tier: &str,
        roles: &[String],
        out: &mut W,
    ) -> io::Result<()> {
        match self.session.add_entry(name, tier, roles) {
            Ok(id) => writeln!(out, "added {}", id),
            Err(e) => write_error(out, &e),
        }
    }

    fn handle_balance<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.session.balance() {
            Ok(record) => writeln!(
                out,
                "balanced attempt {} spread {:.1}",
                record.attempt, record.score_spread
            ),
            Err(e) => write_error(out, &e),
        }
    }

    fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (slot, group) in self.session.active_groups() {
            let names: Vec<&str> = group.members().iter().map(|e| e.name.as_str()).collect();
            writeln!(
                out,
                "group {} total {:.1} {}",
                group_label(slot),
                group.total_score(),
                names.join(" ")
            )?;
        }
        Ok(())
    }

    fn handle_roster<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for e in self.session.roster() {
            writeln!(
                out,
                "entry {} {} {} {:.1} {}",
                e.id,
                e.tier,
                e.roles.joined(),
                e.score,
                e.name
            )?;
        }
        Ok(())
    }

    fn handle_analysis<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.session.analysis() {
            Some(a) => {
                let scores: Vec<String> = a
                    .per_group_scores
                    .iter()
                    .map(|s| format!("{:.1}", s))
                    .collect();
                writeln!(
                    out,
                    "analysis spread {:.1} scores {}",
                    a.score_spread,
                    scores.join(" ")
                )
            }
            None => writeln!(out, "analysis none"),
        }
    }

    /// One line per active group with eligible counts per core role, then
    /// the total penalty.
    fn handle_coverage<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let report = match self.session.coverage() {
            Some(r) => r,
            None => return writeln!(out, "coverage none"),
        };
        for (slot, counts) in &report.groups {
            let cells: Vec<String> = CORE_ROLES
                .iter()
                .zip(counts)
                .map(|(role, n)| format!("{} {}", role.label(), n))
                .collect();
            writeln!(out, "coverage {} {}", group_label(*slot), cells.join(" "))?;
        }
        writeln!(out, "coverage penalty {}", report.penalty)
    }

    fn handle_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let history = self.session.history();
        if history.is_empty() {
            return writeln!(out, "history empty");
        }
        for record in history.iter() {
            writeln!(
                out,
                "record {} groups {} spread {:.1} at {}",
                record.attempt,
                record.group_count,
                record.score_spread,
                record.timestamp.to_rfc3339()
            )?;
        }
        Ok(())
    }

    /// One JSON object per record, newest first.
    fn handle_dumphistory<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for record in self.session.history().iter() {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn handle_bracket<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let bracket = match self.session.build_bracket() {
            Ok(b) => b,
            Err(e) => return write_error(out, &e),
        };
        writeln!(out, "bracket {}", bracket.kind())?;
        for m in bracket.matches() {
            writeln!(out, "match {} {} {}", m.id, team(m.team1), team(m.team2))?;
        }
        Ok(())
    }

    fn handle_result<W: Write>(&mut self, id: MatchId, group: usize, out: &mut W) -> io::Result<()> {
        if let Err(e) = self.session.record_result(id, group) {
            return write_error(out, &e);
        }
        if let Some(champion) = self.session.bracket().and_then(|b| b.champion()) {
            writeln!(out, "champion {}", group_label(champion))?;
        }
        Ok(())
    }

    fn handle_standings<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.session.standings() {
            Ok(table) => {
                for s in table {
                    writeln!(
                        out,
                        "standing {} wins {} losses {}",
                        group_label(s.group),
                        s.wins,
                        s.losses
                    )?;
                }
                Ok(())
            }
            Err(e) => write_error(out, &e),
        }
    }

    fn handle_export<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        match self.session.export_csv(&mut buf) {
            Ok(()) => out.write_all(&buf),
            Err(e) => write_error(out, &e),
        }
    }

    fn handle_setoption<W: Write>(&mut self, name: &str, value: &str, out: &mut W) -> io::Result<()> {
        match self.session.config_mut().set_option(name, value) {
            Ok(()) => Ok(()),
            Err(e) => write_error(out, &e),
        }
    }

    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")
    }
}

fn team(slot: Option<usize>) -> String {
    slot.map_or_else(|| "-".to_string(), group_label)
}

fn report<W: Write>(result: Result<(), BalanceError>, out: &mut W) -> io::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) => write_error(out, &e),
    }
}

fn write_error<W: Write, E: std::fmt::Display>(out: &mut W, err: &E) -> io::Result<()> {
    warn!("{}", err);
    writeln!(out, "error {}", err)
}
