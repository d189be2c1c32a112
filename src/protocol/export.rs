//! CSV export of a partition.
//!
//! Layout, kept stable for compatibility with earlier exports:
//!
//! ```text
//! 팀,플레이어명,티어,포지션,기본점수,가중치,최종점수
//! 1팀,Faker,챌린저,미드,50,1.15,57.5
//! ...
//!
//! 팀별 요약
//! 팀,총점수,인원수
//! 1팀,120.3,5
//! ```

use std::io::{self, Write};

use csv::WriterBuilder;
use thiserror::Error;

use crate::roster::group::group_label;
use crate::roster::partition::Partition;

/// UTF-8 byte order mark, so spreadsheet tools pick the right encoding.
pub const UTF8_BOM: &str = "\u{FEFF}";

const MEMBER_HEADER: [&str; 7] = ["팀", "플레이어명", "티어", "포지션", "기본점수", "가중치", "최종점수"];
const SUMMARY_TITLE: &str = "팀별 요약";
const SUMMARY_HEADER: [&str; 3] = ["팀", "총점수", "인원수"];

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no active groups to export")]
    Empty,
}

/// One member row of the export.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub group: String,
    pub name: String,
    pub tier: String,
    pub roles: String,
    pub base_score: f64,
    pub role_multiplier: f64,
    pub score: f64,
}

/// One summary row of the export.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub group: String,
    pub total_score: f64,
    pub member_count: usize,
}

/// Flat projection of the active groups' members, in slot order.
pub fn member_rows(partition: &Partition) -> Vec<MemberRow> {
    partition
        .active_groups()
        .into_iter()
        .flat_map(|(slot, group)| {
            group.members().iter().map(move |e| MemberRow {
                group: group_label(slot),
                name: e.name.clone(),
                tier: e.tier.label().to_string(),
                roles: e.roles.joined(),
                base_score: e.base_score,
                role_multiplier: e.role_multiplier,
                score: e.score,
            })
        })
        .collect()
}

/// Per active group totals.
pub fn summary_rows(partition: &Partition) -> Vec<SummaryRow> {
    partition
        .active_groups()
        .into_iter()
        .map(|(slot, group)| SummaryRow {
            group: group_label(slot),
            total_score: group.total_score(),
            member_count: group.len(),
        })
        .collect()
}

/// Writes the export for `partition` to `out`.
pub fn write_csv<W: Write>(partition: &Partition, out: &mut W, bom: bool) -> Result<(), ExportError> {
    let members = member_rows(partition);
    if members.is_empty() {
        return Err(ExportError::Empty);
    }

    if bom {
        out.write_all(UTF8_BOM.as_bytes())?;
    }

    {
        let mut wtr = WriterBuilder::new().from_writer(&mut *out);
        wtr.write_record(MEMBER_HEADER)?;
        for row in &members {
            wtr.write_record([
                row.group.clone(),
                row.name.clone(),
                row.tier.clone(),
                row.roles.clone(),
                row.base_score.to_string(),
                row.role_multiplier.to_string(),
                format!("{:.1}", row.score),
            ])?;
        }
        wtr.flush()?;
    }

    write!(out, "\n{}\n", SUMMARY_TITLE)?;

    let mut wtr = WriterBuilder::new().from_writer(&mut *out);
    wtr.write_record(SUMMARY_HEADER)?;
    for row in summary_rows(partition) {
        wtr.write_record([
            row.group,
            format!("{:.1}", row.total_score),
            row.member_count.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
