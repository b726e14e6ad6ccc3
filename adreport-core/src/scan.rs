//! Row scanning shared by the weekly and SEM sheet parsers
//!
//! Both sheets list group rows (one per brand or campaign) followed by a
//! week-summary row holding the totals for that week. Scanning is a fold
//! over the rows with a pending-group buffer that is flushed into each
//! summary row as it is encountered.

use crate::reader::{CellValue, cell_at};

/// First data row (0-based). Everything above is header and metadata.
pub const DATA_START_ROW: usize = 11;

/// Column holding the week label on summary rows.
pub const LABEL_COL: usize = 1;

/// Column holding the brand or campaign name on group rows.
pub const GROUP_COL: usize = 2;

/// Column layout and record construction for one sheet type
pub trait RowLayout {
    /// Record built from a group row
    type Group;
    /// Record built from a week-summary row
    type Summary;

    /// Build a group record; `name` is already trimmed and non-empty
    fn group(&self, name: &str, row: &[CellValue]) -> Self::Group;

    /// Build a summary record owning the groups collected since the previous summary
    fn summary(&self, label: &str, row: &[CellValue], groups: Vec<Self::Group>) -> Self::Summary;
}

/// How a single data row is treated during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind<'a> {
    /// Week totals; carries the trimmed label
    WeekSummary(&'a str),
    /// Brand or campaign row; carries the trimmed name
    Group(&'a str),
    Skip,
}

/// Classify a row. Week detection wins over group detection.
pub fn classify_row(row: &[CellValue]) -> RowKind<'_> {
    if let CellValue::Text(label) = cell_at(row, LABEL_COL) {
        if label.to_lowercase().contains("week") {
            return RowKind::WeekSummary(label.trim());
        }
    }

    if let CellValue::Text(name) = cell_at(row, GROUP_COL) {
        let name = name.trim();
        if !name.is_empty() {
            return RowKind::Group(name);
        }
    }

    RowKind::Skip
}

/// Scan all data rows and return the summary records in sheet order.
///
/// Group rows after the last summary row have no week to belong to and are
/// dropped.
pub fn scan_rows<L: RowLayout>(layout: &L, rows: &[Vec<CellValue>]) -> Vec<L::Summary> {
    let mut summaries = Vec::new();
    let mut pending: Vec<L::Group> = Vec::new();

    for row in rows.iter().skip(DATA_START_ROW) {
        match classify_row(row) {
            RowKind::WeekSummary(label) => {
                let groups = std::mem::take(&mut pending);
                summaries.push(layout.summary(label, row, groups));
            }
            RowKind::Group(name) => pending.push(layout.group(name, row)),
            RowKind::Skip => {}
        }
    }

    if !pending.is_empty() {
        tracing::debug!(
            dropped = pending.len(),
            "group rows after the last week summary were ignored"
        );
    }

    summaries
}
