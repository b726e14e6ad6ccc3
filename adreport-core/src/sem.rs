//! SEM campaigns sheet parser
//!
//! Same row structure as the weekly sheet, with campaigns in place of brands
//! and a different column layout. SEM data is optional: a missing sheet or
//! a missing reserved week yields [`SemWeek::empty`] instead of an error.

use regex::Regex;
use serde::Serialize;

use crate::coerce::{coerce_number, coerce_rate};
use crate::reader::{CellValue, Workbook, cell_at};
use crate::scan::{RowLayout, scan_rows};
use crate::weekly::{CURRENT_WEEK, PREVIOUS_WEEK};

/// Column positions in the SEM campaigns sheet.
pub mod columns {
    pub const AD_SPEND: usize = 9;
    pub const IMPRESSIONS: usize = 10;
    pub const AD_SALES: usize = 12;
    pub const ACOS: usize = 13;
    pub const ROAS: usize = 14;
}

/// Organisational prefix removed from campaign names for display
pub const DEFAULT_CAMPAIGN_PREFIX: &str = "Dielon";

/// One campaign's figures within a week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRecord {
    /// Raw campaign name as it appears in the sheet (trimmed)
    pub campaign: String,
    /// Campaign name without the organisational prefix
    pub display_name: String,
    pub ad_spend: f64,
    pub impressions: f64,
    pub ad_sales: f64,
    pub acos: Option<f64>,
    pub roas: Option<f64>,
}

/// SEM totals for one week
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SemWeek {
    pub ad_spend: f64,
    pub impressions: f64,
    pub ad_sales: f64,
    pub acos: Option<f64>,
    pub roas: Option<f64>,
    pub campaigns: Vec<CampaignRecord>,
}

impl SemWeek {
    /// Placeholder for a week with no SEM data
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

/// Current and previous SEM weeks
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SemData {
    pub current_week: SemWeek,
    pub previous_week: SemWeek,
}

/// Turns raw campaign names into display names by removing a leading
/// `<prefix> - ` (case-insensitive, any spacing around the dash).
#[derive(Debug, Clone)]
pub struct CampaignNamer {
    prefix_re: Option<Regex>,
}

impl CampaignNamer {
    /// Compile the prefix pattern once. An empty prefix strips nothing.
    pub fn new(prefix: &str) -> Self {
        if prefix.is_empty() {
            return Self { prefix_re: None };
        }

        let pattern = format!(r"(?i)^{}\s*-\s*", regex::escape(prefix));
        match Regex::new(&pattern) {
            Ok(re) => Self { prefix_re: Some(re) },
            Err(e) => {
                tracing::warn!(prefix, error = %e, "invalid campaign prefix, names left as-is");
                Self { prefix_re: None }
            }
        }
    }

    pub fn display_name(&self, campaign: &str) -> String {
        match &self.prefix_re {
            Some(re) => re.replace(campaign, "").into_owned(),
            None => campaign.to_string(),
        }
    }
}

/// Strip `<prefix> - ` from a single campaign name
pub fn display_name(campaign: &str, prefix: &str) -> String {
    CampaignNamer::new(prefix).display_name(campaign)
}

struct SemLayout {
    namer: CampaignNamer,
}

/// Summary rows keep their label so the reserved weeks can be picked out
struct LabeledWeek {
    label: String,
    week: SemWeek,
}

impl RowLayout for SemLayout {
    type Group = CampaignRecord;
    type Summary = LabeledWeek;

    fn group(&self, name: &str, row: &[CellValue]) -> CampaignRecord {
        CampaignRecord {
            campaign: name.to_string(),
            display_name: self.namer.display_name(name),
            ad_spend: coerce_number(cell_at(row, columns::AD_SPEND)),
            impressions: coerce_number(cell_at(row, columns::IMPRESSIONS)),
            ad_sales: coerce_number(cell_at(row, columns::AD_SALES)),
            acos: coerce_rate(cell_at(row, columns::ACOS)),
            roas: coerce_rate(cell_at(row, columns::ROAS)),
        }
    }

    fn summary(&self, label: &str, row: &[CellValue], campaigns: Vec<CampaignRecord>) -> LabeledWeek {
        LabeledWeek {
            label: label.to_string(),
            week: SemWeek {
                ad_spend: coerce_number(cell_at(row, columns::AD_SPEND)),
                impressions: coerce_number(cell_at(row, columns::IMPRESSIONS)),
                ad_sales: coerce_number(cell_at(row, columns::AD_SALES)),
                acos: coerce_rate(cell_at(row, columns::ACOS)),
                roas: coerce_rate(cell_at(row, columns::ROAS)),
                campaigns,
            },
        }
    }
}

/// Parse the rows of a SEM campaigns sheet.
///
/// A repeated reserved label replaces the earlier one. Missing reserved weeks
/// come back as [`SemWeek::empty`].
pub fn parse_sem_rows(rows: &[Vec<CellValue>], prefix: &str) -> SemData {
    let mut data = SemData::default();
    let mut found_current = false;
    let mut found_previous = false;

    let layout = SemLayout {
        namer: CampaignNamer::new(prefix),
    };

    for LabeledWeek { label, week } in scan_rows(&layout, rows) {
        if label == CURRENT_WEEK {
            data.current_week = week;
            found_current = true;
        } else if label == PREVIOUS_WEEK {
            data.previous_week = week;
            found_previous = true;
        }
    }

    if !found_current {
        tracing::warn!(label = CURRENT_WEEK, "SEM week not found, using empty placeholder");
    }
    if !found_previous {
        tracing::warn!(label = PREVIOUS_WEEK, "SEM week not found, using empty placeholder");
    }

    data
}

/// Parse the named SEM sheet of a workbook, degrading to placeholders if absent
pub fn parse_sem_sheet(workbook: &Workbook, sheet_name: &str, prefix: &str) -> SemData {
    if let Some(sheet) = workbook.get_sheet(sheet_name) {
        return parse_sem_rows(&sheet.rows, prefix);
    }

    match workbook.unreadable_reason(sheet_name) {
        Some(reason) => tracing::warn!(
            sheet = sheet_name,
            reason,
            "SEM sheet could not be read, using empty placeholders"
        ),
        None => tracing::warn!(sheet = sheet_name, "SEM sheet not found, using empty placeholders"),
    }
    SemData::default()
}
