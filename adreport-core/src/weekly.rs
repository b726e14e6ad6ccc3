//! Weekly reporting sheet parser
//!
//! Produces one [`WeekRecord`] per week-summary row, each owning the
//! [`BrandRecord`]s listed above it. `Current Week` and `Previous Week` are
//! required; every other week is a historical trend point.

use serde::Serialize;

use crate::coerce::{coerce_number, coerce_rate};
use crate::error::ReportError;
use crate::reader::{CellValue, Workbook, cell_at};
use crate::scan::{RowLayout, scan_rows};

pub const CURRENT_WEEK: &str = "Current Week";
pub const PREVIOUS_WEEK: &str = "Previous Week";

/// Column positions in the weekly reporting sheet.
///
/// Column 4 (average sales price by brand) is not read.
pub mod columns {
    pub const SALES: usize = 3;
    pub const UNITS: usize = 5;
    pub const ORDERED_ITEMS: usize = 6;
    pub const AD_SPEND: usize = 10;
    pub const AD_UNIT_SALES: usize = 12;
    pub const AD_SALES: usize = 13;
    pub const ACOS: usize = 14;
    pub const ROAS: usize = 15;
    pub const ORGANIC_SALES: usize = 18;
}

/// One brand's figures within a week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandRecord {
    pub brand: String,
    pub sales: f64,
    pub units: f64,
    pub ordered_items: f64,
    pub ad_spend: f64,
    pub ad_unit_sales: f64,
    pub ad_sales: f64,
    /// Ad spend / ad sales; `None` when not applicable
    pub acos: Option<f64>,
    /// Ad sales / ad spend; `None` when not applicable
    pub roas: Option<f64>,
    pub organic_sales: f64,
}

/// Totals for one week plus the brands that make it up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRecord {
    pub label: String,
    pub sales: f64,
    pub units: f64,
    pub ordered_items: f64,
    pub ad_spend: f64,
    pub ad_sales: f64,
    pub acos: Option<f64>,
    pub roas: Option<f64>,
    pub organic_sales: f64,
    pub brands: Vec<BrandRecord>,
}

impl WeekRecord {
    pub fn is_current(&self) -> bool {
        self.label == CURRENT_WEEK
    }

    pub fn is_previous(&self) -> bool {
        self.label == PREVIOUS_WEEK
    }

    /// Find a brand by exact name
    pub fn brand(&self, name: &str) -> Option<&BrandRecord> {
        self.brands.iter().find(|b| b.brand == name)
    }
}

/// Parsed weekly reporting sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyData {
    weeks: Vec<WeekRecord>,
    #[serde(skip)]
    current: usize,
    #[serde(skip)]
    previous: usize,
}

impl WeeklyData {
    /// Every week in sheet order, including historical weeks
    pub fn weeks(&self) -> &[WeekRecord] {
        &self.weeks
    }

    pub fn current_week(&self) -> &WeekRecord {
        &self.weeks[self.current]
    }

    pub fn previous_week(&self) -> &WeekRecord {
        &self.weeks[self.previous]
    }
}

struct WeeklyLayout;

impl RowLayout for WeeklyLayout {
    type Group = BrandRecord;
    type Summary = WeekRecord;

    fn group(&self, name: &str, row: &[CellValue]) -> BrandRecord {
        let num = |col| coerce_number(cell_at(row, col));
        let rate = |col| coerce_rate(cell_at(row, col));
        BrandRecord {
            brand: name.to_string(),
            sales: num(columns::SALES),
            units: num(columns::UNITS),
            ordered_items: num(columns::ORDERED_ITEMS),
            ad_spend: num(columns::AD_SPEND),
            ad_unit_sales: num(columns::AD_UNIT_SALES),
            ad_sales: num(columns::AD_SALES),
            acos: rate(columns::ACOS),
            roas: rate(columns::ROAS),
            organic_sales: num(columns::ORGANIC_SALES),
        }
    }

    fn summary(&self, label: &str, row: &[CellValue], brands: Vec<BrandRecord>) -> WeekRecord {
        let num = |col| coerce_number(cell_at(row, col));
        let rate = |col| coerce_rate(cell_at(row, col));
        WeekRecord {
            label: label.to_string(),
            sales: num(columns::SALES),
            units: num(columns::UNITS),
            ordered_items: num(columns::ORDERED_ITEMS),
            ad_spend: num(columns::AD_SPEND),
            ad_sales: num(columns::AD_SALES),
            acos: rate(columns::ACOS),
            roas: rate(columns::ROAS),
            organic_sales: num(columns::ORGANIC_SALES),
            brands,
        }
    }
}

/// Parse the rows of a weekly reporting sheet.
///
/// Fails with [`ReportError::MissingRequiredWeek`] if either reserved week is
/// absent. When a reserved label repeats, the first occurrence is used.
pub fn parse_weekly_rows(rows: &[Vec<CellValue>]) -> Result<WeeklyData, ReportError> {
    let weeks = scan_rows(&WeeklyLayout, rows);
    tracing::debug!(weeks = weeks.len(), "parsed weekly reporting rows");

    let find = |label: &str| {
        weeks
            .iter()
            .position(|w| w.label == label)
            .ok_or_else(|| ReportError::MissingRequiredWeek {
                label: label.to_string(),
            })
    };
    let current = find(CURRENT_WEEK)?;
    let previous = find(PREVIOUS_WEEK)?;

    Ok(WeeklyData {
        weeks,
        current,
        previous,
    })
}

/// Parse the named weekly reporting sheet of a workbook
pub fn parse_weekly_sheet(workbook: &Workbook, sheet_name: &str) -> Result<WeeklyData, ReportError> {
    let Some(sheet) = workbook.get_sheet(sheet_name) else {
        return Err(match workbook.unreadable_reason(sheet_name) {
            Some(reason) => ReportError::UnreadableSheet {
                sheet: sheet_name.to_string(),
                reason: reason.to_string(),
            },
            None => ReportError::MissingSheet {
                sheet: sheet_name.to_string(),
            },
        });
    };
    parse_weekly_rows(&sheet.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{Sheet, UnreadableSheet};
    use crate::scan::DATA_START_ROW;
    use std::path::PathBuf;

    fn data_row(label: Option<&str>, brand: Option<&str>, sales: f64) -> Vec<CellValue> {
        let mut row = vec![CellValue::Empty; 19];
        if let Some(label) = label {
            row[1] = CellValue::text(label);
        }
        if let Some(brand) = brand {
            row[2] = CellValue::text(brand);
        }
        row[columns::SALES] = CellValue::Number(sales);
        row[4] = CellValue::Number(999.0);
        row[columns::UNITS] = CellValue::Number(10.0);
        row[columns::ORDERED_ITEMS] = CellValue::Number(8.0);
        row[columns::AD_SPEND] = CellValue::Number(50.0);
        row[columns::AD_UNIT_SALES] = CellValue::Number(4.0);
        row[columns::AD_SALES] = CellValue::Number(200.0);
        row[columns::ACOS] = CellValue::Number(0.25);
        row[columns::ROAS] = CellValue::Number(4.0);
        row[columns::ORGANIC_SALES] = CellValue::Number(sales - 200.0);
        row
    }

    fn with_header(data: Vec<Vec<CellValue>>) -> Vec<Vec<CellValue>> {
        let mut rows = vec![Vec::new(); DATA_START_ROW];
        rows.extend(data);
        rows
    }

    #[test]
    fn test_brands_group_under_next_week() {
        let rows = with_header(vec![
            data_row(None, Some("Acme"), 500.0),
            data_row(None, Some("Globex"), 300.0),
            data_row(None, Some("Initech"), 100.0),
            data_row(Some("Previous Week"), None, 900.0),
            data_row(None, Some("Acme"), 650.0),
            data_row(Some("Current Week"), None, 650.0),
        ]);

        let data = parse_weekly_rows(&rows).unwrap();

        assert_eq!(data.weeks().len(), 2);
        let prev = data.previous_week();
        assert_eq!(prev.label, "Previous Week");
        let names: Vec<_> = prev.brands.iter().map(|b| b.brand.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Globex", "Initech"]);
        assert_eq!(data.current_week().brands.len(), 1);
        assert_eq!(data.current_week().brand("Acme").unwrap().sales, 650.0);
    }

    #[test]
    fn test_column_mapping() {
        let rows = with_header(vec![
            data_row(None, Some("Acme"), 500.0),
            data_row(Some("Current Week"), None, 500.0),
            data_row(Some("Previous Week"), None, 400.0),
        ]);

        let data = parse_weekly_rows(&rows).unwrap();
        let brand = &data.current_week().brands[0];

        assert_eq!(brand.sales, 500.0);
        assert_eq!(brand.units, 10.0);
        assert_eq!(brand.ordered_items, 8.0);
        assert_eq!(brand.ad_spend, 50.0);
        assert_eq!(brand.ad_unit_sales, 4.0);
        assert_eq!(brand.ad_sales, 200.0);
        assert_eq!(brand.acos, Some(0.25));
        assert_eq!(brand.roas, Some(4.0));
        assert_eq!(brand.organic_sales, 300.0);
        assert_eq!(data.previous_week().sales, 400.0);
    }

    #[test]
    fn test_historical_weeks_kept_in_order() {
        let rows = with_header(vec![
            data_row(Some("2026 - Week 1"), None, 100.0),
            data_row(Some("2026 - Week 2"), None, 200.0),
            data_row(Some("Previous Week"), None, 300.0),
            data_row(Some("Current Week"), None, 400.0),
        ]);

        let data = parse_weekly_rows(&rows).unwrap();
        let labels: Vec<_> = data.weeks().iter().map(|w| w.label.as_str()).collect();

        assert_eq!(
            labels,
            vec!["2026 - Week 1", "2026 - Week 2", "Previous Week", "Current Week"]
        );
        assert!(data.current_week().is_current());
        assert!(data.previous_week().is_previous());
    }

    #[test]
    fn test_error_markers_in_rates() {
        let mut brand = data_row(None, Some("Acme"), 0.0);
        brand[columns::ACOS] = CellValue::text("#DIV/0!");
        brand[columns::ROAS] = CellValue::Error("#DIV/0!".into());
        brand[columns::AD_SALES] = CellValue::text("#REF!");
        let rows = with_header(vec![
            brand,
            data_row(Some("Current Week"), None, 0.0),
            data_row(Some("Previous Week"), None, 0.0),
        ]);

        let data = parse_weekly_rows(&rows).unwrap();
        let brand = &data.current_week().brands[0];

        assert_eq!(brand.acos, None);
        assert_eq!(brand.roas, None);
        assert_eq!(brand.ad_sales, 0.0);
    }

    #[test]
    fn test_trailing_brands_dropped() {
        let rows = with_header(vec![
            data_row(Some("Previous Week"), None, 1.0),
            data_row(Some("Current Week"), None, 1.0),
            data_row(None, Some("Orphan"), 10.0),
        ]);

        let data = parse_weekly_rows(&rows).unwrap();

        assert!(
            data.weeks()
                .iter()
                .all(|w| w.brands.iter().all(|b| b.brand != "Orphan"))
        );
    }

    #[test]
    fn test_missing_current_week_is_error() {
        let rows = with_header(vec![data_row(Some("Previous Week"), None, 1.0)]);

        let err = parse_weekly_rows(&rows).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingRequiredWeek { ref label } if label == "Current Week"
        ));
    }

    #[test]
    fn test_missing_previous_week_is_error() {
        let rows = with_header(vec![data_row(Some("Current Week"), None, 1.0)]);

        let err = parse_weekly_rows(&rows).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingRequiredWeek { ref label } if label == "Previous Week"
        ));
    }

    #[test]
    fn test_first_reserved_label_wins() {
        let rows = with_header(vec![
            data_row(Some("Current Week"), None, 1.0),
            data_row(Some("Previous Week"), None, 2.0),
            data_row(Some("Current Week"), None, 3.0),
        ]);

        let data = parse_weekly_rows(&rows).unwrap();
        assert_eq!(data.current_week().sales, 1.0);
    }

    #[test]
    fn test_reserved_week_accessors_match_labels() {
        let rows = with_header(vec![
            data_row(Some("Current Week"), None, 10.0),
            data_row(Some("2026 - Week 5"), None, 20.0),
            data_row(Some("Previous Week"), None, 30.0),
        ]);

        let data = parse_weekly_rows(&rows).unwrap();

        assert_eq!(data.current_week().label, CURRENT_WEEK);
        assert_eq!(data.previous_week().label, PREVIOUS_WEEK);
        assert_eq!(data.previous_week().sales, 30.0);
        assert_eq!(data.weeks().len(), 3);
        assert_eq!(data.weeks()[1].label, "2026 - Week 5");
    }

    #[test]
    fn test_missing_sheet() {
        let workbook = Workbook {
            path: PathBuf::from("report.xlsx"),
            sheets: vec![Sheet::new("Other", Vec::new())],
            ..Default::default()
        };

        let err = parse_weekly_sheet(&workbook, "WALMART_weekly_reporting_2026-B").unwrap_err();
        assert!(matches!(err, ReportError::MissingSheet { .. }));
    }

    #[test]
    fn test_unreadable_sheet_keeps_load_error() {
        let workbook = Workbook {
            path: PathBuf::from("report.xlsx"),
            sheets: Vec::new(),
            unreadable_sheets: vec![UnreadableSheet {
                name: "Weekly".to_string(),
                reason: "invalid shared string index".to_string(),
            }],
        };

        let err = parse_weekly_sheet(&workbook, "Weekly").unwrap_err();

        assert!(matches!(
            err,
            ReportError::UnreadableSheet { ref sheet, ref reason }
                if sheet == "Weekly" && reason == "invalid shared string index"
        ));
        assert!(err.to_string().contains("invalid shared string index"));
    }
}
