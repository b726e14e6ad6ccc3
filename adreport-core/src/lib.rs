//! adreport-core: weekly advertising and sales report builder
//!
//! Reads the weekly spreadsheet export, extracts week and brand/campaign
//! records from fixed column layouts and derives the figures shown in the
//! performance report.

pub mod coerce;
pub mod config;
pub mod error;
pub mod insights;
pub mod metrics;
pub mod reader;
pub mod report;
pub mod scan;
pub mod sem;
pub mod weekly;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use config::{ReportConfig, Thresholds};
pub use error::ReportError;
pub use insights::{Insight, InsightKind, InsightRule, Insights};
pub use report::PerformanceReport;
pub use sem::{CampaignRecord, SemData, SemWeek};
pub use weekly::{BrandRecord, WeekRecord, WeeklyData};

/// Main report interface
pub struct Reporter {
    config: ReportConfig,
}

impl Reporter {
    /// Create a reporter with default configuration
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    /// Create a reporter with custom configuration
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Locate the data file in the configured data directory
    pub fn data_file(&self) -> Result<PathBuf> {
        let input = &self.config.input;
        reader::resolve_data_file(&input.data_dir, &input.preferred_file, &input.legacy_file)
    }

    /// Build the report from the data file in the configured data directory
    pub fn build_report_from_data_dir(&self) -> Result<PerformanceReport> {
        let path = self.data_file()?;
        self.build_report(path)
    }

    /// Build the report from a specific workbook.
    ///
    /// A missing weekly sheet or reserved week is an error; SEM problems only
    /// produce empty SEM weeks.
    pub fn build_report<P: AsRef<Path>>(&self, path: P) -> Result<PerformanceReport> {
        let path = path.as_ref();
        let input = &self.config.input;
        let workbook = reader::read_workbook(path)
            .with_context(|| format!("Failed to read workbook: {}", path.display()))?;

        let weekly = weekly::parse_weekly_sheet(&workbook, &input.weekly_sheet)
            .with_context(|| format!("Failed to parse sheet \"{}\"", input.weekly_sheet))?;
        let sem = sem::parse_sem_sheet(&workbook, &input.sem_sheet, &input.campaign_prefix);

        Ok(PerformanceReport::build(weekly, sem, &self.config.thresholds))
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
