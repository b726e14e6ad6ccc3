//! Report configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::metrics::{ACOS_GOOD, ACOS_WARNING};
use crate::sem::DEFAULT_CAMPAIGN_PREFIX;

/// Main report configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReportConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Reject configurations that would produce a meaningless report
    pub fn validate(&self) -> Result<(), ReportError> {
        let input = &self.input;
        for (key, value) in [
            ("input.preferred_file", &input.preferred_file),
            ("input.legacy_file", &input.legacy_file),
            ("input.weekly_sheet", &input.weekly_sheet),
            ("input.sem_sheet", &input.sem_sheet),
        ] {
            if value.trim().is_empty() {
                return Err(ReportError::Config(format!("'{}' must not be empty", key)));
            }
        }

        let t = &self.thresholds;
        for (key, value) in [
            ("thresholds.acos_good", t.acos_good),
            ("thresholds.acos_warning", t.acos_warning),
            ("thresholds.win_sales_growth", t.win_sales_growth),
            ("thresholds.win_acos", t.win_acos),
            ("thresholds.alert_acos", t.alert_acos),
            ("thresholds.alert_sales_decline", t.alert_sales_decline),
        ] {
            if !value.is_finite() {
                return Err(ReportError::Config(format!("'{}' must be a finite number", key)));
            }
        }

        if t.acos_good > t.acos_warning {
            return Err(ReportError::Config(format!(
                "thresholds.acos_good ({}) is above thresholds.acos_warning ({})",
                t.acos_good, t.acos_warning
            )));
        }
        if t.alert_sales_decline >= 0.0 {
            return Err(ReportError::Config(format!(
                "thresholds.alert_sales_decline must be negative, got {}",
                t.alert_sales_decline
            )));
        }

        Ok(())
    }
}

/// Where to find the workbook and which sheets to read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub data_dir: PathBuf,
    pub preferred_file: String,
    pub legacy_file: String,
    pub weekly_sheet: String,
    pub sem_sheet: String,
    /// Prefix stripped from SEM campaign names for display
    pub campaign_prefix: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            preferred_file: "latest.xlsx".to_string(),
            legacy_file: "Ideal_Living___Walmart_Sales_and_Advertising.xlsx".to_string(),
            weekly_sheet: "WALMART_weekly_reporting_2026-B".to_string(),
            sem_sheet: "SEM Campaigns Data 2026".to_string(),
            campaign_prefix: DEFAULT_CAMPAIGN_PREFIX.to_string(),
        }
    }
}

/// Decimal thresholds for ACoS bands and narrative rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub acos_good: f64,
    pub acos_warning: f64,
    /// Sales growth above this is a win
    pub win_sales_growth: f64,
    /// Positive ACoS below this is a win
    pub win_acos: f64,
    /// ACoS above this is an alert
    pub alert_acos: f64,
    /// Sales change below this (negative) is an alert
    pub alert_sales_decline: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            acos_good: ACOS_GOOD,
            acos_warning: ACOS_WARNING,
            win_sales_growth: 0.20,
            win_acos: 0.25,
            alert_acos: 0.70,
            alert_sales_decline: -0.30,
        }
    }
}
