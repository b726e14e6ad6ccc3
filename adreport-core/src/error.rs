//! Error types for report generation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No data file found: looked for {} and {}", .preferred.display(), .legacy.display())]
    DataFileNotFound { preferred: PathBuf, legacy: PathBuf },

    #[error("Failed to open workbook {}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet \"{sheet}\" not found in workbook")]
    MissingSheet { sheet: String },

    #[error("Sheet \"{sheet}\" could not be read: {reason}")]
    UnreadableSheet { sheet: String, reason: String },

    #[error("Could not find \"{label}\" in sheet data")]
    MissingRequiredWeek { label: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
