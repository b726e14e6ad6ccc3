//! Workbook data structures

use std::path::PathBuf;

/// Represents a loaded workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
    /// Sheets listed in the file that could not be loaded
    pub unreadable_sheets: Vec<UnreadableSheet>,
}

/// A sheet calamine failed to load, with the error it reported
#[derive(Debug, Clone, PartialEq)]
pub struct UnreadableSheet {
    pub name: String,
    pub reason: String,
}

impl Workbook {
    /// Get a sheet by name (exact, case-sensitive)
    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Load error recorded for a sheet that exists in the file but could not be read
    pub fn unreadable_reason(&self, name: &str) -> Option<&str> {
        self.unreadable_sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.reason.as_str())
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Represents a worksheet as a dense row grid.
///
/// `rows[r][c]` is the cell at worksheet row `r`, column `c` (both 0-based),
/// independent of where the used range starts. Rows may have different
/// lengths; anything past the end of a row reads as [`CellValue::Empty`].
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Get a cell at the given position
    pub fn get_cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .map(|r| cell_at(r, col))
            .unwrap_or(&CellValue::Empty)
    }

    /// Number of rows in the grid
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Get the cell at `col` in a row, treating short rows as padded with empties
pub fn cell_at(row: &[CellValue], col: usize) -> &CellValue {
    row.get(col).unwrap_or(&CellValue::Empty)
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Spreadsheet error value as displayed, e.g. `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Get the text if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}
