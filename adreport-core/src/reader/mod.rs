//! Excel/ODS file reader using calamine

use anyhow::Result;
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::path::{Path, PathBuf};

pub mod workbook;

pub use workbook::{CellValue, Sheet, UnreadableSheet, Workbook, cell_at};

use crate::error::ReportError;

/// Pick the data file inside `data_dir`: `preferred` if it exists, else `legacy`.
pub fn resolve_data_file(data_dir: &Path, preferred: &str, legacy: &str) -> Result<PathBuf> {
    let preferred_path = data_dir.join(preferred);
    if preferred_path.is_file() {
        tracing::debug!(path = %preferred_path.display(), "using preferred data file");
        return Ok(preferred_path);
    }

    let legacy_path = data_dir.join(legacy);
    if legacy_path.is_file() {
        tracing::warn!(
            path = %legacy_path.display(),
            "preferred data file missing, falling back to legacy file"
        );
        return Ok(legacy_path);
    }

    Err(ReportError::DataFileNotFound {
        preferred: preferred_path,
        legacy: legacy_path,
    }
    .into())
}

/// Read a workbook from a file path.
///
/// The file is read completely and closed before this returns. Sheets that
/// calamine cannot load are recorded in [`Workbook::unreadable_sheets`].
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let mut excel: Sheets<_> =
        open_workbook_auto(path).map_err(|source| ReportError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let sheet_names = excel.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());
    let mut unreadable_sheets = Vec::new();

    for sheet_name in &sheet_names {
        match excel.worksheet_range(sheet_name) {
            Ok(range) => sheets.push(parse_sheet(sheet_name, &range)),
            Err(e) => {
                tracing::warn!(sheet = %sheet_name, error = %e, "skipping unreadable sheet");
                unreadable_sheets.push(UnreadableSheet {
                    name: sheet_name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        sheets = sheets.len(),
        "loaded workbook"
    );

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
        unreadable_sheets,
    })
}

/// Lay a calamine range out on an absolute grid anchored at A1.
fn parse_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let Some((start_row, start_col)) = range.start() else {
        return Sheet::new(name, Vec::new());
    };
    let start_row = start_row as usize;
    let start_col = start_col as usize;

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row];
    for source_row in range.rows() {
        let mut row = vec![CellValue::Empty; start_col];
        row.extend(source_row.iter().map(parse_cell_value));
        while matches!(row.last(), Some(CellValue::Empty)) {
            row.pop();
        }
        rows.push(row);
    }

    Sheet::new(name, rows)
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
