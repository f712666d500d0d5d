#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::error::{ImportError, ImportResult};
use crate::types::SourceTable;

use super::unified::SheetSelection;

/// Read one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into a [`SourceTable`].
///
/// Behavior:
/// - Picks the sheet named by `sheet` (first sheet by default)
/// - Detects the first non-empty row as the header row
/// - Renders every cell after the header as text
/// - A sheet without any non-empty row yields an empty table
pub fn read_excel_from_path(path: impl AsRef<Path>, sheet: &SheetSelection) -> ImportResult<SourceTable> {
    let mut workbook = open_workbook_auto(path)?;

    let names = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        SheetSelection::First => names.first().cloned(),
        SheetSelection::Named(name) => names.iter().find(|n| *n == name).cloned(),
        SheetSelection::Index(idx) => names.get(*idx).cloned(),
    }
    .ok_or_else(|| ImportError::SheetNotFound {
        message: format!("{sheet:?} (sheets={names:?})"),
    })?;

    let range = workbook.worksheet_range(&sheet_name)?;
    Ok(sheet_range_to_table(&range))
}

fn sheet_range_to_table(range: &calamine::Range<Data>) -> SourceTable {
    let mut rows = range.rows().skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|c| cell_to_string(c).trim().to_string())
            .collect(),
        None => return SourceTable::default(),
    };

    let body = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    SourceTable::new(headers, body)
}

/// Render a cell the way a text-typed spreadsheet read would.
fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => c
            .as_datetime()
            .map(|dt| dt.to_string())
            .unwrap_or_else(|| c.to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}
