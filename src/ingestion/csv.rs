//! CSV loading.

use std::path::Path;

use crate::error::ImportResult;
use crate::types::SourceTable;

/// Read a CSV file into a [`SourceTable`].
///
/// Rules:
///
/// - The first line is the header row; header names are trimmed.
/// - Every value is kept as text (no type inference).
/// - Rows may be shorter or longer than the header.
pub fn read_csv_from_path(path: impl AsRef<Path>) -> ImportResult<SourceTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    read_csv_from_reader(&mut rdr)
}

/// Read CSV data from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> ImportResult<SourceTable> {
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(SourceTable::new(headers, rows))
}
