//! Core data model types.
//!
//! Loaders produce a [`SourceTable`] (header row plus text rows). Rows are read through the
//! borrowed [`SourceRecord`] view, and the mapper turns each into a fixed-shape [`QmsRecord`].

use std::collections::HashMap;

use rayon::prelude::*;

use crate::schema::{self, DUPLICATE_CHECK, FIRST_LAST, LEGACY_TENANT_ID, QMS_COLUMNS};
use crate::transform::normalize::is_filled;

/// A loaded input sheet: header names plus row-major text cells.
///
/// Every cell is text. Rows may be shorter than the header; missing trailing cells read as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl SourceTable {
    /// Create a table from headers and rows.
    ///
    /// When a header name repeats, lookups resolve to its first occurrence.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(idx);
        }
        Self {
            headers,
            rows,
            index,
        }
    }

    /// Header names in input order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has a column with this header.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Borrow the row at `idx`.
    pub fn record(&self, idx: usize) -> Option<SourceRecord<'_>> {
        self.rows.get(idx).map(|cells| SourceRecord { table: self, cells })
    }

    /// Iterate rows in input order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = SourceRecord<'_>> + '_ {
        self.rows.iter().map(move |cells| SourceRecord { table: self, cells })
    }

    pub(crate) fn par_records(&self) -> impl IndexedParallelIterator<Item = SourceRecord<'_>> + '_ {
        self.rows
            .par_iter()
            .map(move |cells| SourceRecord { table: self, cells })
    }

    /// Remove rows in which no named cell is filled, returning how many were removed.
    ///
    /// Cells past the last header are ignored.
    pub fn drop_blank_rows(&mut self) -> usize {
        let before = self.rows.len();
        let width = self.headers.len();
        self.rows.retain(|cells| !cells_blank(cells, width));
        before - self.rows.len()
    }
}

/// Borrowed view over one row of a [`SourceTable`].
#[derive(Debug, Clone, Copy)]
pub struct SourceRecord<'a> {
    table: &'a SourceTable,
    cells: &'a [String],
}

impl<'a> SourceRecord<'a> {
    /// Raw cell text for `column`, or `None` when the column is missing or the row is short.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.table.index.get(column)?;
        self.cells.get(idx).map(String::as_str)
    }

    /// Returns true if no cell under a header is filled.
    pub fn is_blank(&self) -> bool {
        cells_blank(self.cells, self.table.headers.len())
    }
}

fn cells_blank(cells: &[String], width: usize) -> bool {
    !cells.iter().take(width).any(|c| is_filled(Some(c.as_str())))
}

/// One output row in the fixed QMS layout.
///
/// Every field in [`QMS_COLUMNS`] is always present; the empty string is "no value". The join key
/// and the two dedup keys are carried alongside and serialized first (see
/// [`crate::schema::output_header`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QmsRecord {
    /// Join key copied from the primary row.
    pub legacy_tenant_id: String,
    /// Derived `duplicatecheck` key.
    pub duplicate_check: String,
    /// Derived `firstLast` key.
    pub first_last: String,
    values: Vec<String>,
}

impl Default for QmsRecord {
    fn default() -> Self {
        Self {
            legacy_tenant_id: String::new(),
            duplicate_check: String::new(),
            first_last: String::new(),
            values: vec![String::new(); QMS_COLUMNS.len()],
        }
    }
}

impl QmsRecord {
    /// Create a record with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a QMS field or one of the three leading columns.
    ///
    /// Returns `None` only for names outside the output layout.
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            LEGACY_TENANT_ID => Some(self.legacy_tenant_id.as_str()),
            DUPLICATE_CHECK => Some(self.duplicate_check.as_str()),
            FIRST_LAST => Some(self.first_last.as_str()),
            _ => schema::qms_index_of(field).map(|idx| self.values[idx].as_str()),
        }
    }

    /// Value of a QMS field, or `""` for names outside the layout.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Set a QMS field or one of the three leading columns.
    ///
    /// Returns `false` (and changes nothing) if `field` is not part of the output layout.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            LEGACY_TENANT_ID => &mut self.legacy_tenant_id,
            DUPLICATE_CHECK => &mut self.duplicate_check,
            FIRST_LAST => &mut self.first_last,
            _ => match schema::qms_index_of(field) {
                Some(idx) => &mut self.values[idx],
                None => return false,
            },
        };
        *slot = value.into();
        true
    }

    pub(crate) fn set_at(&mut self, idx: usize, value: String) {
        self.values[idx] = value;
    }

    /// Values in output order: leading columns, then [`QMS_COLUMNS`].
    pub fn to_row(&self) -> Vec<&str> {
        let mut row = Vec::with_capacity(self.values.len() + 3);
        row.push(self.legacy_tenant_id.as_str());
        row.push(self.duplicate_check.as_str());
        row.push(self.first_last.as_str());
        row.extend(self.values.iter().map(String::as_str));
        row
    }
}
