//! CSV output in the QMS import layout.

use std::path::Path;

use crate::error::ImportResult;
use crate::schema::output_header;
use crate::types::QmsRecord;

/// Write `records` to a CSV file, replacing it if it exists.
///
/// The header is [`output_header`]; every record produces exactly one row of the same width.
pub fn write_qms_csv_to_path(path: impl AsRef<Path>, records: &[QmsRecord]) -> ImportResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_qms_csv_to_writer(&mut wtr, records)
}

/// Write `records` through an existing CSV writer and flush it.
pub fn write_qms_csv_to_writer<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    records: &[QmsRecord],
) -> ImportResult<()> {
    wtr.write_record(output_header())?;
    for record in records {
        wtr.write_record(record.to_row())?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::QMS_COLUMNS;

    #[test]
    fn writes_header_and_fixed_width_rows() {
        let mut rec = QmsRecord::new();
        rec.legacy_tenant_id = "7".to_string();
        rec.set("Email", "a,b@x.com");

        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_qms_csv_to_writer(&mut wtr, &[rec]).unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        let mut lines = out.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("LegacyTenantId,duplicatecheck,firstLast,Email,FirstName"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("7,,,\"a,b@x.com\","));
        assert_eq!(row.matches(',').count(), QMS_COLUMNS.len() + 2 + 1);
        assert!(lines.next().is_none());
    }
}
