use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use qms_tenant_import::config::MappingConfig;
use qms_tenant_import::ingestion::csv::read_csv_from_reader;
use qms_tenant_import::pipeline::{ImportRequest, QmsImporter};
use qms_tenant_import::schema::{output_header, ALTERNATE_CONTACT_COLUMNS};
use qms_tenant_import::types::SourceTable;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("qms-tenant-import-{name}-{nanos}.csv"))
}

fn table(csv_text: &str) -> SourceTable {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());
    read_csv_from_reader(&mut rdr).unwrap()
}

fn config_denying(extra: &str) -> MappingConfig {
    let mut cfg = MappingConfig::default();
    cfg.email_denylist.push(extra.to_string());
    cfg
}

/// Read an output CSV back as header-keyed maps.
fn read_output(path: &PathBuf) -> (Vec<String>, Vec<HashMap<String, String>>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    let rows = rdr
        .records()
        .map(|r| {
            let r = r.unwrap();
            headers
                .iter()
                .cloned()
                .zip(r.iter().map(str::to_string))
                .collect()
        })
        .collect();
    (headers, rows)
}

#[test]
fn primary_and_alternate_rows_merge_into_one_record() {
    let mut primary = table(
        "LegacyTenantId,FirstName,LastName,MiddleName,Email,CellPhoneNumber\n\
         7,Ann,Lee,,ann@x.com,5551234\n",
    );
    let alternates = table("LegacyTenantId,FirstName,Email\n7,Bob,bad@none.com\n");

    let importer = QmsImporter::new(&config_denying("bad@none.com")).unwrap();
    let (records, summary) = importer.transform(&mut primary, Some(&alternates));

    assert_eq!(records.len(), 1);
    let rec = &records[0];
    assert_eq!(rec.value("PhoneNumber"), "5551234");
    assert_eq!(rec.value("PhoneNumberPrefix"), "+1");
    assert_eq!(rec.value("PhoneNumberType"), "Cell Phone");
    assert_eq!(rec.value("AlternateContactFirstName"), "Bob");
    assert_eq!(rec.value("AlternateContactEmail"), "");
    assert_eq!(rec.duplicate_check, "ann@x.comAnnLee");
    assert_eq!(rec.first_last, "AnnLee");

    let merge = summary.merge.unwrap();
    assert_eq!(merge.matched, 1);
    assert_eq!(merge.duplicates_discarded, 0);
}

#[test]
fn blank_primary_rows_are_dropped() {
    let mut primary = table(
        "LegacyTenantId,FirstName,LastName\n\
         1,Ann,Lee\n\
         ,,\n\
         nan, ,NaN\n\
         2,Bo,Ng\n",
    );
    let (records, summary) = QmsImporter::default().transform(&mut primary, None);

    assert_eq!(summary.primary_rows, 4);
    assert_eq!(summary.blank_rows_dropped, 2);
    assert_eq!(summary.output_rows, 2);
    assert_eq!(records[1].legacy_tenant_id, "2");
    assert!(summary.merge.is_none());
}

#[test]
fn dedup_keys_are_derived_after_merge_from_primary_fields() {
    let mut primary = table(
        "LegacyTenantId,FirstName,MiddleName,LastName,Email,AddressLine\n\
         5,Mary Ann,Q,Van Dyke,MA@x.com,1 Main St\n",
    );
    let alternates = table("LegacyTenantId,FirstName,LastName\n5,Zed,Zulu\n");
    let (records, _) = QmsImporter::default().transform(&mut primary, Some(&alternates));

    assert_eq!(records[0].first_last, "MaryAnnQVanDyke");
    assert_eq!(records[0].duplicate_check, "MA@x.comMaryAnnQVanDyke1MainSt");
}

#[test]
fn alternate_source_without_key_column_collapses_to_one_entry() {
    let mut primary = table("LegacyTenantId,FirstName\n1,Ann\n,NoKey\n");
    let alternates = table("FirstName,Relationship\nBob,Brother\nCy,Friend\n");
    let (records, summary) = QmsImporter::default().transform(&mut primary, Some(&alternates));

    let merge = summary.merge.unwrap();
    assert_eq!(merge.lookup_entries, 1);
    assert_eq!(merge.duplicates_discarded, 1);

    // Only the primary row with an empty key meets the degenerate empty-key entry.
    assert_eq!(records[0].value("AlternateContactFirstName"), "");
    assert_eq!(records[1].value("AlternateContactFirstName"), "Bob");
    assert_eq!(records[1].value("AlternateContactRelationship"), "Brother");
}

#[test]
fn import_request_writes_fixture_output() {
    let out = tmp_file("fixtures");
    let mut request = ImportRequest::new("tests/fixtures/tenants.csv", &out)
        .with_alternates("tests/fixtures/alternate_tenants.csv");
    request.config = MappingConfig::from_json_path("tests/fixtures/mapping.json").unwrap();
    request.parallel = true;

    let summary = request.run().unwrap();
    assert_eq!(summary.primary_rows, 4);
    assert_eq!(summary.output_rows, 3);
    let merge = summary.merge.unwrap();
    assert_eq!(merge.alternate_rows, 4);
    assert_eq!(merge.blank_rows_dropped, 1);
    assert_eq!(merge.lookup_entries, 2);
    assert_eq!(merge.duplicates_discarded, 1);
    assert_eq!(merge.matched, 2);

    let (headers, rows) = read_output(&out);
    assert_eq!(headers, output_header());
    assert_eq!(rows.len(), 3);

    let ann = &rows[0];
    assert_eq!(ann["LegacyTenantId"], "7");
    assert_eq!(ann["AlternateContactFirstName"], "Bob");
    assert_eq!(ann["AlternateContactEmail"], "");
    assert_eq!(ann["duplicatecheck"], "ann@x.comAnnLee");

    let carl = &rows[1];
    assert_eq!(carl["LegacyTenantId"], "12");
    assert_eq!(carl["Email"], "Carl.Mason@Example.com");
    assert_eq!(carl["LastName"], "J Mason");
    assert_eq!(carl["CompanyName"], "Mason LLC");
    assert_eq!(carl["AddressStreet2"], "Unit 3");
    assert_eq!(carl["PhoneNumber"], "5550012");
    assert_eq!(carl["PhoneNumberType"], "Home Phone");
    assert_eq!(carl["DriverLicenseNumber"], "M1234567");
    assert_eq!(carl["DriverLicenseExpirationDate"], "");
    assert_eq!(carl["AlternateContactFirstName"], "Erin");
    assert_eq!(carl["AlternateContactLastName"], "K Mason");
    assert_eq!(carl["AlternateContactRelationship"], "Spouse");
    assert_eq!(carl["AlternateContactPhoneNumberType"], "Cell Phone");
    assert_eq!(carl["firstLast"], "CarlJMason");
    assert_eq!(carl["duplicatecheck"], "Carl.Mason@Example.comCarlJMason12OakAve");

    let dana = &rows[2];
    assert_eq!(dana["LastName"], "Reyes");
    assert_eq!(dana["Email"], "");
    assert_eq!(dana["PhoneNumber"], "5550013");
    assert_eq!(dana["PhoneNumberType"], "Work Phone");
    assert!(ALTERNATE_CONTACT_COLUMNS.iter().all(|c| dana[*c].is_empty()));

    let _ = std::fs::remove_file(&out);
}

#[test]
fn import_request_fails_without_writing_when_primary_is_missing() {
    let out = tmp_file("missing");
    let err = ImportRequest::new("tests/fixtures/does_not_exist.csv", &out)
        .run()
        .unwrap_err();
    assert!(err.to_string().contains("csv error") || err.to_string().contains("io error"));
    assert!(!out.exists());
}
