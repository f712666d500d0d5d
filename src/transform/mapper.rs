//! Projection of source rows into the fixed QMS layout.

use rayon::prelude::*;

use crate::config::{ColumnMapping, MappingConfig};
use crate::error::ImportResult;
use crate::schema::{self, computed, source, ALTERNATE_CONTACT_COLUMNS, LEGACY_TENANT_ID};
use crate::types::{QmsRecord, SourceRecord, SourceTable};

use super::email::EmailSanitizer;
use super::merge::AlternateContact;
use super::name::combine_middle_last;
use super::normalize::normalize;
use super::phone::PhoneSelector;

/// Maps primary rows to [`QmsRecord`]s and alternate rows to [`AlternateContact`]s.
///
/// Built once from a [`MappingConfig`]; target names are resolved to positions up front, so
/// mapping a row does no name validation.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    email: EmailSanitizer,
    phone: PhoneSelector,
    primary_copies: Vec<(String, usize)>,
    alternate_copies: Vec<(String, usize)>,
}

impl Default for RecordMapper {
    fn default() -> Self {
        Self::build(&MappingConfig::default())
    }
}

impl RecordMapper {
    /// Validate `cfg` and build a mapper from it.
    pub fn new(cfg: &MappingConfig) -> ImportResult<Self> {
        cfg.validate()?;
        Ok(Self::build(cfg))
    }

    fn build(cfg: &MappingConfig) -> Self {
        Self {
            email: EmailSanitizer::new(&cfg.email_denylist),
            phone: PhoneSelector::from_config(cfg),
            primary_copies: resolve(&cfg.primary_columns, schema::qms_index_of),
            alternate_copies: resolve(&cfg.alternate_columns, |name| {
                ALTERNATE_CONTACT_COLUMNS.iter().position(|c| *c == name)
            }),
        }
    }

    /// Project one primary row. Never fails; missing columns leave their targets empty.
    pub fn map_record(&self, src: &SourceRecord<'_>) -> QmsRecord {
        let mut out = QmsRecord::new();

        for (column, idx) in &self.primary_copies {
            out.set_at(*idx, normalize(src.get(column)));
        }

        out.set(computed::EMAIL, self.email.sanitize(src.get(source::EMAIL)));
        out.set(
            computed::LAST_NAME,
            combine_middle_last(src.get(source::MIDDLE_NAME), src.get(source::LAST_NAME)),
        );

        let phone = self.phone.select(src);
        out.set(computed::PHONE_NUMBER, phone.number);
        out.set(computed::PHONE_NUMBER_PREFIX, phone.prefix);
        out.set(computed::PHONE_NUMBER_TYPE, phone.phone_type);

        out.legacy_tenant_id = normalize(src.get(LEGACY_TENANT_ID));
        out
    }

    /// Project every row of `table`, in row order.
    ///
    /// With `parallel` set, rows are mapped on the rayon pool; output order is still row order.
    pub fn map_table(&self, table: &SourceTable, parallel: bool) -> Vec<QmsRecord> {
        if parallel {
            table.par_records().map(|r| self.map_record(&r)).collect()
        } else {
            table.records().map(|r| self.map_record(&r)).collect()
        }
    }

    /// Project one alternate row into the 13 alternate-contact fields.
    pub fn map_alternate(&self, src: &SourceRecord<'_>) -> AlternateContact {
        let mut out = AlternateContact::default();

        for (column, idx) in &self.alternate_copies {
            out.values[*idx] = normalize(src.get(column));
        }

        out.set(computed::ALT_EMAIL, self.email.sanitize(src.get(source::EMAIL)));
        out.set(
            computed::ALT_LAST_NAME,
            combine_middle_last(src.get(source::MIDDLE_NAME), src.get(source::LAST_NAME)),
        );

        let phone = self.phone.select(src);
        out.set(computed::ALT_PHONE_NUMBER, phone.number);
        out.set(computed::ALT_PHONE_NUMBER_PREFIX, phone.prefix);
        out.set(computed::ALT_PHONE_NUMBER_TYPE, phone.phone_type);
        out
    }
}

fn resolve(columns: &[ColumnMapping], index_of: impl Fn(&str) -> Option<usize>) -> Vec<(String, usize)> {
    columns
        .iter()
        .filter_map(|m| index_of(&m.target).map(|idx| (m.source.clone(), idx)))
        .collect()
}

/// [`RecordMapper::map_record`] with the built-in mapping.
pub fn map_record(src: &SourceRecord<'_>) -> QmsRecord {
    RecordMapper::default().map_record(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::QMS_COLUMNS;

    fn table(pairs: &[(&str, &str)]) -> SourceTable {
        SourceTable::new(
            pairs.iter().map(|(k, _)| k.to_string()).collect(),
            vec![pairs.iter().map(|(_, v)| v.to_string()).collect()],
        )
    }

    #[test]
    fn maps_every_rule_onto_its_target() {
        let t = table(&[
            ("LegacyTenantId", " 42 "),
            ("FirstName", "Ann"),
            ("MiddleName", "Q"),
            ("LastName", "Lee"),
            ("Email", " Ann@X.com "),
            ("CompanyName", "nan"),
            ("DateOfBirth", "1980-02-03"),
            ("AddressLine", "1 Main St"),
            ("AddressLineOptional", "Apt 2"),
            ("City", "Springfield"),
            ("State", "IL"),
            ("PostalCode", "62701"),
            ("Country", "US"),
            ("HomePhoneNumber", "5550000"),
            ("DriversLicense", "D123"),
            ("DriversLicenseState", "IL"),
        ]);
        let rec = map_record(&t.record(0).unwrap());

        assert_eq!(rec.legacy_tenant_id, "42");
        assert_eq!(rec.value("FirstName"), "Ann");
        assert_eq!(rec.value("LastName"), "Q Lee");
        assert_eq!(rec.value("Email"), "Ann@X.com");
        assert_eq!(rec.value("CompanyName"), "");
        assert_eq!(rec.value("DateOfBirth"), "1980-02-03");
        assert_eq!(rec.value("AddressStreet1"), "1 Main St");
        assert_eq!(rec.value("AddressStreet2"), "Apt 2");
        assert_eq!(rec.value("AddressCity"), "Springfield");
        assert_eq!(rec.value("AddressState"), "IL");
        assert_eq!(rec.value("AddressPostalCode"), "62701");
        assert_eq!(rec.value("AddressCountry"), "US");
        assert_eq!(rec.value("PhoneNumber"), "5550000");
        assert_eq!(rec.value("PhoneNumberPrefix"), "+1");
        assert_eq!(rec.value("PhoneNumberType"), "Home Phone");
        assert_eq!(rec.value("DriverLicenseNumber"), "D123");
        assert_eq!(rec.value("DriverLicenseState"), "IL");
        assert_eq!(rec.value("DriverLicenseExpirationDate"), "");
        assert_eq!(rec.value("MilitaryProfileRank"), "");
        assert!(ALTERNATE_CONTACT_COLUMNS.iter().all(|c| rec.value(c).is_empty()));
    }

    #[test]
    fn missing_columns_default_to_empty() {
        let t = table(&[("Unrelated", "x")]);
        let rec = map_record(&t.record(0).unwrap());
        assert_eq!(rec, QmsRecord::new());
        assert_eq!(rec.to_row().len(), QMS_COLUMNS.len() + 3);
    }

    #[test]
    fn mapping_is_repeatable() {
        let t = table(&[("FirstName", "Ann"), ("CellPhoneNumber", "5551234")]);
        let mapper = RecordMapper::default();
        let r = t.record(0).unwrap();
        assert_eq!(mapper.map_record(&r), mapper.map_record(&r));
    }

    #[test]
    fn parallel_and_sequential_tables_agree() {
        let rows: Vec<Vec<String>> = (0..500)
            .map(|i| vec![i.to_string(), format!("First{i}")])
            .collect();
        let t = SourceTable::new(vec!["LegacyTenantId".into(), "FirstName".into()], rows);
        let mapper = RecordMapper::default();

        let seq = mapper.map_table(&t, false);
        let par = mapper.map_table(&t, true);
        assert_eq!(seq, par);
        assert_eq!(par[499].legacy_tenant_id, "499");
    }

    #[test]
    fn alternate_projection_fills_contact_block() {
        let t = table(&[
            ("LegacyTenantId", "7"),
            ("FirstName", "Bob"),
            ("LastName", "Ray"),
            ("Email", "no@email.com"),
            ("Relationship", "Brother"),
            ("City", "Austin"),
            ("WorkPhoneNumber", "5559999"),
        ]);
        let alt = RecordMapper::default().map_alternate(&t.record(0).unwrap());
        assert_eq!(alt.get("AlternateContactFirstName"), Some("Bob"));
        assert_eq!(alt.get("AlternateContactLastName"), Some("Ray"));
        assert_eq!(alt.get("AlternateContactEmail"), Some(""));
        assert_eq!(alt.get("AlternateContactRelationship"), Some("Brother"));
        assert_eq!(alt.get("AlternateContactAddressCity"), Some("Austin"));
        assert_eq!(alt.get("AlternateContactPhoneNumber"), Some("5559999"));
        assert_eq!(alt.get("AlternateContactPhoneNumberType"), Some("Work Phone"));
    }
}
