//! The fixed QMS tenant import layout.
//!
//! [`QMS_COLUMNS`] is the single source of truth for target field names and their order. The
//! mapper sizes every [`crate::types::QmsRecord`] from it and the exporter writes its header from
//! [`output_header`], so adding or removing a target field is a one-line change here.

/// Join key carried alongside the QMS fields.
pub const LEGACY_TENANT_ID: &str = "LegacyTenantId";
/// Derived dedup key: email + first + last + street, spaces removed.
pub const DUPLICATE_CHECK: &str = "duplicatecheck";
/// Derived dedup key: first + last, spaces removed.
pub const FIRST_LAST: &str = "firstLast";

/// Columns written ahead of the QMS fields, in output order.
pub const LEADING_COLUMNS: [&str; 3] = [LEGACY_TENANT_ID, DUPLICATE_CHECK, FIRST_LAST];

/// Target field names in QMS import order.
pub const QMS_COLUMNS: &[&str] = &[
    "Email",
    "FirstName",
    "LastName",
    "CompanyName",
    "Gender",
    "DateOfBirth",
    "AddressStreet1",
    "AddressStreet2",
    "AddressCity",
    "AddressCountry",
    "AddressState",
    "AddressPostalCode",
    "PhoneNumberPrefix",
    "PhoneNumber",
    "PhoneNumberType",
    "AlternateContactFirstName",
    "AlternateContactLastName",
    "AlternateContactEmail",
    "AlternateContactRelationship",
    "AlternateContactAddressStreet1",
    "AlternateContactAddressStreet2",
    "AlternateContactAddressCity",
    "AlternateContactAddressCountry",
    "AlternateContactAddressState",
    "AlternateContactAddressPostalCode",
    "AlternateContactPhoneNumberPrefix",
    "AlternateContactPhoneNumber",
    "AlternateContactPhoneNumberType",
    "MilitaryProfileBranchOfService",
    "MilitaryProfileRank",
    "MilitaryProfileIsRetired",
    "MilitaryProfilePlaceOfBirth",
    "MilitaryProfileMilitaryUnit",
    "MilitaryProfileSquadron",
    "MilitaryProfileMilitaryEmail",
    "MilitaryProfileLastFourSsnDigits",
    "MilitaryProfileDivision",
    "MilitaryProfileTypeOfService",
    "MilitaryProfileCurrentDutyLocationStreet1",
    "MilitaryProfileCurrentDutyLocationStreet2",
    "MilitaryProfileCurrentDutyLocationCity",
    "MilitaryProfileCurrentDutyLocationCountry",
    "MilitaryProfileCurrentDutyLocationState",
    "MilitaryProfileCurrentDutyLocationPostalCode",
    "MilitaryProfileDateEnteredService",
    "MilitaryProfileEndOfActiveServiceDate",
    "MilitaryProfileMilitaryId",
    "MilitaryProfileCommandingOfficerFirstName",
    "MilitaryProfileCommandingOfficerLastName",
    "MilitaryProfileCommandingOfficerPhoneNumberPrefix",
    "MilitaryProfileCommandingOfficerPhoneNumber",
    "MilitaryProfileAgentFirstName",
    "MilitaryProfileAgentLastName",
    "MilitaryProfileAgentEmail",
    "MilitaryProfileAgentPhoneNumberPrefix",
    "MilitaryProfileAgentPhoneNumber",
    "MilitaryProfileAgentAddressStreet1",
    "MilitaryProfileAgentAddressStreet2",
    "MilitaryProfileAgentAddressCity",
    "MilitaryProfileAgentAddressCountry",
    "MilitaryProfileAgentAddressState",
    "MilitaryProfileAgentAddressPostalCode",
    "DriverLicenseNumber",
    "DriverLicenseState",
    "DriverLicenseExpirationDate",
];

/// The 13 fields the alternate-contact merge overwrites on a key match.
pub const ALTERNATE_CONTACT_COLUMNS: [&str; 13] = [
    "AlternateContactFirstName",
    "AlternateContactLastName",
    "AlternateContactEmail",
    "AlternateContactRelationship",
    "AlternateContactAddressStreet1",
    "AlternateContactAddressStreet2",
    "AlternateContactAddressCity",
    "AlternateContactAddressCountry",
    "AlternateContactAddressState",
    "AlternateContactAddressPostalCode",
    "AlternateContactPhoneNumber",
    "AlternateContactPhoneNumberPrefix",
    "AlternateContactPhoneNumberType",
];

/// Target fields filled by computed rules rather than verbatim column copies.
pub mod computed {
    pub const EMAIL: &str = "Email";
    pub const LAST_NAME: &str = "LastName";
    pub const PHONE_NUMBER: &str = "PhoneNumber";
    pub const PHONE_NUMBER_PREFIX: &str = "PhoneNumberPrefix";
    pub const PHONE_NUMBER_TYPE: &str = "PhoneNumberType";
    pub const FIRST_NAME: &str = "FirstName";
    pub const ADDRESS_STREET1: &str = "AddressStreet1";

    pub const ALT_LAST_NAME: &str = "AlternateContactLastName";
    pub const ALT_EMAIL: &str = "AlternateContactEmail";
    pub const ALT_PHONE_NUMBER: &str = "AlternateContactPhoneNumber";
    pub const ALT_PHONE_NUMBER_PREFIX: &str = "AlternateContactPhoneNumberPrefix";
    pub const ALT_PHONE_NUMBER_TYPE: &str = "AlternateContactPhoneNumberType";

    /// Primary-record targets owned by the email, name and phone rules.
    pub const PRIMARY_OWNED: [&str; 5] = [
        EMAIL,
        LAST_NAME,
        PHONE_NUMBER,
        PHONE_NUMBER_PREFIX,
        PHONE_NUMBER_TYPE,
    ];

    /// Alternate-contact targets owned by the email, name and phone rules.
    pub const ALTERNATE_OWNED: [&str; 5] = [
        ALT_LAST_NAME,
        ALT_EMAIL,
        ALT_PHONE_NUMBER,
        ALT_PHONE_NUMBER_PREFIX,
        ALT_PHONE_NUMBER_TYPE,
    ];
}

/// Source column names read by the computed rules.
pub mod source {
    pub const EMAIL: &str = "Email";
    pub const MIDDLE_NAME: &str = "MiddleName";
    pub const LAST_NAME: &str = "LastName";
}

/// Returns the index of a QMS field, if it is part of the schema.
pub fn qms_index_of(name: &str) -> Option<usize> {
    QMS_COLUMNS.iter().position(|c| *c == name)
}

/// Returns true for the 13 alternate-contact fields.
pub fn is_alternate_contact_column(name: &str) -> bool {
    ALTERNATE_CONTACT_COLUMNS.contains(&name)
}

/// Full output header: [`LEADING_COLUMNS`] followed by [`QMS_COLUMNS`].
pub fn output_header() -> Vec<&'static str> {
    LEADING_COLUMNS
        .iter()
        .chain(QMS_COLUMNS.iter())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_no_duplicate_names() {
        let mut names: Vec<&str> = output_header();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn output_header_leads_with_key_and_dedup_columns() {
        let header = output_header();
        assert_eq!(header.len(), QMS_COLUMNS.len() + 3);
        assert_eq!(&header[..4], &["LegacyTenantId", "duplicatecheck", "firstLast", "Email"]);
        assert_eq!(header.last(), Some(&"DriverLicenseExpirationDate"));
    }

    #[test]
    fn alternate_contact_columns_are_schema_fields() {
        for name in ALTERNATE_CONTACT_COLUMNS {
            assert!(qms_index_of(name).is_some(), "{name} missing from schema");
        }
        for name in computed::PRIMARY_OWNED.iter().chain(computed::ALTERNATE_OWNED.iter()) {
            assert!(qms_index_of(name).is_some(), "{name} missing from schema");
        }
    }
}
