//! Dedup keys derived from the final record.
//!
//! Both keys read the merged record, so they must be computed after alternate contacts are applied.

use crate::schema::computed::{ADDRESS_STREET1, EMAIL, FIRST_NAME, LAST_NAME};
use crate::types::QmsRecord;

/// `Email + FirstName + LastName + AddressStreet1` with every space removed.
pub fn duplicate_check(record: &QmsRecord) -> String {
    strip_spaces(&[
        record.value(EMAIL),
        record.value(FIRST_NAME),
        record.value(LAST_NAME),
        record.value(ADDRESS_STREET1),
    ])
}

/// `FirstName + LastName` with every space removed.
pub fn first_last(record: &QmsRecord) -> String {
    strip_spaces(&[record.value(FIRST_NAME), record.value(LAST_NAME)])
}

/// Store both dedup keys on `record`. Run after the alternate-contact merge.
pub fn derive_dedup_keys(record: &mut QmsRecord) {
    record.duplicate_check = duplicate_check(record);
    record.first_last = first_last(record);
}

fn strip_spaces(parts: &[&str]) -> String {
    parts.concat().replace(' ', "")
}
