//! Left-join of alternate contacts onto mapped primary records.
//!
//! The alternate source may list several rows for one `LegacyTenantId`. Only the first row in
//! source order is kept: [`AlternateLookupTable::insert`] is insert-if-absent, never overwrite.
//! When the alternate source has no `LegacyTenantId` column at all, every row keys to `""` and
//! at most one survives; [`MergeStats::duplicates_discarded`] shows how many were dropped.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::schema::{ALTERNATE_CONTACT_COLUMNS, LEGACY_TENANT_ID};
use crate::types::{QmsRecord, SourceTable};

use super::mapper::RecordMapper;
use super::normalize::normalize;

/// The 13 alternate-contact values for one tenant, in [`ALTERNATE_CONTACT_COLUMNS`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternateContact {
    pub(crate) values: [String; 13],
}

impl AlternateContact {
    /// Value of an alternate-contact field.
    pub fn get(&self, field: &str) -> Option<&str> {
        position(field).map(|idx| self.values[idx].as_str())
    }

    /// Set an alternate-contact field; returns `false` for names outside the block.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        match position(field) {
            Some(idx) => {
                self.values[idx] = value.into();
                true
            }
            None => false,
        }
    }

    /// Overwrite all 13 fields on `record`, empty values included.
    pub fn apply_to(&self, record: &mut QmsRecord) {
        for (field, value) in ALTERNATE_CONTACT_COLUMNS.iter().zip(self.values.iter()) {
            record.set(field, value.clone());
        }
    }
}

fn position(field: &str) -> Option<usize> {
    ALTERNATE_CONTACT_COLUMNS.iter().position(|c| *c == field)
}

/// Counters describing one alternate-contact merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Rows read from the alternate source, blank rows included.
    pub alternate_rows: usize,
    /// Alternate rows dropped because every cell was unfilled.
    pub blank_rows_dropped: usize,
    /// Distinct keys kept in the lookup table.
    pub lookup_entries: usize,
    /// Alternate rows discarded because an earlier row had the same key.
    pub duplicates_discarded: usize,
    /// Primary records that found a match.
    pub matched: usize,
}

/// Normalized `LegacyTenantId` → first alternate contact seen for it.
#[derive(Debug, Clone, Default)]
pub struct AlternateLookupTable {
    entries: HashMap<String, AlternateContact>,
    duplicates_discarded: usize,
    blank_rows_skipped: usize,
}

impl AlternateLookupTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from an alternate source.
    ///
    /// Rows with no filled cell are skipped. Every other row is projected with `mapper` and
    /// inserted under its trimmed `LegacyTenantId` (absent → `""`), first row wins.
    pub fn build(alternates: &SourceTable, mapper: &RecordMapper) -> Self {
        let mut table = Self::new();
        for row in alternates.records() {
            if row.is_blank() {
                table.blank_rows_skipped += 1;
                continue;
            }
            let key = normalize(row.get(LEGACY_TENANT_ID));
            table.insert(key, mapper.map_alternate(&row));
        }
        table
    }

    /// Insert `contact` under `key` unless the key is already present.
    ///
    /// Returns `true` if the contact was stored.
    pub fn insert(&mut self, key: String, contact: AlternateContact) -> bool {
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(contact);
                true
            }
            Entry::Occupied(_) => {
                self.duplicates_discarded += 1;
                false
            }
        }
    }

    /// Look up the contact for a raw (unnormalized) key.
    pub fn get(&self, raw_key: &str) -> Option<&AlternateContact> {
        self.entries.get(&normalize(Some(raw_key)))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no contact was stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows rejected so far because their key was already taken.
    pub fn duplicates_discarded(&self) -> usize {
        self.duplicates_discarded
    }

    /// Blank rows skipped by [`Self::build`].
    pub fn blank_rows_skipped(&self) -> usize {
        self.blank_rows_skipped
    }

    /// Overlay matching contacts onto `records`, returning how many matched.
    ///
    /// Records without a match keep their current alternate-contact fields.
    pub fn apply(&self, records: &mut [QmsRecord]) -> usize {
        let mut matched = 0;
        for record in records.iter_mut() {
            if let Some(contact) = self.get(&record.legacy_tenant_id) {
                contact.apply_to(record);
                matched += 1;
            }
        }
        matched
    }
}

/// Build the lookup table from `alternates` and merge it into `records`.
pub fn merge_alternate_contacts(
    records: &mut [QmsRecord],
    alternates: &SourceTable,
    mapper: &RecordMapper,
) -> MergeStats {
    let table = AlternateLookupTable::build(alternates, mapper);
    let matched = table.apply(records);

    MergeStats {
        alternate_rows: alternates.row_count(),
        blank_rows_dropped: table.blank_rows_skipped(),
        lookup_entries: table.len(),
        duplicates_discarded: table.duplicates_discarded(),
        matched,
    }
}
