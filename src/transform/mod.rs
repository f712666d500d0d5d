//! The field-mapping and record-merge rules.
//!
//! Everything here is total: missing columns and missing values degrade to empty strings and no
//! function returns an error.
//!
//! - [`normalize`]: `nan`/blank detection and trimming
//! - [`phone`]: first filled phone candidate wins
//! - [`name`]: middle + last name into one field
//! - [`email`]: trim and blank out placeholder addresses
//! - [`mapper`]: one source row → one [`crate::types::QmsRecord`]
//! - [`merge`]: first-wins alternate-contact lookup and overlay
//! - [`dedup`]: `duplicatecheck` / `firstLast` keys
//!
//! ## Example: map, merge, derive keys
//!
//! ```rust
//! use qms_tenant_import::transform::{derive_dedup_keys, merge_alternate_contacts, RecordMapper};
//! use qms_tenant_import::types::SourceTable;
//!
//! let primary = SourceTable::new(
//!     vec!["LegacyTenantId".into(), "FirstName".into(), "LastName".into(), "CellPhoneNumber".into()],
//!     vec![vec!["7".into(), "Ann".into(), "Lee".into(), "5551234".into()]],
//! );
//! let alternates = SourceTable::new(
//!     vec!["LegacyTenantId".into(), "FirstName".into()],
//!     vec![vec!["7".into(), "Bob".into()]],
//! );
//!
//! let mapper = RecordMapper::default();
//! let mut records = mapper.map_table(&primary, false);
//! merge_alternate_contacts(&mut records, &alternates, &mapper);
//! records.iter_mut().for_each(derive_dedup_keys);
//!
//! assert_eq!(records[0].value("PhoneNumberType"), "Cell Phone");
//! assert_eq!(records[0].value("AlternateContactFirstName"), "Bob");
//! assert_eq!(records[0].first_last, "AnnLee");
//! ```

pub mod dedup;
pub mod email;
pub mod mapper;
pub mod merge;
pub mod name;
pub mod normalize;
pub mod phone;

pub use dedup::{derive_dedup_keys, duplicate_check, first_last};
pub use email::{sanitize_email, EmailSanitizer, DEFAULT_EMAIL_DENYLIST};
pub use mapper::{map_record, RecordMapper};
pub use merge::{merge_alternate_contacts, AlternateContact, AlternateLookupTable, MergeStats};
pub use name::combine_middle_last;
pub use normalize::{is_filled, normalize};
pub use phone::{select_phone, PhoneSelection, PhoneSelector};
