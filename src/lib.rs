//! `qms-tenant-import` converts tenant exports into the fixed-schema QMS tenant import CSV.
//!
//! A run reads a primary tenant export (CSV or spreadsheet), maps every non-blank row into the
//! [`schema::QMS_COLUMNS`] layout, left-joins an alternate-contact export by `LegacyTenantId`,
//! derives the `duplicatecheck` / `firstLast` dedup keys, and writes one CSV.
//!
//! ## What the mapping does
//!
//! - **Phone**: the first filled of `CellPhoneNumber`, `HomePhoneNumber`, `WorkPhoneNumber` wins,
//!   with prefix `+1` and a `Cell Phone` / `Home Phone` / `Work Phone` label.
//! - **Email**: trimmed; placeholder addresses from a denylist become empty.
//! - **Last name**: `MiddleName` and `LastName` joined with one space.
//! - **Alternate contacts**: the first alternate row for a `LegacyTenantId` wins; later rows with
//!   the same key are ignored.
//!
//! Blank cells, whitespace, and the text `nan` (any case) all count as "no value". Missing columns
//! never fail a run; their targets stay empty.
//!
//! ## Quick example: file to file
//!
//! ```no_run
//! use qms_tenant_import::pipeline::ImportRequest;
//!
//! # fn main() -> Result<(), qms_tenant_import::ImportError> {
//! let summary = ImportRequest::new("tenants.xlsx", "qms_import.csv")
//!     .with_alternates("alternate_tenants.csv")
//!     .run()?;
//! println!("rows={}", summary.output_rows);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV/Excel loading and observer hooks
//! - [`transform`]: the mapping and merge rules
//! - [`pipeline`]: end-to-end runs
//! - [`export`]: CSV output
//! - [`config`]: denylist and column tables
//! - [`schema`]: the fixed QMS layout
//! - [`types`]: source tables and QMS records
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod schema;
pub mod transform;
pub mod types;

pub use error::{ImportError, ImportResult};
