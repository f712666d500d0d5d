//! Mapping configuration: the domain facts that drive the transform.
//!
//! The denylist, the phone candidate order, and the two verbatim source→target column tables are
//! data rather than code. [`MappingConfig::default`] reproduces the built-in QMS mapping; a JSON
//! file may replace any subset of it (missing keys fall back to the defaults).
//!
//! ```
//! use qms_tenant_import::config::MappingConfig;
//!
//! # fn main() -> Result<(), qms_tenant_import::ImportError> {
//! let cfg = MappingConfig::from_json_str(r#"{ "email_denylist": ["bad@none.com"] }"#)?;
//! assert_eq!(cfg.email_denylist, vec!["bad@none.com".to_string()]);
//! assert_eq!(cfg.phone_prefix, "+1");
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ImportResult};
use crate::schema::{self, computed, LEGACY_TENANT_ID};
use crate::transform::email::DEFAULT_EMAIL_DENYLIST;

/// Copy a source column verbatim (after normalization) into a target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Source header name.
    pub source: String,
    /// QMS target field name.
    pub target: String,
}

impl ColumnMapping {
    /// Create a column mapping.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// One phone candidate column and the type label emitted when it is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneCandidate {
    /// Source header name.
    pub column: String,
    /// Value written to the phone type field.
    pub label: String,
}

impl PhoneCandidate {
    /// Create a phone candidate.
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
        }
    }
}

/// Configuration for [`crate::transform::RecordMapper`] and the alternate-contact merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingConfig {
    /// Placeholder emails to blank out (case-insensitive).
    pub email_denylist: Vec<String>,
    /// Prefix emitted with every selected phone number.
    pub phone_prefix: String,
    /// Phone columns in priority order.
    pub phone_candidates: Vec<PhoneCandidate>,
    /// Verbatim copies from a primary row into the QMS record.
    pub primary_columns: Vec<ColumnMapping>,
    /// Verbatim copies from an alternate row into the `AlternateContact*` fields.
    pub alternate_columns: Vec<ColumnMapping>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            email_denylist: DEFAULT_EMAIL_DENYLIST.iter().map(|s| s.to_string()).collect(),
            phone_prefix: "+1".to_string(),
            phone_candidates: vec![
                PhoneCandidate::new("CellPhoneNumber", "Cell Phone"),
                PhoneCandidate::new("HomePhoneNumber", "Home Phone"),
                PhoneCandidate::new("WorkPhoneNumber", "Work Phone"),
            ],
            primary_columns: vec![
                ColumnMapping::new("FirstName", "FirstName"),
                ColumnMapping::new("CompanyName", "CompanyName"),
                ColumnMapping::new("DateOfBirth", "DateOfBirth"),
                ColumnMapping::new("AddressLine", "AddressStreet1"),
                ColumnMapping::new("AddressLineOptional", "AddressStreet2"),
                ColumnMapping::new("City", "AddressCity"),
                ColumnMapping::new("State", "AddressState"),
                ColumnMapping::new("PostalCode", "AddressPostalCode"),
                ColumnMapping::new("Country", "AddressCountry"),
                ColumnMapping::new("DriversLicense", "DriverLicenseNumber"),
                ColumnMapping::new("DriversLicenseState", "DriverLicenseState"),
            ],
            alternate_columns: vec![
                ColumnMapping::new("FirstName", "AlternateContactFirstName"),
                ColumnMapping::new("Relationship", "AlternateContactRelationship"),
                ColumnMapping::new("AddressLine", "AlternateContactAddressStreet1"),
                ColumnMapping::new("AddressLineOptional", "AlternateContactAddressStreet2"),
                ColumnMapping::new("City", "AlternateContactAddressCity"),
                ColumnMapping::new("State", "AlternateContactAddressState"),
                ColumnMapping::new("PostalCode", "AlternateContactAddressPostalCode"),
                ColumnMapping::new("Country", "AlternateContactAddressCountry"),
            ],
        }
    }
}

impl MappingConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(json: &str) -> ImportResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file and validate it.
    pub fn from_json_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check that every target names a field the mapping may write.
    ///
    /// Primary targets must be QMS fields outside the alternate-contact block and not owned by the
    /// email, last-name or phone rules. Alternate targets must be `AlternateContact*` fields not
    /// owned by those rules.
    pub fn validate(&self) -> ImportResult<()> {
        for m in &self.primary_columns {
            if m.target == LEGACY_TENANT_ID {
                return Err(invalid(format!(
                    "primary column '{}' targets the join key '{LEGACY_TENANT_ID}', which is always copied",
                    m.source
                )));
            }
            if schema::qms_index_of(&m.target).is_none() {
                return Err(invalid(format!("primary target '{}' is not a QMS field", m.target)));
            }
            if schema::is_alternate_contact_column(&m.target) {
                return Err(invalid(format!(
                    "primary target '{}' is filled by the alternate-contact merge",
                    m.target
                )));
            }
            if computed::PRIMARY_OWNED.contains(&m.target.as_str()) {
                return Err(invalid(format!(
                    "primary target '{}' is computed and cannot be mapped verbatim",
                    m.target
                )));
            }
        }

        for m in &self.alternate_columns {
            if !schema::is_alternate_contact_column(&m.target) {
                return Err(invalid(format!(
                    "alternate target '{}' is not an AlternateContact field",
                    m.target
                )));
            }
            if computed::ALTERNATE_OWNED.contains(&m.target.as_str()) {
                return Err(invalid(format!(
                    "alternate target '{}' is computed and cannot be mapped verbatim",
                    m.target
                )));
            }
        }

        if let Some(c) = self.phone_candidates.iter().find(|c| c.column.trim().is_empty()) {
            return Err(invalid(format!("phone candidate '{}' has an empty column name", c.label)));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ImportError {
    ImportError::InvalidConfig { message }
}
