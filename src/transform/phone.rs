//! Picks one phone number from several candidate columns.

use crate::config::{MappingConfig, PhoneCandidate};
use crate::types::SourceRecord;

use super::normalize::{is_filled, normalize};

/// The chosen phone number with its prefix and type label.
///
/// All three fields are empty when no candidate is filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneSelection {
    pub number: String,
    pub prefix: String,
    pub phone_type: String,
}

impl PhoneSelection {
    /// `(number, prefix, type)`.
    pub fn into_tuple(self) -> (String, String, String) {
        (self.number, self.prefix, self.phone_type)
    }
}

/// Walks phone candidates in priority order and keeps the first filled one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneSelector {
    candidates: Vec<PhoneCandidate>,
    prefix: String,
}

impl Default for PhoneSelector {
    fn default() -> Self {
        Self::from_config(&MappingConfig::default())
    }
}

impl PhoneSelector {
    /// Create a selector from an ordered candidate list and the prefix to attach.
    pub fn new(candidates: Vec<PhoneCandidate>, prefix: impl Into<String>) -> Self {
        Self {
            candidates,
            prefix: prefix.into(),
        }
    }

    /// Create a selector from the phone settings of a [`MappingConfig`].
    pub fn from_config(cfg: &MappingConfig) -> Self {
        Self::new(cfg.phone_candidates.clone(), cfg.phone_prefix.clone())
    }

    /// Select the first filled candidate; later candidates are never consulted after a match.
    pub fn select(&self, record: &SourceRecord<'_>) -> PhoneSelection {
        self.candidates
            .iter()
            .find_map(|c| {
                let raw = record.get(&c.column);
                is_filled(raw).then(|| PhoneSelection {
                    number: normalize(raw),
                    prefix: self.prefix.clone(),
                    phone_type: c.label.clone(),
                })
            })
            .unwrap_or_default()
    }
}

/// [`PhoneSelector::select`] with the built-in cell → home → work order and `+1` prefix.
pub fn select_phone(record: &SourceRecord<'_>) -> PhoneSelection {
    PhoneSelector::default().select(record)
}
