//! Email clean-up against a denylist of placeholder addresses.

use std::collections::HashSet;

use super::normalize::is_filled;

/// Placeholder addresses that the source system uses in place of a real email.
pub const DEFAULT_EMAIL_DENYLIST: [&str; 5] = [
    "quikstorcloud@gmail.com",
    "#noemail",
    "cloud_tenant@quikstor.com",
    "no@email.com",
    "none@none.com",
];

/// Trims emails and blanks out placeholders.
///
/// Comparison is case-insensitive; the returned value keeps its original casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSanitizer {
    denylist: HashSet<String>,
}

impl Default for EmailSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL_DENYLIST)
    }
}

impl EmailSanitizer {
    /// Build a sanitizer from a list of denied addresses (any case, surrounding space ignored).
    pub fn new<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let denylist = denylist
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { denylist }
    }

    /// Returns true if the address matches a denylist entry.
    pub fn is_denied(&self, email: &str) -> bool {
        self.denylist.contains(&email.trim().to_lowercase())
    }

    /// Trimmed `email`, or `""` when it is unfilled or denied.
    pub fn sanitize(&self, email: Option<&str>) -> String {
        match email {
            Some(raw) if is_filled(email) && !self.is_denied(raw) => raw.trim().to_string(),
            _ => String::new(),
        }
    }
}

/// [`EmailSanitizer::sanitize`] with the built-in denylist.
pub fn sanitize_email(email: Option<&str>) -> String {
    EmailSanitizer::default().sanitize(email)
}

#[cfg(test)]
mod tests {
    use super::{sanitize_email, EmailSanitizer};

    #[test]
    fn denied_addresses_are_blanked_case_insensitively() {
        assert_eq!(sanitize_email(Some("QuikStorCloud@Gmail.com ")), "");
        assert_eq!(sanitize_email(Some("NONE@none.com")), "");
        assert_eq!(sanitize_email(Some("#NoEmail")), "");
    }

    #[test]
    fn kept_addresses_are_trimmed_but_keep_case() {
        assert_eq!(sanitize_email(Some("  Jane@Example.com")), "Jane@Example.com");
    }

    #[test]
    fn unfilled_values_become_empty() {
        assert_eq!(sanitize_email(Some("NaN")), "");
        assert_eq!(sanitize_email(Some("   ")), "");
        assert_eq!(sanitize_email(None), "");
    }

    #[test]
    fn custom_denylist_replaces_defaults() {
        let s = EmailSanitizer::new([" Bad@None.com "]);
        assert_eq!(s.sanitize(Some("bad@none.com")), "");
        assert_eq!(s.sanitize(Some("no@email.com")), "no@email.com");
    }
}
