//! Name field composition.

use super::normalize::{is_filled, normalize};

/// Merge an optional middle name into the last-name field.
///
/// Filled parts are trimmed and joined with a single space, middle first. Unfilled parts
/// (absent, blank, `nan`) are skipped, so a lone part comes back without padding.
pub fn combine_middle_last(middle: Option<&str>, last: Option<&str>) -> String {
    [middle, last]
        .into_iter()
        .filter(|part| is_filled(*part))
        .map(normalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::combine_middle_last;

    #[test]
    fn combines_middle_and_last() {
        assert_eq!(combine_middle_last(Some("Q"), Some("Smith")), "Q Smith");
        assert_eq!(combine_middle_last(Some("  Q "), Some(" Smith")), "Q Smith");
    }

    #[test]
    fn skips_unfilled_parts() {
        assert_eq!(combine_middle_last(Some(""), Some("Smith")), "Smith");
        assert_eq!(combine_middle_last(Some("nan"), Some("Smith")), "Smith");
        assert_eq!(combine_middle_last(None, Some("Smith")), "Smith");
        assert_eq!(combine_middle_last(Some("Q"), None), "Q");
        assert_eq!(combine_middle_last(Some(""), Some("")), "");
        assert_eq!(combine_middle_last(None, Some("NaN")), "");
    }
}
