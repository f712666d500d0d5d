//! Missing-value detection and trimming for raw cell text.

/// Returns true if `value` carries data.
///
/// Absent values, values that are empty after trimming, and the literal text `nan` (any case) are
/// all unfilled. The `nan` form shows up when numeric spreadsheet cells are coerced to text, and
/// users also paste it by hand.
pub fn is_filled(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(raw) => {
            let trimmed = raw.trim();
            !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("nan")
        }
    }
}

/// Trimmed text of a filled value, or the empty string.
pub fn normalize(value: Option<&str>) -> String {
    if is_filled(value) {
        value.unwrap_or_default().trim().to_string()
    } else {
        String::new()
    }
}
