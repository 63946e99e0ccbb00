//! Centralized validation and helper functions.

/// Maximum number of analysis objects read from a single file (DOS protection)
pub const MAX_OBJECTS: usize = 100_000;

/// Maximum number of bins in a single histogram (DOS protection)
pub const MAX_BINS: usize = 1_000_000;

/// Validate that a string is a usable analysis object path.
///
/// # Examples
///
/// ```
/// use yoda_plot::utils::validation::is_valid_object_path;
///
/// assert!(is_valid_object_path("/ALICE_YYYY_I1234567/d01-x01-y01"));
/// assert!(!is_valid_object_path("d01-x01-y01")); // no leading slash
/// assert!(!is_valid_object_path("/with space"));
/// ```
#[must_use]
pub fn is_valid_object_path(s: &str) -> bool {
    s.starts_with('/') && s.len() > 1 && !s.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Normalize a user-supplied histogram path to the form stored in files.
/// Adds the leading slash if missing; returns None if the result is not a valid path.
#[must_use]
pub fn normalize_object_path(s: &str) -> Option<String> {
    let trimmed = s.trim();
    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    is_valid_object_path(&path).then_some(path)
}

/// Check if adding another object would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new object.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_object_limit(count: usize) -> Option<String> {
    if count >= MAX_OBJECTS {
        Some(format!(
            "Too many objects: adding another would exceed maximum of {MAX_OBJECTS}"
        ))
    } else {
        None
    }
}

/// Same as [`check_object_limit`], for histogram bins.
#[must_use]
pub fn check_bin_limit(count: usize) -> Option<String> {
    if count >= MAX_BINS {
        Some(format!(
            "Too many bins: adding another would exceed maximum of {MAX_BINS}"
        ))
    } else {
        None
    }
}
