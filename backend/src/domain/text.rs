//! Free-text normalisation shared by account fields.

/// Trim the input and collapse every internal whitespace run to one space.
///
/// # Examples
/// ```
/// use laundry_backend::domain::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Ada \t  Lovelace "), "Ada Lovelace");
/// ```
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
