//! Identifier rules shared by every DSL construct.
//!
//! Group names, field names, the route prefix and every dot segment of an
//! endpoint name must be plain identifiers: ASCII letters, digits and `_`,
//! never starting with a digit.

/// Endpoint name segment that marks a wildcard route (`files.*`).
pub const WILDCARD_SEGMENT: &str = "*";

/// Returns `true` when `s` is a valid DSL identifier.
///
/// ## Examples
///
/// ```
/// use apimodel_define::ident::is_valid_identifier;
///
/// assert!(is_valid_identifier("user_id"));
/// assert!(is_valid_identifier("_private"));
/// assert!(!is_valid_identifier("2fa"));
/// assert!(!is_valid_identifier("user-id"));
/// assert!(!is_valid_identifier(""));
/// ```
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Upper-cases the first character and leaves the rest untouched.
///
/// ## Examples
///
/// ```
/// use apimodel_define::ident::upper_first;
///
/// assert_eq!(upper_first("user"), "User");
/// assert_eq!(upper_first("getById"), "GetById");
/// assert_eq!(upper_first(""), "");
/// ```
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
