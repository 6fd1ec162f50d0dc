//! Type token resolution.
//!
//! Maps the type tokens written in field lines to target type names, and
//! target type names to documentation labels.
//!
//! ## Scalar Table
//!
//! | DSL token | Target |
//! |-----------|--------|
//! | `str`, `string` | `string` |
//! | `int`, `int64`, `long` | `int64` |
//! | `int32` | `int32` |
//! | `float`, `float64`, `double` | `float64` |
//! | `float32` | `float32` |
//! | `time` | `time.Time` |
//! | `bool` | `bool` |
//! | `any` | `interface{}` |
//! | `dict` | `map[string]interface{}` |
//! | `json` | `json.RawMessage` |
//! | `JsonNode` | `JsonNode` |
//!
//! Any token outside the table names a nested object.

use apimodel_define::{ARRAY_MARKER, NESTED_MAP_TYPE, NESTED_OBJECT_TYPE, OBJECT_LABEL};

/// Prefix of a string-keyed object map type token.
pub const MAP_PREFIX: &str = "map[str]";

const SCALARS: &[(&str, &str)] = &[
    ("str", "string"),
    ("string", "string"),
    ("int", "int64"),
    ("int32", "int32"),
    ("int64", "int64"),
    ("long", "int64"),
    ("float", "float64"),
    ("float32", "float32"),
    ("float64", "float64"),
    ("double", "float64"),
    ("time", "time.Time"),
    ("bool", "bool"),
    ("any", "interface{}"),
    ("dict", "map[string]interface{}"),
    ("json", "json.RawMessage"),
    ("JsonNode", "JsonNode"),
];

/// Outcome of resolving one type token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Target type (`[]int64`, `struct`, `map[string]struct`).
    pub target: String,
    pub is_array: bool,
    pub is_nested: bool,
    /// Object name written in the token for nested types (`Address`).
    pub nested_name: Option<String>,
}

/// Every DSL scalar token, in table order.
pub fn scalar_tokens() -> impl Iterator<Item = &'static str> {
    SCALARS.iter().map(|(token, _)| *token)
}

/// Target type for a scalar token, `None` when the token is not a scalar.
pub fn scalar_target(token: &str) -> Option<&'static str> {
    SCALARS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, target)| *target)
}

/// Removes every leading and trailing `[]` marker.
///
/// Returns the bare token and whether any marker was present. `[]int[]` is
/// the same one-dimensional array as `[]int`.
pub fn strip_array_marker(token: &str) -> (&str, bool) {
    let bare = token
        .trim_start_matches(ARRAY_MARKER)
        .trim_end_matches(ARRAY_MARKER);
    (bare, bare.len() != token.len())
}

/// Resolves a type token.
///
/// Never fails: a token that is neither a scalar nor a map resolves to a
/// nested object.
///
/// ## Examples
///
/// ```
/// use apimodel_gen::types::resolve;
///
/// assert_eq!(resolve("[]int").target, "[]int64");
/// assert_eq!(resolve("map[str]Tag").target, "map[string]struct");
///
/// let items = resolve("Item[]");
/// assert!(items.is_array && items.is_nested);
/// assert_eq!(items.target, "[]struct");
/// assert_eq!(items.nested_name.as_deref(), Some("Item"));
/// ```
pub fn resolve(token: &str) -> ResolvedType {
    let (bare, is_array) = strip_array_marker(token);
    let prefix = if is_array { ARRAY_MARKER } else { "" };

    if let Some(target) = scalar_target(bare) {
        return ResolvedType {
            target: format!("{prefix}{target}"),
            is_array,
            is_nested: false,
            nested_name: None,
        };
    }

    if let Some(name) = bare.strip_prefix(MAP_PREFIX) {
        return ResolvedType {
            target: NESTED_MAP_TYPE.to_string(),
            is_array,
            is_nested: true,
            nested_name: (!name.is_empty()).then(|| name.to_string()),
        };
    }

    ResolvedType {
        target: format!("{prefix}{NESTED_OBJECT_TYPE}"),
        is_array,
        is_nested: true,
        nested_name: (!bare.is_empty()).then(|| bare.to_string()),
    }
}

/// Documentation label for a resolved scalar type.
pub fn doc_type(resolved: &str) -> &'static str {
    match resolved {
        "int32" | "int64" | "float32" | "float64" => "Number",
        "string" => "String",
        "bool" => "Boolean",
        "time.Time" => "Date",
        _ => OBJECT_LABEL,
    }
}

/// Swagger 2.0 type name for a resolved type.
pub fn swagger_type(resolved: &str) -> &'static str {
    if resolved.starts_with(ARRAY_MARKER) {
        "array"
    } else if resolved == NESTED_OBJECT_TYPE || resolved == NESTED_MAP_TYPE {
        "object"
    } else if resolved.starts_with("str") {
        "string"
    } else if resolved.starts_with("int")
        || resolved.starts_with("float")
        || resolved.starts_with("num")
    {
        "number"
    } else if resolved.starts_with("bool") {
        "boolean"
    } else {
        "object"
    }
}
