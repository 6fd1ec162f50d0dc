//! Request parameter and response field records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Array marker accepted as a prefix or suffix of a type token.
pub const ARRAY_MARKER: &str = "[]";

/// Resolved type of a string-keyed map of objects.
pub const NESTED_MAP_TYPE: &str = "map[string]struct";

/// Resolved type of a nested object.
pub const NESTED_OBJECT_TYPE: &str = "struct";

/// A single request parameter or response field.
///
/// Both request and response sections of an endpoint use this record; the
/// only difference is that response fields never carry a validation rule.
///
/// Fields form a tree: a field whose type is not a scalar is *nested* and
/// owns the fields declared beneath it.
///
/// ## Examples
///
/// ```
/// use apimodel_define::Field;
///
/// let mut address = Field::new("address", "Address", "struct").nested();
/// address.add_child(Field::new("city", "str", "string"));
///
/// assert!(address.is_nested);
/// assert_eq!(address.children.len(), 1);
/// assert_eq!(address.children[0].resolved_type, "string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field identifier.
    pub name: String,
    /// Type token exactly as written in the source (`[]int`, `map[str]Foo`).
    pub declared_type: String,
    /// Target type after mapping (`[]int64`, `map[string]struct`).
    pub resolved_type: String,
    /// Whether the declared type carried an array marker.
    pub is_array: bool,
    /// Whether the bare type is an object, array of objects, or object map.
    pub is_nested: bool,
    /// Whether the field must be present. Defaults to `true`.
    pub required: bool,
    /// Validator expression; only request parameters carry one.
    pub validation_rule: String,
    /// Trailing `#` comment, trimmed.
    pub comment: String,
    /// 1-based source line, `0` when built by hand.
    pub line: usize,
    /// Sub-fields. Always empty unless `is_nested`.
    pub children: Vec<Field>,
}

impl Field {
    /// Creates a required scalar field with no comment.
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        resolved_type: impl Into<String>,
    ) -> Self {
        let declared_type = declared_type.into();
        let is_array =
            declared_type.starts_with(ARRAY_MARKER) || declared_type.ends_with(ARRAY_MARKER);
        Self {
            name: name.into(),
            declared_type,
            resolved_type: resolved_type.into(),
            is_array,
            is_nested: false,
            required: true,
            validation_rule: String::new(),
            comment: String::new(),
            line: 0,
            children: Vec::new(),
        }
    }

    /// Marks the field as nested.
    pub fn nested(mut self) -> Self {
        self.is_nested = true;
        self
    }

    /// Marks the field as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the trailing comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the validation rule.
    pub fn with_validation(mut self, rule: impl Into<String>) -> Self {
        self.validation_rule = rule.into();
        self
    }

    /// Sets the source line.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Appends a sub-field.
    ///
    /// Callers only attach children to nested fields; the parser guarantees
    /// this, and hand-built trees should respect it too.
    pub fn add_child(&mut self, child: Field) -> &mut Self {
        debug_assert!(self.is_nested, "children attached to scalar field {}", self.name);
        self.children.push(child);
        self
    }

    /// Resolved type with any array marker removed (`[]int64` -> `int64`).
    pub fn element_type(&self) -> &str {
        self.resolved_type
            .strip_prefix(ARRAY_MARKER)
            .unwrap_or(self.resolved_type.as_str())
    }

    /// Whether this field is a string-keyed map of objects.
    pub fn is_map(&self) -> bool {
        self.resolved_type == NESTED_MAP_TYPE
    }

    /// Object name written in the declared type, if the field is nested.
    ///
    /// `[]Address` gives `Address`, `map[str]Tag` gives `Tag`. The parser
    /// discards this name when resolving, so consumers that want it for
    /// titling re-derive it here.
    pub fn nested_type_name(&self) -> Option<&str> {
        if !self.is_nested {
            return None;
        }
        let bare = self
            .declared_type
            .trim_start_matches(ARRAY_MARKER)
            .trim_end_matches(ARRAY_MARKER);
        let bare = bare.strip_prefix("map[str]").unwrap_or(bare);
        (!bare.is_empty()).then_some(bare)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.declared_type, self.required)?;
        if !self.validation_rule.is_empty() {
            write!(f, ":\"{}\"", self.validation_rule)?;
        }
        if !self.comment.is_empty() {
            write!(f, " # {}", self.comment)?;
        }
        Ok(())
    }
}
