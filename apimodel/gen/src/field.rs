//! Field line parsing.
//!
//! ```text
//! <name> <type> [true|false[:"<rule>"]] [# comment]
//! ```
//!
//! Request parameters and response fields share this grammar. Only request
//! parameters carry a quoted validation rule; in a response line anything
//! after the required flag is ignored.

use apimodel_define::Field;
use apimodel_define::ident::is_valid_identifier;
use tracing::debug;

use crate::errors::{CompileError, Result};
use crate::lines::split_comment;
use crate::types::resolve;

/// Which section of an endpoint a field line belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldMode {
    /// Request parameter, may carry a validation rule
    #[default]
    Param,
    /// Response field
    Resp,
}

/// Parses one trimmed field line.
///
/// ## Examples
///
/// ```
/// use apimodel_gen::field::{parse_field, FieldMode};
///
/// let field = parse_field(3, r#"age int false:"gte=0" # user age"#, FieldMode::Param).unwrap();
/// assert_eq!(field.resolved_type, "int64");
/// assert!(!field.required);
/// assert_eq!(field.validation_rule, "gte=0");
/// assert_eq!(field.comment, "user age");
/// ```
pub fn parse_field(line_no: usize, raw: &str, mode: FieldMode) -> Result<Field> {
    let (content, comment) = split_comment(raw);
    let tokens: Vec<&str> = content.split_whitespace().collect();
    let [name, declared, rest @ ..] = tokens.as_slice() else {
        return Err(CompileError::grammar(line_no, raw, "missing type"));
    };

    if !is_valid_identifier(name) {
        return Err(CompileError::grammar(
            line_no,
            raw,
            format!("invalid field name '{name}'"),
        ));
    }

    let (required, rule) = if rest.is_empty() {
        (true, String::new())
    } else {
        parse_flags(line_no, raw, &rest.join(" "), mode)?
    };

    let resolved = resolve(declared);
    if let Some(object) = resolved.nested_name.as_deref() {
        debug!(line = line_no, field = %name, object, "nested type accepted as object");
    }

    let mut field = Field::new(*name, *declared, resolved.target)
        .with_comment(comment)
        .with_validation(rule)
        .at_line(line_no);
    field.is_nested = resolved.is_nested;
    field.required = required;
    Ok(field)
}

fn parse_flags(line_no: usize, raw: &str, flags: &str, mode: FieldMode) -> Result<(bool, String)> {
    let (required, residual) = if let Some(rest) = flags.strip_prefix("true") {
        (true, rest)
    } else if let Some(rest) = flags.strip_prefix("false") {
        (false, rest)
    } else {
        return Err(CompileError::grammar(
            line_no,
            raw,
            "expected 'true' or 'false' after the type",
        ));
    };

    if mode == FieldMode::Resp {
        return Ok((required, String::new()));
    }

    let residual = residual.strip_prefix(':').unwrap_or(residual).trim();
    if residual.is_empty() {
        return Ok((required, String::new()));
    }
    let Some(quoted) = residual.strip_prefix('"') else {
        return Err(CompileError::grammar(
            line_no,
            raw,
            "validation rule must be quoted",
        ));
    };
    match quoted.find('"') {
        Some(end) => Ok((required, quoted[..end].to_string())),
        None => Err(CompileError::grammar(
            line_no,
            raw,
            "unterminated validation rule",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(line: &str) -> Result<Field> {
        parse_field(1, line, FieldMode::Param)
    }

    #[test]
    fn two_tokens_default_to_required_without_rule() {
        let field = param("name str").unwrap();
        assert!(field.required);
        assert!(field.validation_rule.is_empty());
        assert_eq!(field.resolved_type, "string");
        assert!(field.children.is_empty());
    }

    #[test]
    fn validation_rules_are_extracted() {
        let field = param(r#"x str false:"alpha,beta""#).unwrap();
        assert!(!field.required);
        assert_eq!(field.validation_rule, "alpha,beta");

        let field = param(r#"x str true:"numeric""#).unwrap();
        assert!(field.required);
        assert_eq!(field.validation_rule, "numeric");
    }

    #[test]
    fn colon_is_optional_and_spaces_inside_rule_survive() {
        let field = param(r#"x str true "min=1, max=3""#).unwrap();
        assert_eq!(field.validation_rule, "min=1, max=3");
    }

    #[test]
    fn comment_is_trimmed_and_kept() {
        let field = param("id int true   #   primary key  ").unwrap();
        assert_eq!(field.comment, "primary key");
    }

    #[test]
    fn missing_type_fails() {
        let err = param("lonely").unwrap_err();
        assert!(err.to_string().contains("missing type"));
        assert!(param("   # only a comment").is_err());
    }

    #[test]
    fn invalid_names_fail() {
        assert!(param("2nd str").is_err());
        assert!(param("user-id str").is_err());
    }

    #[test]
    fn flag_must_be_boolean() {
        let err = param("x str maybe").unwrap_err();
        assert!(err.is_grammar());
    }

    #[test]
    fn unterminated_rule_fails() {
        let err = param(r#"x str true:"numeric"#).unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn unquoted_rule_fails_in_param_mode() {
        assert!(param("x str true:numeric").is_err());
    }

    #[test]
    fn response_mode_ignores_residual_text() {
        let field = parse_field(1, "x str false:numeric", FieldMode::Resp).unwrap();
        assert!(!field.required);
        assert!(field.validation_rule.is_empty());
    }

    #[test]
    fn nested_types_are_flagged() {
        let field = param("address addr").unwrap();
        assert!(field.is_nested);
        assert_eq!(field.resolved_type, "struct");

        let field = param("tags map[str]Tag false").unwrap();
        assert!(field.is_nested);
        assert!(!field.required);
        assert_eq!(field.resolved_type, "map[string]struct");

        let field = param("items []Item").unwrap();
        assert!(field.is_nested && field.is_array);
        assert_eq!(field.resolved_type, "[]struct");
    }

    #[test]
    fn errors_report_line_and_raw_text() {
        let err = parse_field(12, "bad", FieldMode::Resp).unwrap_err();
        assert_eq!(err.line(), Some(12));
        assert!(err.to_string().contains("bad"));
    }
}
