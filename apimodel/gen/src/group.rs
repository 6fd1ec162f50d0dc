//! Group line parsing.

use apimodel_define::Group;
use apimodel_define::ident::is_valid_identifier;

use crate::errors::{CompileError, Result};
use crate::lines::split_comment;

/// Parses one group line: `<name> [# comment]`.
///
/// Tokens after the name are ignored.
pub fn parse_group(line_no: usize, raw: &str) -> Result<Group> {
    let (content, comment) = split_comment(raw);
    let Some(name) = content.split_whitespace().next() else {
        return Err(CompileError::grammar(line_no, raw, "missing group name"));
    };
    if !is_valid_identifier(name) {
        return Err(CompileError::grammar(
            line_no,
            raw,
            format!("invalid group name '{name}'"),
        ));
    }

    let mut group = Group::new(name);
    group.comment = comment;
    group.line = line_no;
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_comment() {
        let group = parse_group(4, "user # user module").unwrap();
        assert_eq!(group.name, "user");
        assert_eq!(group.comment, "user module");
        assert_eq!(group.line, 4);
        assert!(group.endpoints.is_empty());
    }

    #[test]
    fn missing_or_invalid_names_fail() {
        assert!(parse_group(1, "# just a comment").is_err());
        assert!(parse_group(1, "- owner: me").is_err());
        assert!(parse_group(1, "user.admin").is_err());
    }
}
