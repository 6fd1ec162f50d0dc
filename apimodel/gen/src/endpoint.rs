//! Endpoint line parsing.
//!
//! ```text
//! <name> [GET|POST|ANY] [<auth>|none] [json|raw|reqRaw|respRaw] [# comment]
//! ```

use std::str::FromStr;

use apimodel_define::ident::{WILDCARD_SEGMENT, is_valid_identifier};
use apimodel_define::{Endpoint, HttpMethod, Protocol};

use crate::config::Dialect;
use crate::errors::{CompileError, Result};
use crate::lines::split_comment;

/// Auth tag meaning "no auth middleware".
pub const NO_AUTH: &str = "none";

/// Parses one trimmed endpoint line belonging to `group`.
///
/// ## Examples
///
/// ```
/// use apimodel_define::{HttpMethod, Protocol};
/// use apimodel_gen::config::Dialect;
/// use apimodel_gen::endpoint::parse_endpoint;
///
/// let ep = parse_endpoint(2, "create POST userAuth raw # create", "user", Dialect::V4).unwrap();
/// assert_eq!(ep.method, HttpMethod::Post);
/// assert_eq!(ep.auth.as_deref(), Some("userAuth"));
/// assert_eq!(ep.protocol, Protocol::Raw);
/// ```
pub fn parse_endpoint(line_no: usize, raw: &str, group: &str, dialect: Dialect) -> Result<Endpoint> {
    let (content, comment) = split_comment(raw);
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if !(1..=4).contains(&tokens.len()) {
        return Err(CompileError::grammar(
            line_no,
            raw,
            format!("endpoint line needs 1 to 4 tokens, found {}", tokens.len()),
        ));
    }

    let name = tokens[0];
    validate_endpoint_name(line_no, raw, name, dialect)?;

    let mut endpoint = Endpoint::new(name, group);
    endpoint.comment = comment;
    endpoint.line = line_no;

    if let Some(method) = tokens.get(1) {
        endpoint.method = match method.to_uppercase().as_str() {
            "POST" => HttpMethod::Post,
            "ANY" => HttpMethod::Any,
            _ => HttpMethod::Get,
        };
    }

    if let Some(auth) = tokens.get(2) {
        endpoint.auth = (*auth != NO_AUTH).then(|| auth.to_string());
    }

    if let Some(protocol) = tokens.get(3) {
        endpoint.protocol = Protocol::from_str(protocol).map_err(|_| {
            CompileError::grammar(line_no, raw, format!("unknown protocol '{protocol}'"))
        })?;
    }

    Ok(endpoint)
}

fn validate_endpoint_name(line_no: usize, raw: &str, name: &str, dialect: Dialect) -> Result<()> {
    let segments: Vec<&str> = name.split('.').collect();
    let last = segments.len() - 1;
    for (idx, segment) in segments.iter().enumerate() {
        if is_valid_identifier(segment) {
            continue;
        }
        if *segment == WILDCARD_SEGMENT && idx == last && idx > 0 {
            if dialect.allow_wildcard() {
                continue;
            }
            return Err(CompileError::grammar(
                line_no,
                raw,
                format!("wildcard endpoint '{name}' is not supported by dialect {dialect}"),
            ));
        }
        return Err(CompileError::grammar(
            line_no,
            raw,
            format!("invalid endpoint name '{name}'"),
        ));
    }
    Ok(())
}
