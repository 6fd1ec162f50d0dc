//! Document compilation.
//!
//! A document is compiled in one pass over its lines:
//!
//! 1. The first non-blank line is the root: `root <prefix> [v<N>]`
//! 2. Column-0 directive lines update the document metadata
//! 3. Every other line is structural, and its indentation depth decides
//!    what it is:
//!
//! | Depth | Line |
//! |-------|------|
//! | 0 | group |
//! | 1 | endpoint of the last group |
//! | 2 | `- req`, `- resp`, `- alias:` or a field of the last endpoint |
//! | 3+ | child field of the open nested field one level up |
//!
//! Compilation fails on the first error and never returns a partial model.

use apimodel_define::{ApiModel, DEFAULT_VERSION, Endpoint, Field};
use apimodel_define::ident::is_valid_identifier;
use tracing::{debug, info, instrument};

use crate::config::CompileOptions;
use crate::directive::apply_directive;
use crate::endpoint::parse_endpoint;
use crate::errors::{CompileError, Result};
use crate::field::{FieldMode, parse_field};
use crate::group::parse_group;
use crate::lines::{LineKind, Sentinel, classify, indent_width, sentinel, split_comment};
use crate::nesting::{FIELD_DEPTH, NestingStack};

/// Keyword starting the root line.
pub const ROOT_KEYWORD: &str = "root";

/// Compiles DSL source text.
///
/// ## Examples
///
/// ```
/// use apimodel_gen::{compile, CompileOptions};
///
/// let source = "\
/// root myapi v1
/// user # user module
///     create POST userAuth json # create a user
///         - req
///         name str true # user name
///         - resp
///         id int true # new id
/// ";
///
/// let model = compile(source, &CompileOptions::default()).unwrap();
/// let create = model.find_endpoint("user", "create").unwrap();
/// assert_eq!(create.request_fields[0].resolved_type, "string");
/// assert_eq!(create.response_fields[0].resolved_type, "int64");
/// ```
pub fn compile(source: &str, options: &CompileOptions) -> Result<ApiModel> {
    let lines: Vec<&str> = source.lines().collect();
    compile_lines(&lines, options)
}

/// Compiles a document that has already been split into lines.
#[instrument(skip_all, fields(dialect = %options.dialect, lines = lines.len()))]
pub fn compile_lines<S: AsRef<str>>(lines: &[S], options: &CompileOptions) -> Result<ApiModel> {
    let mut numbered = lines
        .iter()
        .map(AsRef::as_ref)
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .skip_while(|(_, line)| line.trim().is_empty());

    let Some((root_no, root)) = numbered.next() else {
        return Err(CompileError::configuration(0, "", "empty document"));
    };
    let (prefix, version) = parse_root(root_no, root)?;
    debug!(prefix = %prefix, version = %version, "Parsed root");

    let mut parser = DocumentParser::new(options, ApiModel::new(prefix, version));
    for (line_no, raw) in numbered {
        parser.line(line_no, raw)?;
    }
    let model = parser.finish();

    info!(
        groups = model.groups.len(),
        endpoints = model.endpoint_count(),
        "Compiled api model"
    );
    Ok(model)
}

/// Parses `root <prefix> [v<N>] [# comment]`.
fn parse_root(line_no: usize, raw: &str) -> Result<(String, String)> {
    let (content, _) = split_comment(raw);
    let tokens: Vec<&str> = content.split_whitespace().collect();
    let (prefix, version) = match tokens.as_slice() {
        [ROOT_KEYWORD, prefix] => (*prefix, DEFAULT_VERSION),
        [ROOT_KEYWORD, prefix, version] => (*prefix, *version),
        _ => {
            return Err(CompileError::configuration(
                line_no,
                raw,
                "expected 'root <prefix> [v<N>]'",
            ));
        }
    };

    if !is_valid_identifier(prefix) {
        return Err(CompileError::configuration(
            line_no,
            raw,
            format!("invalid prefix '{prefix}'"),
        ));
    }
    let valid_version = version
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
    if !valid_version {
        return Err(CompileError::configuration(
            line_no,
            raw,
            format!("invalid version '{version}', expected v followed by digits"),
        ));
    }
    Ok((prefix.to_string(), version.to_string()))
}

/// Mutable state of one compile run.
struct DocumentParser<'o> {
    options: &'o CompileOptions,
    model: ApiModel,
    stack: NestingStack,
    scope: FieldMode,
    in_endpoint: bool,
}

impl<'o> DocumentParser<'o> {
    fn new(options: &'o CompileOptions, model: ApiModel) -> Self {
        Self {
            options,
            model,
            stack: NestingStack::new(),
            scope: FieldMode::Param,
            in_endpoint: false,
        }
    }

    fn line(&mut self, line_no: usize, raw: &str) -> Result<()> {
        match classify(raw, self.options.dialect) {
            LineKind::Blank => Ok(()),
            LineKind::Directive(key) => apply_directive(line_no, raw, key, &mut self.model.meta),
            LineKind::Structural => self.structural(line_no, raw),
        }
    }

    fn structural(&mut self, line_no: usize, raw: &str) -> Result<()> {
        let tab_width = self.options.tab_width.max(1);
        let width = indent_width(raw);
        if width % tab_width != 0 {
            return Err(CompileError::grammar(
                line_no,
                raw,
                format!("indentation of {width} is not a multiple of {tab_width}"),
            ));
        }

        match width / tab_width {
            0 => self.group(line_no, raw),
            1 => self.endpoint(line_no, raw),
            depth => self.field(line_no, raw, depth),
        }
    }

    fn group(&mut self, line_no: usize, raw: &str) -> Result<()> {
        self.close_nesting();
        let group = parse_group(line_no, raw)?;
        debug!(line = line_no, group = %group.name, "Group");
        self.model.groups.push(group);
        self.in_endpoint = false;
        self.scope = FieldMode::Param;
        Ok(())
    }

    fn endpoint(&mut self, line_no: usize, raw: &str) -> Result<()> {
        self.close_nesting();
        let dialect = self.options.dialect;
        let Some(group) = self.model.groups.last_mut() else {
            return Err(CompileError::grammar(line_no, raw, "endpoint outside of a group"));
        };
        let endpoint = parse_endpoint(line_no, raw, &group.name, dialect)?;
        debug!(
            line = line_no,
            group = %group.name,
            endpoint = %endpoint.name,
            method = %endpoint.method,
            "Endpoint"
        );
        group.endpoints.push(endpoint);
        self.in_endpoint = true;
        self.scope = FieldMode::Param;
        Ok(())
    }

    fn field(&mut self, line_no: usize, raw: &str, depth: usize) -> Result<()> {
        if !self.in_endpoint {
            return Err(CompileError::grammar(line_no, raw, "field outside of an endpoint"));
        }

        if depth == FIELD_DEPTH
            && let Some(marker) = sentinel(raw.trim())
        {
            self.close_nesting();
            match marker {
                Sentinel::Req => self.scope = FieldMode::Param,
                Sentinel::Resp => self.scope = FieldMode::Resp,
                Sentinel::Alias(list) => {
                    let aliases = list
                        .split(',')
                        .map(str::trim)
                        .filter(|alias| !alias.is_empty())
                        .map(str::to_string)
                        .collect();
                    if let Some(endpoint) = current_endpoint(&mut self.model) {
                        endpoint.aliases = aliases;
                    }
                }
            }
            return Ok(());
        }

        let field = parse_field(line_no, raw, self.scope)?;
        let Some(roots) = field_list(&mut self.model, self.scope) else {
            return Err(CompileError::grammar(line_no, raw, "field outside of an endpoint"));
        };
        self.stack.place(depth, field, roots, raw)
    }

    fn close_nesting(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        if let Some(roots) = field_list(&mut self.model, self.scope) {
            self.stack.drain_into(roots);
        }
    }

    fn finish(mut self) -> ApiModel {
        self.close_nesting();
        self.model
    }
}

fn current_endpoint(model: &mut ApiModel) -> Option<&mut Endpoint> {
    model.groups.last_mut()?.endpoints.last_mut()
}

fn field_list(model: &mut ApiModel, scope: FieldMode) -> Option<&mut Vec<Field>> {
    let endpoint = current_endpoint(model)?;
    Some(match scope {
        FieldMode::Param => &mut endpoint.request_fields,
        FieldMode::Resp => &mut endpoint.response_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dialect;

    fn v4(source: &str) -> Result<ApiModel> {
        compile(source, &CompileOptions::default())
    }

    #[test]
    fn root_defaults_version() {
        let model = v4("root shop").unwrap();
        assert_eq!(model.prefix, "shop");
        assert_eq!(model.version, "v1");
        assert!(model.groups.is_empty());
    }

    #[test]
    fn root_accepts_a_trailing_comment() {
        let model = v4("root myapi v1 # main api\nuser\n").unwrap();
        assert_eq!(model.prefix, "myapi");
        assert_eq!(model.version, "v1");

        let err = v4("root myapi v1 extra # main api").unwrap_err();
        assert!(matches!(err, CompileError::Configuration { .. }));
    }

    #[test]
    fn leading_blank_lines_are_skipped() {
        let model = v4("\n\n   \nroot shop v3\n").unwrap();
        assert_eq!(model.version, "v3");
    }

    #[test]
    fn empty_document_is_a_configuration_error() {
        let err = v4("  \n\n").unwrap_err();
        assert!(matches!(err, CompileError::Configuration { .. }));
    }

    #[test]
    fn malformed_roots() {
        for source in [
            "base shop",
            "root",
            "root 9shop",
            "root shop 1",
            "root shop v",
            "root shop v1a",
            "root shop v1 extra",
        ] {
            let err = v4(source).unwrap_err();
            assert!(
                matches!(err, CompileError::Configuration { line: 1, .. }),
                "{source}: {err}"
            );
        }
    }

    #[test]
    fn endpoint_before_group_fails() {
        let err = v4("root a\n    ping").unwrap_err();
        assert!(err.to_string().contains("endpoint outside of a group"));
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn field_before_endpoint_fails() {
        let err = v4("root a\nuser\n        name str").unwrap_err();
        assert!(err.to_string().contains("field outside of an endpoint"));
    }

    #[test]
    fn misaligned_indentation_fails() {
        let err = v4("root a\nuser\n   ping").unwrap_err();
        assert!(err.is_grammar());
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("   ping"));
    }

    #[test]
    fn sentinels_switch_scope_and_back() {
        let source = "\
root a
user
    login POST
        - resp
        token str
        - req
        password str
";
        let model = v4(source).unwrap();
        let login = model.find_endpoint("user", "login").unwrap();
        assert_eq!(login.response_fields.len(), 1);
        assert_eq!(login.request_fields.len(), 1);
        assert_eq!(login.request_fields[0].name, "password");
    }

    #[test]
    fn scope_resets_at_each_endpoint() {
        let source = "\
root a
user
    one
        - resp
        id int
    two
        name str
";
        let model = v4(source).unwrap();
        let two = model.find_endpoint("user", "two").unwrap();
        assert_eq!(two.request_fields.len(), 1);
        assert!(two.response_fields.is_empty());
    }

    #[test]
    fn alias_entries_are_trimmed() {
        let source = "root a\nuser\n    info\n        - alias: /old/info , /v0/info,\n";
        let model = v4(source).unwrap();
        let info = model.find_endpoint("user", "info").unwrap();
        assert_eq!(info.aliases, vec!["/old/info", "/v0/info"]);
    }

    #[test]
    fn tab_width_is_configurable() {
        let options = CompileOptions {
            dialect: Dialect::V4,
            tab_width: 2,
        };
        let model = compile("root a\nuser\n  info\n    id int\n", &options).unwrap();
        assert_eq!(model.find_endpoint("user", "info").unwrap().request_fields.len(), 1);
    }

    #[test]
    fn directives_fill_metadata() {
        let source = "\
root a
- title: Shop
- description: Shop backend
- apiserver: api.shop.test
- version: 2.1.0
- authmap: user=UserAuth
user
    info GET user
";
        let model = v4(source).unwrap();
        let meta = model.meta();
        assert_eq!(meta.title, "Shop");
        assert_eq!(meta.description, "Shop backend");
        assert_eq!(meta.api_server, "api.shop.test");
        assert_eq!(meta.server_version, "2.1.0");
        assert_eq!(meta.resolve_auth("user"), "UserAuth");
    }

    #[test]
    #[tracing_test::traced_test]
    fn compile_emits_summary_event() {
        v4("root shop v2\nuser\n    info\n").unwrap();
        assert!(logs_contain("Compiled api model"));
        assert!(logs_contain("compile_lines"));
    }
}
