//! Line classification.
//!
//! Every source line after the root is sorted into one of a few kinds by an
//! ordered rule table. The first matching rule wins; a line no rule claims is
//! structural.

use crate::config::Dialect;

/// Comment marker separating a line's content from its trailing comment.
pub const COMMENT_MARKER: char = '#';

/// Document directive keys recognized at column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKey {
    Title,
    Description,
    ApiServer,
    Version,
    AuthMap,
    /// Response envelope layout
    Resp,
}

impl DirectiveKey {
    const ALL: [DirectiveKey; 6] = [
        Self::Title,
        Self::Description,
        Self::ApiServer,
        Self::Version,
        Self::AuthMap,
        Self::Resp,
    ];

    /// Line prefix introducing this directive.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Title => "- title:",
            Self::Description => "- description:",
            Self::ApiServer => "- apiserver:",
            Self::Version => "- version:",
            Self::AuthMap => "- authmap:",
            Self::Resp => "- resp:",
        }
    }

    fn enabled(self, dialect: Dialect) -> bool {
        match self {
            Self::Resp => dialect.response_envelope(),
            _ => true,
        }
    }
}

/// Kind of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only
    Blank,
    /// A document directive at column 0
    Directive(DirectiveKey),
    /// A group, endpoint, sentinel or field line
    Structural,
}

type Rule = fn(&str, Dialect) -> Option<LineKind>;

const RULES: &[Rule] = &[blank, directive];

fn blank(line: &str, _: Dialect) -> Option<LineKind> {
    line.trim().is_empty().then_some(LineKind::Blank)
}

fn directive(line: &str, dialect: Dialect) -> Option<LineKind> {
    DirectiveKey::ALL
        .into_iter()
        .find(|key| key.enabled(dialect) && line.starts_with(key.prefix()))
        .map(LineKind::Directive)
}

/// Classifies a raw (untrimmed) line.
///
/// ## Examples
///
/// ```
/// use apimodel_gen::config::Dialect;
/// use apimodel_gen::lines::{classify, DirectiveKey, LineKind};
///
/// assert_eq!(classify("   ", Dialect::V4), LineKind::Blank);
/// assert_eq!(classify("- title: Shop", Dialect::V4), LineKind::Directive(DirectiveKey::Title));
/// assert_eq!(classify("    - title: nested", Dialect::V4), LineKind::Structural);
/// ```
pub fn classify(line: &str, dialect: Dialect) -> LineKind {
    RULES
        .iter()
        .find_map(|rule| rule(line, dialect))
        .unwrap_or(LineKind::Structural)
}

/// Markers that switch field scope or set aliases inside an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentinel<'a> {
    /// `- req`: following fields are request parameters
    Req,
    /// `- resp`: following fields are response fields
    Resp,
    /// `- alias: a,b`: the raw alias list after the colon
    Alias(&'a str),
}

const ALIAS_PREFIX: &str = "- alias:";

/// Recognizes a sentinel in an already trimmed depth-2 line.
pub fn sentinel(trimmed: &str) -> Option<Sentinel<'_>> {
    if trimmed.starts_with("- resp") {
        Some(Sentinel::Resp)
    } else if trimmed.starts_with("- req") {
        Some(Sentinel::Req)
    } else {
        trimmed.strip_prefix(ALIAS_PREFIX).map(Sentinel::Alias)
    }
}

/// Splits a line at its first unescaped comment marker.
///
/// Returns the content before the marker and the trimmed comment after it.
/// A `\#` in the comment is unescaped to `#`.
pub fn split_comment(line: &str) -> (&str, String) {
    let mut prev = None;
    for (idx, c) in line.char_indices() {
        if c == COMMENT_MARKER && prev != Some('\\') {
            let comment = line[idx + 1..].trim().replace("\\#", "#");
            return (&line[..idx], comment);
        }
        prev = Some(c);
    }
    (line, String::new())
}

/// Number of leading whitespace characters.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
