//! The compiled document and its metadata.
//!
//! An [`ApiModel`] is built once by the compiler and is read-only from then
//! on; every consumer takes `&ApiModel`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::field::Field;
use crate::group::Group;

/// Version used when the root line omits one.
pub const DEFAULT_VERSION: &str = "v1";

/// The shape of every JSON response body.
///
/// Responses are wrapped in an object with a fixed set of top-level keys; the
/// endpoint's own response fields live under `data_field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Top-level keys of the envelope in declaration order.
    pub fields: Vec<String>,
    /// Key holding the endpoint payload.
    pub data_field: String,
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self {
            fields: vec!["data".to_string(), "msg".to_string(), "stat".to_string()],
            data_field: "data".to_string(),
        }
    }
}

/// Document-level settings collected from `- key: value` directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: String,
    pub description: String,
    /// Host the API is served from (`- apiserver:`).
    pub api_server: String,
    /// Semantic version of the server (`- version:`).
    pub server_version: String,
    /// Auth tag aliases, `alias -> middleware name`.
    pub auth_map: BTreeMap<String, String>,
    pub response_envelope: ResponseEnvelope,
}

impl DocumentMeta {
    /// Resolves an endpoint auth tag through the auth map.
    ///
    /// Tags that are not aliases are returned unchanged.
    pub fn resolve_auth<'a>(&'a self, tag: &'a str) -> &'a str {
        self.auth_map.get(tag).map(String::as_str).unwrap_or(tag)
    }
}

/// A fully compiled API document.
///
/// ## Examples
///
/// ```
/// use apimodel_define::{ApiModel, Endpoint, Group};
///
/// let mut group = Group::new("user");
/// group.endpoints.push(Endpoint::new("login", "user"));
///
/// let mut model = ApiModel::new("myapi", "v1");
/// model.groups.push(group);
///
/// assert_eq!(model.endpoint_count(), 1);
/// assert!(model.find_endpoint("user", "login").is_some());
/// assert_eq!(model.base_path(), "/myapi/v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiModel {
    /// Route prefix from the root line.
    pub prefix: String,
    /// API version from the root line (`v1`, `v2`, ...).
    pub version: String,
    /// Groups in declaration order.
    pub groups: Vec<Group>,
    pub meta: DocumentMeta,
}

impl ApiModel {
    /// Creates an empty model with default metadata.
    pub fn new(prefix: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            version: version.into(),
            groups: Vec::new(),
            meta: DocumentMeta::default(),
        }
    }

    /// Every endpoint of every group, in declaration order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> + '_ {
        self.groups.iter().flat_map(|group| group.endpoints.iter())
    }

    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Looks up an endpoint by group name and dotted endpoint name.
    pub fn find_endpoint(&self, group: &str, name: &str) -> Option<&Endpoint> {
        self.find_group(group)?.endpoint(name)
    }

    pub fn endpoint_count(&self) -> usize {
        self.groups.iter().map(|group| group.endpoints.len()).sum()
    }

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    /// Path every route is mounted under (`/{prefix}/{version}`).
    pub fn base_path(&self) -> String {
        format!("/{}/{}", self.prefix, self.version)
    }
}

/// Renders the model back as DSL text.
///
/// Groups, endpoints, fields and aliases are written; document directives are
/// not.
impl fmt::Display for ApiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "root {} {}", self.prefix, self.version)?;
        for group in &self.groups {
            write!(f, "{}", group.name)?;
            if !group.comment.is_empty() {
                write!(f, " # {}", group.comment)?;
            }
            writeln!(f)?;
            for endpoint in &group.endpoints {
                writeln!(f, "    {endpoint}")?;
                if !endpoint.request_fields.is_empty() {
                    writeln!(f, "        - req")?;
                    for field in &endpoint.request_fields {
                        write_field(f, field, 2)?;
                    }
                }
                if !endpoint.response_fields.is_empty() {
                    writeln!(f, "        - resp")?;
                    for field in &endpoint.response_fields {
                        write_field(f, field, 2)?;
                    }
                }
                if !endpoint.aliases.is_empty() {
                    writeln!(f, "        - alias: {}", endpoint.aliases.join(","))?;
                }
            }
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &Field, depth: usize) -> fmt::Result {
    writeln!(f, "{}{}", "    ".repeat(depth), field)?;
    for child in &field.children {
        write_field(f, child, depth + 1)?;
    }
    Ok(())
}
