//! Endpoint definitions and the names derived from them.
//!
//! An endpoint's route, handler and model names are never stored; they are
//! pure functions of the endpoint name and its owning group, so downstream
//! generators always agree on them.
//!
//! | Endpoint `user.create` in group `account` | Value |
//! |-------------------------------------------|-------|
//! | [`Endpoint::api_name`]            | `UserCreate` |
//! | [`Endpoint::handler_name`]        | `UserCreateApi` |
//! | [`Endpoint::router_name`]         | `user/create` |
//! | [`Endpoint::request_model_name`]  | `ReqAccountUserCreate` |
//! | [`Endpoint::response_model_name`] | `RespAccountUserCreate` |
//! | [`Endpoint::full_name`]           | `accountUserCreate` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::ident::{WILDCARD_SEGMENT, upper_first};
use crate::types::{HttpMethod, Protocol};

/// A single API endpoint.
///
/// ## Examples
///
/// ```
/// use apimodel_define::{Endpoint, HttpMethod};
///
/// let mut endpoint = Endpoint::new("user.create", "account");
/// endpoint.method = HttpMethod::Post;
///
/// assert_eq!(endpoint.handler_name(), "UserCreateApi");
/// assert_eq!(endpoint.route_path("api", "v1"), "/api/v1/account/user/create");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Dotted endpoint name (`user.create`, `files.*`).
    pub name: String,
    /// Name of the owning group.
    pub group: String,
    /// Method the route is registered for.
    pub method: HttpMethod,
    /// Auth middleware name, `None` when the endpoint is public.
    pub auth: Option<String>,
    /// Handler shape used by code generators.
    pub protocol: Protocol,
    /// Trailing `#` comment, trimmed.
    pub comment: String,
    /// Request parameters in declaration order.
    pub request_fields: Vec<Field>,
    /// Response fields in declaration order.
    pub response_fields: Vec<Field>,
    /// Additional absolute route paths served by the same handler.
    pub aliases: Vec<String>,
    /// 1-based source line, `0` when built by hand.
    pub line: usize,
}

impl Endpoint {
    /// Creates a public `GET` JSON endpoint with no fields.
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            method: HttpMethod::default(),
            auth: None,
            protocol: Protocol::default(),
            comment: String::new(),
            request_fields: Vec::new(),
            response_fields: Vec::new(),
            aliases: Vec::new(),
            line: 0,
        }
    }

    /// Whether the last name segment is the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.name
            .rsplit('.')
            .next()
            .is_some_and(|last| last == WILDCARD_SEGMENT)
    }

    /// Upper-camel name built from the dot segments, wildcard dropped.
    ///
    /// ## Examples
    ///
    /// ```
    /// use apimodel_define::Endpoint;
    ///
    /// assert_eq!(Endpoint::new("login", "user").api_name(), "Login");
    /// assert_eq!(Endpoint::new("user.create", "admin").api_name(), "UserCreate");
    /// assert_eq!(Endpoint::new("static.*", "web").api_name(), "Static");
    /// ```
    pub fn api_name(&self) -> String {
        self.name
            .split('.')
            .filter(|segment| *segment != WILDCARD_SEGMENT)
            .map(upper_first)
            .collect()
    }

    /// Name of the user-written handler function (`UserCreateApi`).
    pub fn handler_name(&self) -> String {
        format!("{}Api", self.api_name())
    }

    /// Route segment below the group (`user.create` -> `user/create`).
    pub fn router_name(&self) -> String {
        self.name.replace('.', "/")
    }

    /// Request model type name (`ReqAccountUserCreate`).
    pub fn request_model_name(&self) -> String {
        format!("Req{}{}", upper_first(&self.group), self.api_name())
    }

    /// Response model type name (`RespAccountUserCreate`).
    pub fn response_model_name(&self) -> String {
        format!("Resp{}{}", upper_first(&self.group), self.api_name())
    }

    /// Group-qualified name used as a documentation operation id.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.group, self.api_name())
    }

    /// Path below the API root (`/account/user/create`).
    pub fn group_path(&self) -> String {
        format!("/{}/{}", self.group, self.router_name())
    }

    /// Full route path including prefix and version.
    pub fn route_path(&self, prefix: &str, version: &str) -> String {
        format!("/{}/{}{}", prefix, version, self.group_path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name,
            self.method,
            self.auth.as_deref().unwrap_or("none"),
            self.protocol
        )?;
        if !self.comment.is_empty() {
            write!(f, " # {}", self.comment)?;
        }
        Ok(())
    }
}
