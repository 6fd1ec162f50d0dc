//! Endpoint-level enumerations.
//!
//! - [`HttpMethod`] - The method an endpoint is routed under
//! - [`Protocol`] - Which handler shape downstream generators emit

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP methods an endpoint can be registered for.
///
/// The DSL only distinguishes `GET`, `POST` and `ANY`; anything else written
/// in the method slot falls back to `GET`.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use apimodel_define::HttpMethod;
///
/// assert_eq!(HttpMethod::Post.to_string(), "POST");
/// assert_eq!(HttpMethod::from_str("ANY").unwrap(), HttpMethod::Any);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET, request fields travel in the query string
    #[default]
    Get,
    /// HTTP POST, request fields travel in a JSON body
    Post,
    /// Registered for every method
    Any,
}

impl HttpMethod {
    /// Lowercase method names this endpoint is served under.
    ///
    /// `Any` expands to both `get` and `post`, which is what documentation
    /// consumers need to describe it.
    pub fn verbs(self) -> &'static [&'static str] {
        match self {
            Self::Get => &["get"],
            Self::Post => &["post"],
            Self::Any => &["get", "post"],
        }
    }
}

/// Wire protocol variant of an endpoint.
///
/// This is metadata for code generators, not a format the compiler itself
/// serializes. The variants differ in whether the request is bound and
/// validated before the handler runs, and whether the response is written
/// as a JSON envelope or raw by the handler.
///
/// | Protocol  | Binds request | Raw response |
/// |-----------|---------------|--------------|
/// | `json`    | yes           | no           |
/// | `raw`     | no            | yes          |
/// | `reqRaw`  | no            | no           |
/// | `respRaw` | yes           | yes          |
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use apimodel_define::Protocol;
///
/// assert_eq!(Protocol::from_str("reqRaw").unwrap(), Protocol::ReqRaw);
/// assert_eq!(Protocol::RespRaw.to_string(), "respRaw");
/// assert!(Protocol::from_str("xml").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Protocol {
    #[default]
    Json,
    Raw,
    ReqRaw,
    RespRaw,
}

impl Protocol {
    /// Whether the handler writes the response body itself.
    pub fn raw_response(self) -> bool {
        matches!(self, Self::Raw | Self::RespRaw)
    }

    /// Content type advertised for the response.
    pub fn produces(self) -> &'static str {
        match self {
            Self::Raw => "application/octet-stream",
            _ => "application/json",
        }
    }
}
