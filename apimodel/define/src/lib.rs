//! API Model Definition Library
//!
//! This crate provides the types produced by compiling an API DSL document.
//! They are plain data: the `apimodel-gen` crate builds them from text, and
//! code and documentation generators read them.
//!
//! ## Core Types
//!
//! - [`ApiModel`] - A compiled document: route prefix, version, groups and metadata
//! - [`DocumentMeta`] - Title, server, auth aliases and response envelope
//! - [`ResponseEnvelope`] - Top-level keys wrapping every JSON response
//! - [`Group`] - A namespace of endpoints sharing a route segment
//! - [`Endpoint`] - A single endpoint with method, auth, protocol and fields
//! - [`Field`] - A request parameter or response field, possibly nested
//! - [`HttpMethod`] - `GET`, `POST` or `ANY`
//! - [`Protocol`] - Handler shape (`json`, `raw`, `reqRaw`, `respRaw`)
//! - [`SchemaNode`] - Documentation projection of a field tree
//!
//! ## Examples
//!
//! ```
//! use apimodel_define::{ApiModel, Endpoint, Field, Group, HttpMethod};
//!
//! let mut create = Endpoint::new("create", "user");
//! create.method = HttpMethod::Post;
//! create.request_fields.push(Field::new("name", "str", "string"));
//! create.response_fields.push(Field::new("id", "int", "int64"));
//!
//! let mut user = Group::new("user");
//! user.endpoints.push(create);
//!
//! let mut model = ApiModel::new("myapi", "v1");
//! model.groups.push(user);
//!
//! let endpoint = model.find_endpoint("user", "create").unwrap();
//! assert_eq!(endpoint.route_path(&model.prefix, &model.version), "/myapi/v1/user/create");
//! assert_eq!(endpoint.request_model_name(), "ReqUserCreate");
//! ```

pub mod endpoint;
pub mod field;
pub mod group;
pub mod ident;
pub mod model;
pub mod prelude;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use endpoint::Endpoint;
pub use field::{ARRAY_MARKER, Field, NESTED_MAP_TYPE, NESTED_OBJECT_TYPE};
pub use group::Group;
pub use model::{ApiModel, DEFAULT_VERSION, DocumentMeta, ResponseEnvelope};
pub use schema::{OBJECT_LABEL, SchemaNode};
pub use types::{HttpMethod, Protocol};
