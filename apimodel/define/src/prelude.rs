//! Convenient re-exports for working with compiled API models.
//!
//! ## Examples
//!
//! ```
//! use apimodel_define::prelude::*;
//!
//! let mut model = ApiModel::new("myapi", DEFAULT_VERSION);
//! model.groups.push(Group::new("health"));
//!
//! assert_eq!(model.endpoint_count(), 0);
//! assert!(is_valid_identifier("health"));
//! ```

pub use crate::endpoint::Endpoint;
pub use crate::field::Field;
pub use crate::group::Group;
pub use crate::ident::{is_valid_identifier, upper_first};
pub use crate::model::{ApiModel, DEFAULT_VERSION, DocumentMeta, ResponseEnvelope};
pub use crate::schema::SchemaNode;
pub use crate::types::{HttpMethod, Protocol};
