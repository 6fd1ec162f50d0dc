//! API model compiler.
//!
//! Compiles the indentation-based API DSL into an [`ApiModel`] and derives
//! documentation and routing outputs from it.
//!
//! ## Pipeline
//!
//! ```text
//! DSL text ──► compile ──► ApiModel ──┬─► projector  (schema trees)
//!                                     ├─► swagger    (Swagger 2.0 YAML/JSON)
//!                                     ├─► routes     (route table)
//!                                     └─► kit        (existing handlers, declared responses)
//! ```
//!
//! ## Modules
//!
//! - [`document`] - The single-pass compiler driver
//! - [`lines`] - Line classification, comments and indentation
//! - [`field`], [`endpoint`], [`group`], [`directive`] - Per-line parsers
//! - [`nesting`] - Nested field tracking
//! - [`types`] - Type token resolution and documentation labels
//! - [`projector`] - Schema projection of field trees
//! - [`swagger`] - Swagger 2.0 document builder
//! - [`routes`] - Route table
//! - [`kit`] - Handler kit scanning and the per-run kit cache
//! - [`output`] - File reading and atomic writes
//! - [`config`] - Dialects and compile options
//! - [`errors`] - Error types
//!
//! ## Examples
//!
//! ```
//! use apimodel_gen::{compile, CompileOptions};
//! use apimodel_gen::routes::route_table;
//!
//! let source = "\
//! root shop v2
//! - authmap: user=UserAuth
//! order # orders
//!     list GET user
//!         page int false:\"min=1\"
//! ";
//!
//! let model = compile(source, &CompileOptions::default()).unwrap();
//! let routes = route_table(&model);
//!
//! assert_eq!(routes[0].path, "/shop/v2/order/list");
//! assert_eq!(routes[0].auth.as_deref(), Some("UserAuth"));
//! ```

pub mod config;
pub mod directive;
pub mod document;
pub mod endpoint;
pub mod errors;
pub mod field;
pub mod group;
pub mod kit;
pub mod lines;
pub mod nesting;
pub mod output;
pub mod projector;
pub mod routes;
pub mod swagger;
pub mod types;

pub use apimodel_define::ApiModel;
pub use config::{CompileOptions, Dialect};
pub use document::{compile, compile_lines};
pub use errors::{CompileError, Result};
pub use kit::{KitCache, KitLayout};
pub use output::{compile_file, read_lines, scan_existing_handler_names, write_generated_file};
pub use swagger::{SwaggerBuilder, SwaggerDocument};
