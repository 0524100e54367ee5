//! # Contour Serializers
//!
//! Schema-driven serialization of JSON-shaped data.
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`]s. Each field reads a key
//! from the data item, reads a differently named key, or computes its value
//! from the data item and the [`SerializationContext`]. Fields can be
//! restricted to a view or to an authorization scope, and associations
//! (`one` / `many`) serialize nested data with another registered schema.
//!
//! ## Features
//!
//! - **Declaration order**: output maps keep the order fields were declared in
//! - **View and scope filtering**: restricted fields are skipped before their
//!   value is read or computed
//! - **Bounded traversal**: associations are followed only when the `within`
//!   whitelist names them and the descent stays within `max_depth`
//! - **Shared registry**: [`SchemaRegistry`] is immutable after startup and
//!   can be read from many threads at once
//!
//! ## Quick Start
//!
//! ```
//! use contour_serializers::{Schema, SchemaRegistry, Serializable, SerializationContext, WithinSpec};
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::new();
//! registry
//!     .register(Schema::builder("user").fields(["id", "name"]).build().unwrap())
//!     .unwrap()
//!     .register(
//!         Schema::builder("post")
//!             .field("title")
//!             .has_one("author", "user")
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let data = json!({"title": "Hello", "author": {"id": 1, "name": "Ada", "token": "x"}});
//! let context = SerializationContext::default();
//! let post = registry.get("post").unwrap();
//!
//! let output = post.resolve(&data, &context, &registry).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(output),
//!     json!({"title": "Hello", "author": {"id": 1, "name": "Ada"}})
//! );
//!
//! // Without `author` in the whitelist the association is omitted
//! let context = SerializationContext::default().with_within(WithinSpec::only());
//! let output = post.resolve(&data, &context, &registry).unwrap();
//! assert_eq!(serde_json::Value::Object(output), json!({"title": "Hello"}));
//! ```
//!
//! ## Module Organization
//!
//! - [`schema`]: Schema declaration and the [`Serializable`] trait
//! - [`field`]: Field specifications
//! - [`resolver`]: Per-item field resolution
//! - [`association`]: Association traversal
//! - [`context`]: Per-call context (view, scope, depth, whitelist)
//! - [`within`]: Association whitelists
//! - [`registry`]: Schema registry

pub mod association;
pub mod context;
pub mod error;
pub mod field;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod within;

pub use association::AssociationWalker;
pub use context::{DEFAULT_MAX_DEPTH, FieldFilter, Scope, SerializationContext};
pub use error::{ResolveError, SchemaError};
pub use field::{Association, ComputeFn, FieldSpec, ValueSource};
pub use registry::SchemaRegistry;
pub use resolver::FieldResolver;
pub use schema::{Schema, SchemaBuilder, Serializable};
pub use within::{WithinError, WithinSpec};
