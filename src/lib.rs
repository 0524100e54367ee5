//! # Contour
//!
//! Schema-driven response serialization for Rust.
//!
//! Contour turns application data (records, nested object graphs) into
//! JSON-ready structures according to declared schemas, wraps the result in a
//! response envelope (root key, metadata, pagination) and optionally converts
//! keys to `camelCase`.
//!
//! ## Core Principles
//!
//! - **Declared once**: schemas are built at startup and stored in a
//!   read-only registry shared by every call
//! - **Bounded traversal**: nested associations are followed only when the
//!   `within` whitelist allows them and the depth stays within `max_depth`
//! - **One error type**: every failure surfaces as a [`SerializationError`]
//! - **No shared mutable state**: calls can run concurrently on any number of
//!   threads
//!
//! ## Feature Flags
//!
//! - `yaml` (default) - YAML encoder (via `serde_yaml`)
//!
//! ## Crates
//!
//! | crate                 | contents                                         |
//! |-----------------------|--------------------------------------------------|
//! | `contour-exception`   | [`SerializationError`] and [`ErrorKind`]         |
//! | `contour-conf`        | [`Settings`] loaded from TOML and `CONTOUR_*` env |
//! | `contour-serializers` | schemas, field resolution, association traversal |
//! | `contour-pagination`  | pagination metadata                              |
//! | `contour-renderers`   | key casing and encoders                          |
//! | `contour-rest`        | [`Contour`], options, envelopes, instrumentation |
//!
//! ## Quick Example
//!
//! ```
//! use contour::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut registry = SchemaRegistry::new();
//! registry
//!     .register(
//!         Schema::builder("user")
//!             .field("id")
//!             .field("user_name")
//!             .spec(FieldSpec::new("email").view("detailed"))
//!             .has_many("posts", "post")
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap()
//!     .register(Schema::builder("post").field("title").build().unwrap())
//!     .unwrap();
//!
//! let contour = Contour::new(Arc::new(registry), Settings::default());
//! let data = json!({
//!     "id": 1,
//!     "user_name": "ada",
//!     "email": "ada@example.com",
//!     "posts": [{"title": "Notes", "draft": true}]
//! });
//!
//! let output = contour
//!     .serialize("user", &data, &SerializeOptions::new().root("user"))
//!     .unwrap();
//! assert_eq!(
//!     output,
//!     json!({"user": {"id": 1, "userName": "ada", "posts": [{"title": "Notes"}]}})
//! );
//! ```

pub use contour_conf as conf;
pub use contour_exception as exception;
pub use contour_pagination as pagination;
pub use contour_renderers as renderers;
pub use contour_rest as rest;
pub use contour_serializers as serializers;

// Re-export errors
pub use contour_exception::{BoxError, ErrorKind, Result, SerializationError};

// Re-export settings
pub use contour_conf::{EncoderKind, Env, Settings, SettingsError};

// Re-export schema declaration and traversal
pub use contour_serializers::{
	Association, FieldSpec, Schema, SchemaBuilder, SchemaError, SchemaRegistry, Scope,
	Serializable, SerializationContext, ValueSource, WithinSpec,
};

// Re-export pagination
pub use contour_pagination::Pagination;

// Re-export renderers
pub use contour_renderers::{Encoder, EncodeError, JsonEncoder, KeyTransformer, PrettyJsonEncoder};
#[cfg(feature = "yaml")]
pub use contour_renderers::YamlEncoder;

// Re-export the entry point
pub use contour_rest::{
	Contour, Instrumentation, Meta, NoopInstrumentation, ResponseWrapper, SerializeOptions,
	TracingInstrumentation,
};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		Contour, EncoderKind, ErrorKind, FieldSpec, Schema, SchemaRegistry, Scope,
		SerializationError, SerializeOptions, Settings, WithinSpec,
	};
}
