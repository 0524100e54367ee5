//! # Contour REST
//!
//! The serialization entry point. [`Contour`] resolves data with a
//! registered schema, wraps the result in a response envelope, camelizes
//! keys and optionally encodes the envelope to text.
//!
//! ## Call options
//!
//! | option      | effect                                                      |
//! |-------------|-------------------------------------------------------------|
//! | `view`      | emits fields restricted to this view                        |
//! | `scope`     | emits fields whose scope requirement is granted             |
//! | `include`   | keeps only these top-level fields                           |
//! | `exclude`   | drops these top-level fields (wins over `include`)          |
//! | `root`      | wraps the payload under this key                            |
//! | `meta`      | literal map or builder `(data, options) -> map`             |
//! | `page`, `per_page`, `total` | adds `meta.pagination`                      |
//! | `within`    | association whitelist                                       |
//! | `max_depth` | association depth limit (settings default: 10)              |
//! | `camelize`  | key casing (settings default: `true`)                       |
//!
//! ## Example
//!
//! ```
//! use contour_conf::Settings;
//! use contour_rest::{Contour, SerializeOptions};
//! use contour_serializers::{Schema, SchemaRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut registry = SchemaRegistry::new();
//! registry
//!     .register(Schema::builder("user").fields(["id", "first_name"]).build().unwrap())
//!     .unwrap();
//! let contour = Contour::new(Arc::new(registry), Settings::default());
//!
//! let users = json!([{"id": 1, "first_name": "Ada"}, {"id": 2, "first_name": "Alan"}]);
//! let options = SerializeOptions::new().root("users").paginate(1, 2).total(2);
//!
//! assert_eq!(
//!     contour.serialize("users_missing", &users, &options).unwrap_err().message(),
//!     "unknown schema `users_missing`"
//! );
//! assert_eq!(
//!     contour.serialize("user", &users, &options).unwrap(),
//!     json!({
//!         "users": [{"id": 1, "firstName": "Ada"}, {"id": 2, "firstName": "Alan"}],
//!         "meta": {"pagination": {"page": 1, "perPage": 2, "total": 2, "totalPages": 1}}
//!     })
//! );
//! ```

pub mod envelope;
pub mod instrumentation;
pub mod options;
pub mod orchestrator;

pub use envelope::{DATA_KEY, META_KEY, ResponseWrapper};
pub use instrumentation::{Instrumentation, NoopInstrumentation, Thunk, TracingInstrumentation};
pub use options::{Meta, MetaFn, SerializeOptions};
pub use orchestrator::Contour;
