//! # Contour Renderers
//!
//! Output-side transforms for serialized payloads.
//!
//! ## Components
//!
//! - **KeyTransformer**: rewrites `snake_case` keys to `camelCase` across a
//!   whole envelope, including nested maps and arrays
//! - **Encoders**: compact JSON, indented JSON and (with the `yaml` feature)
//!   YAML, selected through [`contour_conf::EncoderKind`]
//!
//! ## Example
//!
//! ```
//! use contour_renderers::{Encoder, JsonEncoder, KeyTransformer};
//! use serde_json::json;
//!
//! let envelope = KeyTransformer::transform(json!({"first_name": "Ada"}), true);
//! assert_eq!(JsonEncoder.encode(&envelope).unwrap(), r#"{"firstName":"Ada"}"#);
//! ```

pub mod encoder;
pub mod keys;

pub use encoder::{
	EncodeError, EncodeResult, Encoder, JsonEncoder, PrettyJsonEncoder, encoder_for,
};
#[cfg(feature = "yaml")]
pub use encoder::YamlEncoder;
pub use keys::{KeyTransformer, camelize_key};
