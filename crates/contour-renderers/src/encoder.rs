//! Payload encoders
//!
//! An [`Encoder`] turns the final serialized value into its wire text. The
//! encoder used by default is picked from [`EncoderKind`] in the settings.

use contour_conf::EncoderKind;
use contour_exception::{BoxError, ErrorKind, SerializationError};
use serde_json::Value;
use std::sync::Arc;

/// Result type for encoders
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Turns a serialized payload into text
pub trait Encoder: Send + Sync {
	/// Encode `value`
	fn encode(&self, value: &Value) -> EncodeResult<String>;

	/// Media type of the encoded text
	fn media_type(&self) -> &str;
}

/// Errors raised while encoding a payload
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
	#[error("JSON encoding failed: {0}")]
	Json(#[from] serde_json::Error),

	#[cfg(feature = "yaml")]
	#[error("YAML encoding failed: {0}")]
	Yaml(#[from] serde_yaml::Error),

	/// Failure raised by a user-supplied encoder
	#[error("encoding failed: {0}")]
	Custom(#[source] BoxError),
}

impl EncodeError {
	/// Wrap an arbitrary failure
	pub fn custom(err: impl Into<BoxError>) -> Self {
		EncodeError::Custom(err.into())
	}
}

impl From<EncodeError> for SerializationError {
	fn from(err: EncodeError) -> Self {
		match err {
			EncodeError::Custom(source) => {
				SerializationError::normalize(ErrorKind::Encode, "failed to encode payload", source)
			}
			other => SerializationError::with_source(
				ErrorKind::Encode,
				"failed to encode payload",
				other,
			),
		}
	}
}

/// Compact JSON encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
	fn encode(&self, value: &Value) -> EncodeResult<String> {
		Ok(serde_json::to_string(value)?)
	}

	fn media_type(&self) -> &str {
		"application/json"
	}
}

/// Indented JSON encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJsonEncoder;

impl Encoder for PrettyJsonEncoder {
	fn encode(&self, value: &Value) -> EncodeResult<String> {
		Ok(serde_json::to_string_pretty(value)?)
	}

	fn media_type(&self) -> &str {
		"application/json"
	}
}

/// YAML encoder
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

#[cfg(feature = "yaml")]
impl Encoder for YamlEncoder {
	fn encode(&self, value: &Value) -> EncodeResult<String> {
		Ok(serde_yaml::to_string(value)?)
	}

	fn media_type(&self) -> &str {
		"application/yaml"
	}
}

/// Encoder for a configured [`EncoderKind`]
///
/// Returns `None` when the kind is not compiled in (YAML without the `yaml`
/// feature).
///
/// # Examples
///
/// ```
/// use contour_conf::EncoderKind;
/// use contour_renderers::encoder_for;
/// use serde_json::json;
///
/// let encoder = encoder_for(EncoderKind::Json).unwrap();
/// assert_eq!(encoder.encode(&json!({"a": [1, 2]})).unwrap(), r#"{"a":[1,2]}"#);
/// ```
pub fn encoder_for(kind: EncoderKind) -> Option<Arc<dyn Encoder>> {
	match kind {
		EncoderKind::Json => Some(Arc::new(JsonEncoder)),
		EncoderKind::JsonPretty => Some(Arc::new(PrettyJsonEncoder)),
		#[cfg(feature = "yaml")]
		EncoderKind::Yaml => Some(Arc::new(YamlEncoder)),
		#[cfg(not(feature = "yaml"))]
		EncoderKind::Yaml => {
			tracing::warn!(encoder = %kind, "encoder not compiled in");
			None
		}
	}
}
