//! Errors raised by schema declaration and resolution

use contour_exception::{BoxError, ErrorKind, SerializationError};

/// Structural failures raised while resolving fields and associations
///
/// These never escape the public API directly: the orchestrator normalizes
/// them into a [`SerializationError`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
	/// A compute function failed
	#[error("failed to compute field `{field}`: {source}")]
	Compute {
		field: String,
		#[source]
		source: BoxError,
	},

	/// An association names a schema that is not registered
	#[error("association `{field}` refers to unknown schema `{schema}`")]
	UnknownSchema { field: String, schema: String },
}

impl From<ResolveError> for SerializationError {
	fn from(err: ResolveError) -> Self {
		match err {
			ResolveError::Compute { field, source } => SerializationError::normalize(
				ErrorKind::Compute,
				format!("failed to compute field `{}`", field),
				source,
			),
			err @ ResolveError::UnknownSchema { .. } => {
				SerializationError::new(ErrorKind::Structural, err.to_string())
			}
		}
	}
}

/// Errors raised while declaring or registering schemas
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("schema identifier must not be empty")]
	EmptyIdentifier,

	#[error("schema `{schema}` declares a field with an empty name")]
	EmptyFieldName { schema: String },

	#[error("schema `{schema}` declares field `{field}` more than once")]
	DuplicateField { schema: String, field: String },

	#[error("schema `{0}` is already registered")]
	DuplicateSchema(String),

	#[error("field `{schema}.{field}` refers to unregistered schema `{target}`")]
	UnknownReference {
		schema: String,
		field: String,
		target: String,
	},
}
