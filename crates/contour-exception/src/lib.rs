//! # contour-exception
//!
//! The error boundary of the Contour serialization pipeline.
//!
//! Every failure raised while resolving fields, walking associations,
//! converting input data or encoding the final payload is normalized into a
//! single [`SerializationError`] at the orchestrator boundary. The error keeps
//! a human readable message together with the original underlying failure so
//! callers can still inspect (or downcast) what went wrong.
//!
//! ## Examples
//!
//! ```
//! use contour_exception::{ErrorKind, SerializationError};
//!
//! let err = SerializationError::new(ErrorKind::Configuration, "no encoder configured");
//! assert_eq!(err.kind(), ErrorKind::Configuration);
//! assert_eq!(err.to_string(), "no encoder configured");
//! assert!(err.original().is_none());
//! ```

use std::error::Error as StdError;
use std::fmt;

/// Boxed, thread-safe error used for failures coming from user code
/// (compute functions, encoders, meta builders).
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias used throughout the Contour crates
pub type Result<T, E = SerializationError> = std::result::Result<T, E>;

/// Classification of a [`SerializationError`]
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// A user-supplied compute function failed
	Compute,
	/// The schema graph is misconfigured (e.g. unknown nested schema)
	Structural,
	/// The encoder rejected the payload
	Encode,
	/// Process configuration is incomplete (e.g. no encoder configured)
	Configuration,
	/// Input data could not be converted into a serializable value
	Input,
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ErrorKind::Compute => "compute",
			ErrorKind::Structural => "structural",
			ErrorKind::Encode => "encode",
			ErrorKind::Configuration => "configuration",
			ErrorKind::Input => "input",
		};
		f.write_str(name)
	}
}

/// The single error type surfaced by the public serialization API
///
/// Carries a message and, when available, the original failure that caused
/// it. The original failure is exposed through [`StdError::source`] as well
/// as [`SerializationError::original`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SerializationError {
	kind: ErrorKind,
	message: String,
	#[source]
	source: Option<BoxError>,
}

impl SerializationError {
	/// Create an error without an underlying cause
	pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
			source: None,
		}
	}

	/// Create an error wrapping an underlying cause
	pub fn with_source(
		kind: ErrorKind,
		message: impl Into<String>,
		source: impl Into<BoxError>,
	) -> Self {
		Self {
			kind,
			message: message.into(),
			source: Some(source.into()),
		}
	}

	/// Normalize an arbitrary boxed failure into a `SerializationError`
	///
	/// If the failure already is a `SerializationError` it is returned
	/// unchanged; otherwise it is wrapped, using `message` as the
	/// human-readable description.
	///
	/// # Examples
	///
	/// ```
	/// use contour_exception::{BoxError, ErrorKind, SerializationError};
	///
	/// let inner: BoxError = SerializationError::new(ErrorKind::Compute, "bad total").into();
	/// let err = SerializationError::normalize(ErrorKind::Encode, "ignored", inner);
	/// // Already normalized errors pass through untouched
	/// assert_eq!(err.kind(), ErrorKind::Compute);
	/// assert_eq!(err.message(), "bad total");
	///
	/// let io: BoxError = std::io::Error::other("disk").into();
	/// let err = SerializationError::normalize(ErrorKind::Encode, "encoding failed", io);
	/// assert_eq!(err.kind(), ErrorKind::Encode);
	/// assert!(err.original().is_some());
	/// ```
	pub fn normalize(kind: ErrorKind, message: impl Into<String>, failure: BoxError) -> Self {
		match failure.downcast::<SerializationError>() {
			Ok(already) => *already,
			Err(other) => Self {
				kind,
				message: message.into(),
				source: Some(other),
			},
		}
	}

	/// The error classification
	pub fn kind(&self) -> ErrorKind {
		self.kind
	}

	/// The human-readable message
	pub fn message(&self) -> &str {
		&self.message
	}

	/// The original underlying failure, if any
	pub fn original(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
		self.source.as_deref()
	}

	/// Consume the error, returning the original underlying failure
	pub fn into_original(self) -> Option<BoxError> {
		self.source
	}
}
