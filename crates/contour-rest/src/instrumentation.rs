//! Observability hook around each serialization call

use crate::options::SerializeOptions;
use contour_exception::SerializationError;
use serde_json::Value;
use std::time::Instant;

/// Deferred serialization work handed to an [`Instrumentation`]
pub type Thunk<'a> = Box<dyn FnOnce() -> Result<Value, SerializationError> + 'a>;

/// Wraps every `serialize` call
///
/// Implementations must run `thunk` exactly once and return its result
/// unmodified.
pub trait Instrumentation: Send + Sync {
	fn instrument(
		&self,
		schema_id: &str,
		data: &Value,
		options: &SerializeOptions,
		thunk: Thunk<'_>,
	) -> Result<Value, SerializationError>;
}

/// Runs the thunk and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstrumentation;

impl Instrumentation for NoopInstrumentation {
	fn instrument(
		&self,
		_schema_id: &str,
		_data: &Value,
		_options: &SerializeOptions,
		thunk: Thunk<'_>,
	) -> Result<Value, SerializationError> {
		thunk()
	}
}

/// Runs the thunk inside a `contour.serialize` span and records its duration
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInstrumentation;

impl Instrumentation for TracingInstrumentation {
	fn instrument(
		&self,
		schema_id: &str,
		_data: &Value,
		options: &SerializeOptions,
		thunk: Thunk<'_>,
	) -> Result<Value, SerializationError> {
		let span = tracing::info_span!(
			"contour.serialize",
			schema = schema_id,
			view = options.view.as_deref()
		);
		let _guard = span.enter();
		let started = Instant::now();
		let result = thunk();
		let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
		match &result {
			Ok(_) => tracing::info!(elapsed_us, "serialized"),
			Err(err) => tracing::info!(elapsed_us, kind = %err.kind(), "serialization failed"),
		}
		result
	}
}
