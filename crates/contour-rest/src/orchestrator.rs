//! Public serialization entry point
//!
//! A call runs: input conversion, schema resolution (fields and associations),
//! envelope construction, key casing, and for the `to_json` family the
//! configured encoder. All failures come out as a single
//! [`SerializationError`].

use crate::envelope::ResponseWrapper;
use crate::instrumentation::{Instrumentation, NoopInstrumentation};
use crate::options::SerializeOptions;
use contour_conf::Settings;
use contour_exception::{ErrorKind, SerializationError};
use contour_renderers::{Encoder, KeyTransformer, encoder_for};
use contour_serializers::{SchemaRegistry, Serializable};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Serializes data with registered schemas
///
/// Cheap to clone; every clone shares the registry, encoder and
/// instrumentation.
///
/// # Examples
///
/// ```
/// use contour_conf::Settings;
/// use contour_rest::{Contour, SerializeOptions};
/// use contour_serializers::{Schema, SchemaRegistry};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let mut registry = SchemaRegistry::new();
/// registry
///     .register(Schema::builder("user").fields(["id", "user_name"]).build().unwrap())
///     .unwrap();
/// let contour = Contour::new(Arc::new(registry), Settings::default());
///
/// let data = json!({"id": 1, "user_name": "ada", "password": "x"});
/// let output = contour.serialize("user", &data, &SerializeOptions::new()).unwrap();
/// assert_eq!(output, json!({"id": 1, "userName": "ada"}));
///
/// let text = contour
///     .to_json("user", &data, &SerializeOptions::new().camelize(false))
///     .unwrap();
/// assert_eq!(text, r#"{"id":1,"user_name":"ada"}"#);
/// ```
#[derive(Clone)]
pub struct Contour {
	registry: Arc<SchemaRegistry>,
	settings: Settings,
	encoder: Option<Arc<dyn Encoder>>,
	instrumentation: Arc<dyn Instrumentation>,
}

impl Contour {
	/// Create an orchestrator using the encoder selected in `settings`
	pub fn new(registry: Arc<SchemaRegistry>, settings: Settings) -> Self {
		let encoder = encoder_for(settings.encoder);
		Self {
			registry,
			settings,
			encoder,
			instrumentation: Arc::new(NoopInstrumentation),
		}
	}

	/// Replace the encoder
	pub fn with_encoder<E>(mut self, encoder: E) -> Self
	where
		E: Encoder + 'static,
	{
		self.encoder = Some(Arc::new(encoder));
		self
	}

	/// Remove the encoder; `to_json` then fails with a configuration error
	pub fn without_encoder(mut self) -> Self {
		self.encoder = None;
		self
	}

	/// Replace the instrumentation hook
	pub fn with_instrumentation<I>(mut self, instrumentation: I) -> Self
	where
		I: Instrumentation + 'static,
	{
		self.instrumentation = Arc::new(instrumentation);
		self
	}

	/// Schemas available to every call
	pub fn registry(&self) -> &SchemaRegistry {
		&self.registry
	}

	/// Settings this orchestrator was built with
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Serialize `data` with the schema registered as `schema_id`
	///
	/// A JSON array is treated as a collection: each element is serialized
	/// with the schema and the results keep their order.
	///
	/// # Errors
	///
	/// Returns an error if `data` cannot be converted to JSON, the schema (or
	/// a nested one) is not registered, or a compute or meta function fails.
	pub fn serialize<T>(
		&self,
		schema_id: &str,
		data: &T,
		options: &SerializeOptions,
	) -> Result<Value, SerializationError>
	where
		T: Serialize + ?Sized,
	{
		let (input, conversion) = match serde_json::to_value(data) {
			Ok(input) => (input, None),
			Err(err) => (
				Value::Null,
				Some(SerializationError::with_source(
					ErrorKind::Input,
					"failed to convert input data to a serializable value",
					err,
				)),
			),
		};
		let input_ref = &input;
		// Unconvertible input still goes through the hook, seen as `null`
		let result = self.instrumentation.instrument(
			schema_id,
			input_ref,
			options,
			Box::new(move || match conversion {
				Some(err) => Err(err),
				None => self.run(schema_id, input_ref, options),
			}),
		);
		if let Err(err) = &result {
			tracing::warn!(schema = schema_id, kind = %err.kind(), error = %err, "serialization failed");
		}
		result
	}

	/// Like [`Contour::serialize`], panicking with the [`SerializationError`]
	/// as panic payload on failure
	pub fn serialize_or_raise<T>(&self, schema_id: &str, data: &T, options: &SerializeOptions) -> Value
	where
		T: Serialize + ?Sized,
	{
		self.serialize(schema_id, data, options)
			.unwrap_or_else(|err| std::panic::panic_any(err))
	}

	/// Serialize, then encode with the configured encoder
	///
	/// # Errors
	///
	/// Everything [`Contour::serialize`] reports, plus encoder failures and a
	/// configuration error when no encoder is configured.
	pub fn to_json<T>(
		&self,
		schema_id: &str,
		data: &T,
		options: &SerializeOptions,
	) -> Result<String, SerializationError>
	where
		T: Serialize + ?Sized,
	{
		let encoder = self.encoder.as_ref().ok_or_else(|| {
			SerializationError::new(ErrorKind::Configuration, "no encoder configured")
		})?;
		let payload = self.serialize(schema_id, data, options)?;
		encoder.encode(&payload).map_err(|err| {
			tracing::warn!(schema = schema_id, error = %err, "encoding failed");
			SerializationError::from(err)
		})
	}

	/// Like [`Contour::to_json`], panicking with the [`SerializationError`]
	/// as panic payload on failure
	pub fn to_json_or_raise<T>(&self, schema_id: &str, data: &T, options: &SerializeOptions) -> String
	where
		T: Serialize + ?Sized,
	{
		self.to_json(schema_id, data, options)
			.unwrap_or_else(|err| std::panic::panic_any(err))
	}

	fn run(
		&self,
		schema_id: &str,
		data: &Value,
		options: &SerializeOptions,
	) -> Result<Value, SerializationError> {
		let schema = self.registry.get(schema_id).ok_or_else(|| {
			SerializationError::new(
				ErrorKind::Structural,
				format!("unknown schema `{}`", schema_id),
			)
		})?;
		let context = options.context(self.settings.max_depth);

		let payload = match data {
			Value::Array(items) => Value::Array(
				items
					.iter()
					.map(|item| schema.resolve(item, &context, &self.registry).map(Value::Object))
					.collect::<Result<_, _>>()?,
			),
			item => Value::Object(schema.resolve(item, &context, &self.registry)?),
		};

		let envelope = ResponseWrapper::wrap(payload, data, options)?;
		let camelize = options.camelize.unwrap_or(self.settings.camelize);
		Ok(KeyTransformer::transform(envelope, camelize))
	}
}

impl fmt::Debug for Contour {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Contour")
			.field("registry", &self.registry)
			.field("settings", &self.settings)
			.field(
				"encoder",
				&self.encoder.as_ref().map(|encoder| encoder.media_type()),
			)
			.finish_non_exhaustive()
	}
}
