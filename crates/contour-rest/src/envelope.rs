//! Response envelopes
//!
//! | root | meta / pagination | envelope                      |
//! |------|-------------------|-------------------------------|
//! | set  | present           | `{<root>: payload, meta: …}`  |
//! | set  | absent            | `{<root>: payload}`           |
//! | –    | present           | `{data: payload, meta: …}`    |
//! | –    | absent            | `payload`                     |

use crate::options::{Meta, SerializeOptions};
use contour_exception::{ErrorKind, SerializationError};
use contour_pagination::PAGINATION_KEY;
use serde_json::{Map, Value};

/// Key holding the payload when no root is given
pub const DATA_KEY: &str = "data";
/// Key holding the metadata
pub const META_KEY: &str = "meta";

/// Builds the outer envelope around a serialized payload
pub struct ResponseWrapper;

impl ResponseWrapper {
	/// Wrap `payload` according to the root, meta and pagination options
	///
	/// A meta builder is invoked with the original (unserialized) data; the
	/// pagination block is merged into its result afterwards and replaces any
	/// `pagination` entry it returned.
	///
	/// # Errors
	///
	/// Returns an error if the meta builder fails.
	///
	/// # Examples
	///
	/// ```
	/// use contour_rest::{ResponseWrapper, SerializeOptions};
	/// use serde_json::json;
	///
	/// let options = SerializeOptions::new().root("user").paginate(1, 20);
	/// let envelope = ResponseWrapper::wrap(json!({"id": 1}), &json!({}), &options).unwrap();
	///
	/// assert_eq!(
	///     envelope,
	///     json!({"user": {"id": 1}, "meta": {"pagination": {"page": 1, "per_page": 20}}})
	/// );
	/// ```
	pub fn wrap(
		payload: Value,
		data: &Value,
		options: &SerializeOptions,
	) -> Result<Value, SerializationError> {
		let meta = Self::resolve_meta(data, options)?;
		let envelope = match (&options.root, meta) {
			(None, None) => return Ok(payload),
			(Some(root), meta) => {
				let mut envelope = Map::new();
				envelope.insert(root.clone(), payload);
				if let Some(meta) = meta {
					envelope.insert(META_KEY.to_string(), Value::Object(meta));
				}
				envelope
			}
			(None, Some(meta)) => {
				let mut envelope = Map::new();
				envelope.insert(DATA_KEY.to_string(), payload);
				envelope.insert(META_KEY.to_string(), Value::Object(meta));
				envelope
			}
		};
		tracing::debug!(
			root = options.root.as_deref(),
			has_meta = envelope.contains_key(META_KEY),
			"wrapped payload"
		);
		Ok(Value::Object(envelope))
	}

	fn resolve_meta(
		data: &Value,
		options: &SerializeOptions,
	) -> Result<Option<Map<String, Value>>, SerializationError> {
		let mut meta = match &options.meta {
			None => None,
			Some(Meta::Literal(map)) => Some(map.clone()),
			Some(Meta::Computed(build)) => Some(build(data, options).map_err(|failure| {
				SerializationError::normalize(
					ErrorKind::Compute,
					"failed to build response meta",
					failure,
				)
			})?),
		};
		if let Some(pagination) = options.pagination() {
			meta.get_or_insert_with(Map::new)
				.insert(PAGINATION_KEY.to_string(), pagination.into());
		}
		Ok(meta)
	}
}
