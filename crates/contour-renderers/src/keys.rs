//! Key casing transforms
//!
//! Rewrites `snake_case` map keys to `camelCase` across a whole payload,
//! descending into nested maps and arrays.

use serde_json::{Map, Value};

/// Converts an underscore-delimited key to camel case.
///
/// The first segment is kept as is; every later segment has its first
/// character upper-cased. Keys without `_` are returned unchanged.
///
/// # Examples
///
/// ```
/// use contour_renderers::camelize_key;
///
/// assert_eq!(camelize_key("first_name"), "firstName");
/// assert_eq!(camelize_key("total_pages"), "totalPages");
/// assert_eq!(camelize_key("already"), "already");
/// assert_eq!(camelize_key("a_b_c"), "aBC");
/// ```
pub fn camelize_key(key: &str) -> String {
	if !key.contains('_') {
		return key.to_string();
	}
	let mut segments = key.split('_');
	let mut output = String::with_capacity(key.len());
	if let Some(first) = segments.next() {
		output.push_str(first);
	}
	for segment in segments {
		let mut chars = segment.chars();
		if let Some(head) = chars.next() {
			output.extend(head.to_uppercase());
			output.push_str(chars.as_str());
		}
	}
	output
}

/// Applies key casing to a serialized envelope
pub struct KeyTransformer;

impl KeyTransformer {
	/// Camelizes every map key in `value` when `enabled`, otherwise returns it
	/// untouched.
	///
	/// # Examples
	///
	/// ```
	/// use contour_renderers::KeyTransformer;
	/// use serde_json::json;
	///
	/// let value = json!({"user_id": 1, "recent_posts": [{"created_at": "today"}]});
	///
	/// assert_eq!(
	///     KeyTransformer::transform(value.clone(), true),
	///     json!({"userId": 1, "recentPosts": [{"createdAt": "today"}]})
	/// );
	/// assert_eq!(KeyTransformer::transform(value.clone(), false), value);
	/// ```
	pub fn transform(value: Value, enabled: bool) -> Value {
		if enabled { camelize_value(value) } else { value }
	}
}

fn camelize_value(value: Value) -> Value {
	match value {
		Value::Object(map) => {
			let mut output = Map::with_capacity(map.len());
			for (key, nested) in map {
				output.insert(camelize_key(&key), camelize_value(nested));
			}
			Value::Object(output)
		}
		Value::Array(items) => Value::Array(items.into_iter().map(camelize_value).collect()),
		leaf => leaf,
	}
}
