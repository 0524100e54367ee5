//! Association whitelists
//!
//! A [`WithinSpec`] controls which nested associations are traversed and how
//! far. `Unrestricted` lets every declared association through (bounded only
//! by the maximum depth); `Only` names the associations that may be walked,
//! each with its own nested whitelist.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Whitelist tree of associations to traverse
///
/// # Examples
///
/// ```
/// use contour_serializers::WithinSpec;
///
/// // within: { author: {}, comments: { author: {} } }
/// let within = WithinSpec::only()
///     .include("author")
///     .nest("comments", WithinSpec::only().include("author"));
///
/// assert!(within.get("author").unwrap().is_empty());
/// assert!(within.get("comments").unwrap().get("author").is_some());
/// assert!(within.get("tags").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WithinSpec {
	/// Every declared association is eligible
	#[default]
	Unrestricted,
	/// Only the named associations are eligible
	Only(BTreeMap<String, Arc<WithinSpec>>),
}

impl WithinSpec {
	/// An empty whitelist: no association is traversed
	pub fn only() -> Self {
		WithinSpec::Only(BTreeMap::new())
	}

	/// Whitelist `name` without any further nested associations
	pub fn include(self, name: impl Into<String>) -> Self {
		self.nest(name, WithinSpec::only())
	}

	/// Whitelist `name`, descending with the nested whitelist `spec`
	pub fn nest(self, name: impl Into<String>, spec: WithinSpec) -> Self {
		let mut entries = match self {
			WithinSpec::Unrestricted => BTreeMap::new(),
			WithinSpec::Only(entries) => entries,
		};
		entries.insert(name.into(), Arc::new(spec));
		WithinSpec::Only(entries)
	}

	/// Whether every association is eligible
	pub fn is_unrestricted(&self) -> bool {
		matches!(self, WithinSpec::Unrestricted)
	}

	/// Whether this is a concrete whitelist naming no association
	pub fn is_empty(&self) -> bool {
		matches!(self, WithinSpec::Only(entries) if entries.is_empty())
	}

	/// Nested whitelist for `name`, if it is whitelisted by a concrete spec
	pub fn get(&self, name: &str) -> Option<&WithinSpec> {
		match self {
			WithinSpec::Unrestricted => None,
			WithinSpec::Only(entries) => entries.get(name).map(|spec| spec.as_ref()),
		}
	}

	/// Parse a whitelist from a JSON value
	///
	/// At the top level `null` means unrestricted. Objects map names to nested
	/// whitelists, arrays list bare names or objects, and a string is a single
	/// bare name. Below the top level `null` is a bare name.
	///
	/// # Examples
	///
	/// ```
	/// use contour_serializers::WithinSpec;
	/// use serde_json::json;
	///
	/// let parsed = WithinSpec::from_value(&json!(["author", {"comments": ["author"]}])).unwrap();
	/// let built = WithinSpec::only()
	///     .include("author")
	///     .nest("comments", WithinSpec::only().include("author"));
	/// assert_eq!(parsed, built);
	///
	/// assert!(WithinSpec::from_value(&json!(null)).unwrap().is_unrestricted());
	/// ```
	pub fn from_value(value: &Value) -> Result<Self, WithinError> {
		match value {
			Value::Null => Ok(WithinSpec::Unrestricted),
			other => parse_nested(other, "within"),
		}
	}
}

fn parse_nested(value: &Value, path: &str) -> Result<WithinSpec, WithinError> {
	let mut spec = WithinSpec::only();
	match value {
		Value::Null => {}
		Value::String(name) => spec = spec.include(name.as_str()),
		Value::Object(entries) => {
			for (name, nested) in entries {
				let nested = parse_nested(nested, &format!("{}.{}", path, name))?;
				spec = spec.nest(name.as_str(), nested);
			}
		}
		Value::Array(items) => {
			for (index, item) in items.iter().enumerate() {
				let item_path = format!("{}[{}]", path, index);
				match item {
					Value::String(name) => spec = spec.include(name.as_str()),
					Value::Object(_) => {
						if let WithinSpec::Only(entries) = parse_nested(item, &item_path)? {
							for (name, nested) in entries {
								spec = spec.nest(name, Arc::unwrap_or_clone(nested));
							}
						}
					}
					other => {
						return Err(WithinError::InvalidEntry {
							path: item_path,
							found: json_type_name(other),
						});
					}
				}
			}
		}
		other => {
			return Err(WithinError::InvalidEntry {
				path: path.to_string(),
				found: json_type_name(other),
			});
		}
	}
	Ok(spec)
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Errors raised while parsing a whitelist
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WithinError {
	/// An entry had a JSON type that cannot name an association
	#[error("invalid within entry at {path}: expected object, array, string or null, found {found}")]
	InvalidEntry { path: String, found: &'static str },
}
