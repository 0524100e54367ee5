//! Field specifications
//!
//! A [`FieldSpec`] declares one output field: where its value comes from,
//! whether it is an association to another schema, and which view or scope
//! it is restricted to.

use crate::context::SerializationContext;
use contour_exception::BoxError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Signature of a computed field
pub type ComputeFn =
	Arc<dyn Fn(&Value, &SerializationContext) -> Result<Value, BoxError> + Send + Sync>;

/// Where a field's value comes from
#[derive(Clone)]
pub enum ValueSource {
	/// Look up the field's own name in the data item
	Key,
	/// Look up a different key in the data item (`from`)
	Renamed(String),
	/// Compute the value from the data item and the context
	Computed(ComputeFn),
}

impl fmt::Debug for ValueSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValueSource::Key => f.write_str("Key"),
			ValueSource::Renamed(key) => f.debug_tuple("Renamed").field(key).finish(),
			ValueSource::Computed(_) => f.write_str("Computed(<fn>)"),
		}
	}
}

/// Association kind, naming the schema used for the associated value(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
	/// Plain value
	None,
	/// A single associated object
	One(String),
	/// A sequence of associated objects
	Many(String),
}

impl Association {
	/// Identifier of the nested schema, if this is an association
	pub fn schema(&self) -> Option<&str> {
		match self {
			Association::None => None,
			Association::One(schema) | Association::Many(schema) => Some(schema),
		}
	}
}

/// Declarative description of one output field
///
/// # Examples
///
/// ```
/// use contour_serializers::{Association, FieldSpec};
///
/// let field = FieldSpec::new("display_name").from_key("name").view("detailed");
/// assert_eq!(field.name(), "display_name");
/// assert_eq!(field.source_key(), Some("name"));
/// assert_eq!(field.view_restriction(), Some("detailed"));
///
/// let posts = FieldSpec::many("posts", "post");
/// assert_eq!(posts.association(), &Association::Many("post".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpec {
	name: String,
	source: ValueSource,
	association: Association,
	view: Option<String>,
	scope: Option<String>,
}

impl FieldSpec {
	/// A plain field read from the key of the same name
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: ValueSource::Key,
			association: Association::None,
			view: None,
			scope: None,
		}
	}

	/// A field whose value is computed from the data item and context
	pub fn computed<F>(name: impl Into<String>, compute: F) -> Self
	where
		F: Fn(&Value, &SerializationContext) -> Result<Value, BoxError> + Send + Sync + 'static,
	{
		Self::new(name).source(ValueSource::Computed(Arc::new(compute)))
	}

	/// A single association serialized with `schema`
	pub fn one(name: impl Into<String>, schema: impl Into<String>) -> Self {
		let mut field = Self::new(name);
		field.association = Association::One(schema.into());
		field
	}

	/// A sequence association whose elements are serialized with `schema`
	pub fn many(name: impl Into<String>, schema: impl Into<String>) -> Self {
		let mut field = Self::new(name);
		field.association = Association::Many(schema.into());
		field
	}

	/// Read the value from `key` instead of the field name
	pub fn from_key(self, key: impl Into<String>) -> Self {
		self.source(ValueSource::Renamed(key.into()))
	}

	/// Replace the value source
	pub fn source(mut self, source: ValueSource) -> Self {
		self.source = source;
		self
	}

	/// Emit the field only when the call's view equals `view`
	pub fn view(mut self, view: impl Into<String>) -> Self {
		self.view = Some(view.into());
		self
	}

	/// Emit the field only when the call's scope grants `scope`
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());
		self
	}

	/// Output field name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Value source
	pub fn value_source(&self) -> &ValueSource {
		&self.source
	}

	/// Association kind
	pub fn association(&self) -> &Association {
		&self.association
	}

	/// View restriction, if any
	pub fn view_restriction(&self) -> Option<&str> {
		self.view.as_deref()
	}

	/// Scope requirement, if any
	pub fn scope_requirement(&self) -> Option<&str> {
		self.scope.as_deref()
	}

	/// Key read from the data item, `None` for computed fields
	pub fn source_key(&self) -> Option<&str> {
		match &self.source {
			ValueSource::Key => Some(&self.name),
			ValueSource::Renamed(key) => Some(key),
			ValueSource::Computed(_) => None,
		}
	}

	/// Whether the view restriction and scope requirement admit this field
	pub fn is_visible(&self, context: &SerializationContext) -> bool {
		if let Some(view) = &self.view
			&& context.view() != Some(view.as_str())
		{
			return false;
		}
		if let Some(scope) = &self.scope
			&& !context.scope().satisfies(scope)
		{
			return false;
		}
		true
	}
}
