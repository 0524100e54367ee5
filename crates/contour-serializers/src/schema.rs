//! Schemas and the `Serializable` capability
//!
//! Schemas are declared once at startup through [`SchemaBuilder`] and are
//! immutable afterwards. The [`Serializable`] trait is the seam association
//! dispatch goes through: the walker looks a nested schema up by identifier
//! in the registry and calls `resolve` on it.

use crate::context::SerializationContext;
use crate::error::{ResolveError, SchemaError};
use crate::field::{FieldSpec, ValueSource};
use crate::registry::SchemaRegistry;
use crate::resolver::FieldResolver;
use contour_exception::BoxError;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Anything that can turn one data item into a serialized map
pub trait Serializable: Send + Sync {
	/// Identifier under which this schema is registered
	fn identifier(&self) -> &str;

	/// Serialize one data item
	fn resolve(
		&self,
		data: &Value,
		context: &SerializationContext,
		registry: &SchemaRegistry,
	) -> Result<Map<String, Value>, ResolveError>;

	/// `(field, schema)` pairs for every association this schema declares
	fn nested_schemas(&self) -> Vec<(&str, &str)> {
		Vec::new()
	}
}

/// Immutable, ordered list of field specifications
#[derive(Debug, Clone)]
pub struct Schema {
	identifier: String,
	fields: Vec<FieldSpec>,
}

impl Schema {
	/// Start declaring a schema
	pub fn builder(identifier: impl Into<String>) -> SchemaBuilder {
		SchemaBuilder::new(identifier)
	}

	/// Schema identifier
	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	/// Fields in declaration order
	pub fn fields(&self) -> &[FieldSpec] {
		&self.fields
	}

	/// Look up a field by name
	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|field| field.name() == name)
	}
}

impl Serializable for Schema {
	fn identifier(&self) -> &str {
		&self.identifier
	}

	fn resolve(
		&self,
		data: &Value,
		context: &SerializationContext,
		registry: &SchemaRegistry,
	) -> Result<Map<String, Value>, ResolveError> {
		FieldResolver::resolve_fields(&self.fields, data, context, registry)
	}

	fn nested_schemas(&self) -> Vec<(&str, &str)> {
		self.fields
			.iter()
			.filter_map(|field| {
				field
					.association()
					.schema()
					.map(|schema| (field.name(), schema))
			})
			.collect()
	}
}

/// Builder used to declare the fields of a schema
///
/// # Examples
///
/// ```
/// use contour_serializers::{FieldSpec, Schema};
/// use serde_json::Value;
///
/// let schema = Schema::builder("user")
///     .field("id")
///     .field_from("name", "full_name")
///     .computed("initials", |data, _ctx| {
///         let name = data["full_name"].as_str().unwrap_or_default();
///         Ok(Value::from(name.chars().take(1).collect::<String>()))
///     })
///     .spec(FieldSpec::new("email").view("detailed"))
///     .has_many("posts", "post")
///     .build()
///     .unwrap();
///
/// let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["id", "name", "initials", "email", "posts"]);
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
	identifier: String,
	fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
	/// Create a builder for `identifier`
	pub fn new(identifier: impl Into<String>) -> Self {
		Self {
			identifier: identifier.into(),
			fields: Vec::new(),
		}
	}

	/// Add a fully specified field
	pub fn spec(mut self, field: FieldSpec) -> Self {
		self.fields.push(field);
		self
	}

	/// Add a plain field read from the key of the same name
	pub fn field(self, name: impl Into<String>) -> Self {
		self.spec(FieldSpec::new(name))
	}

	/// Add several plain fields
	pub fn fields<I>(self, names: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		names.into_iter().fold(self, |builder, name| builder.field(name))
	}

	/// Add a field read from a differently named key
	pub fn field_from(self, name: impl Into<String>, key: impl Into<String>) -> Self {
		self.spec(FieldSpec::new(name).from_key(key))
	}

	/// Add a computed field
	pub fn computed<F>(self, name: impl Into<String>, compute: F) -> Self
	where
		F: Fn(&Value, &SerializationContext) -> Result<Value, BoxError> + Send + Sync + 'static,
	{
		self.spec(FieldSpec::computed(name, compute))
	}

	/// Add a single association
	pub fn has_one(self, name: impl Into<String>, schema: impl Into<String>) -> Self {
		self.spec(FieldSpec::one(name, schema))
	}

	/// Add a sequence association
	pub fn has_many(self, name: impl Into<String>, schema: impl Into<String>) -> Self {
		self.spec(FieldSpec::many(name, schema))
	}

	/// Finish the declaration
	///
	/// # Errors
	///
	/// Returns an error if the identifier or a field name is empty, or if a
	/// field name is declared twice.
	pub fn build(self) -> Result<Schema, SchemaError> {
		if self.identifier.is_empty() {
			return Err(SchemaError::EmptyIdentifier);
		}
		let mut seen = HashSet::with_capacity(self.fields.len());
		for field in &self.fields {
			if field.name().is_empty() {
				return Err(SchemaError::EmptyFieldName {
					schema: self.identifier.clone(),
				});
			}
			if !seen.insert(field.name()) {
				return Err(SchemaError::DuplicateField {
					schema: self.identifier.clone(),
					field: field.name().to_string(),
				});
			}
			if let ValueSource::Renamed(key) = field.value_source()
				&& key.is_empty()
			{
				return Err(SchemaError::EmptyFieldName {
					schema: self.identifier.clone(),
				});
			}
		}
		Ok(Schema {
			identifier: self.identifier,
			fields: self.fields,
		})
	}
}
