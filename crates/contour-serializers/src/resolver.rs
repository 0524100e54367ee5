//! Field resolution
//!
//! Resolves field specifications against a single data item. Filtering
//! (view, scope and the top-level include/exclude selection) happens before
//! any value is looked up or computed. Association fields are handed to the
//! [`AssociationWalker`].

use crate::association::AssociationWalker;
use crate::context::SerializationContext;
use crate::error::ResolveError;
use crate::field::{Association, FieldSpec, ValueSource};
use crate::registry::SchemaRegistry;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Resolves fields of one data item
pub struct FieldResolver;

impl FieldResolver {
	/// Resolve one field
	///
	/// Returns `Ok(None)` when the field is omitted (filtered out, or an
	/// association that is not traversed).
	///
	/// # Examples
	///
	/// ```
	/// use contour_serializers::{FieldResolver, FieldSpec, SchemaRegistry, SerializationContext};
	/// use serde_json::{Value, json};
	///
	/// let registry = SchemaRegistry::new();
	/// let context = SerializationContext::default();
	/// let data = json!({"full_name": "Ada"});
	///
	/// let name = FieldSpec::new("name").from_key("full_name");
	/// let value = FieldResolver::resolve(&name, &data, &context, &registry).unwrap();
	/// assert_eq!(value, Some(json!("Ada")));
	///
	/// // Missing keys resolve to null and are still emitted
	/// let age = FieldSpec::new("age");
	/// let value = FieldResolver::resolve(&age, &data, &context, &registry).unwrap();
	/// assert_eq!(value, Some(Value::Null));
	/// ```
	pub fn resolve(
		field: &FieldSpec,
		data: &Value,
		context: &SerializationContext,
		registry: &SchemaRegistry,
	) -> Result<Option<Value>, ResolveError> {
		if !Self::admits(field, context) {
			return Ok(None);
		}
		match field.association() {
			Association::None => Self::resolve_value(field, data, context).map(Some),
			Association::One(_) | Association::Many(_) => {
				AssociationWalker::walk(field, data, context, registry)
			}
		}
	}

	/// Resolve all `fields` into an insertion-ordered map
	pub fn resolve_fields(
		fields: &[FieldSpec],
		data: &Value,
		context: &SerializationContext,
		registry: &SchemaRegistry,
	) -> Result<Map<String, Value>, ResolveError> {
		let mut output = Map::new();
		for field in fields {
			if let Some(value) = Self::resolve(field, data, context, registry)? {
				output.insert(field.name().to_string(), value);
			}
		}
		Ok(output)
	}

	/// Read or compute the raw value of a field, ignoring associations
	pub fn resolve_value(
		field: &FieldSpec,
		data: &Value,
		context: &SerializationContext,
	) -> Result<Value, ResolveError> {
		Self::source_value(field, data, context).map(Cow::into_owned)
	}

	/// Like [`FieldResolver::resolve_value`], borrowing from `data` for key lookups
	pub fn source_value<'a>(
		field: &FieldSpec,
		data: &'a Value,
		context: &SerializationContext,
	) -> Result<Cow<'a, Value>, ResolveError> {
		match field.value_source() {
			ValueSource::Key => Ok(lookup(data, field.name())),
			ValueSource::Renamed(key) => Ok(lookup(data, key)),
			ValueSource::Computed(compute) => {
				compute(data, context)
					.map(Cow::Owned)
					.map_err(|source| ResolveError::Compute {
						field: field.name().to_string(),
						source,
					})
			}
		}
	}

	fn admits(field: &FieldSpec, context: &SerializationContext) -> bool {
		if let Some(filter) = context.field_filter()
			&& !filter.allows(field.name())
		{
			tracing::trace!(field = field.name(), "field not selected");
			return false;
		}
		if !field.is_visible(context) {
			tracing::trace!(
				field = field.name(),
				view = ?context.view(),
				"field filtered by view or scope"
			);
			return false;
		}
		true
	}
}

fn lookup<'a>(data: &'a Value, key: &str) -> Cow<'a, Value> {
	match data.get(key) {
		Some(value) => Cow::Borrowed(value),
		None => Cow::Owned(Value::Null),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::{FieldFilter, Scope};
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[fixture]
	fn registry() -> SchemaRegistry {
		SchemaRegistry::new()
	}

	#[rstest]
	fn test_resolve_plain_fields(registry: SchemaRegistry) {
		// Arrange
		let fields = vec![FieldSpec::new("id"), FieldSpec::new("name")];
		let data = json!({"id": 1, "name": "A", "password": "secret"});

		// Act
		let output =
			FieldResolver::resolve_fields(&fields, &data, &SerializationContext::default(), &registry)
				.unwrap();

		// Assert
		assert_eq!(Value::Object(output), json!({"id": 1, "name": "A"}));
	}

	#[rstest]
	fn test_resolve_fields_preserves_declaration_order(registry: SchemaRegistry) {
		let fields = vec![FieldSpec::new("z"), FieldSpec::new("a"), FieldSpec::new("m")];
		let data = json!({"a": 1, "m": 2, "z": 3});

		let output =
			FieldResolver::resolve_fields(&fields, &data, &SerializationContext::default(), &registry)
				.unwrap();

		let keys: Vec<_> = output.keys().map(String::as_str).collect();
		assert_eq!(keys, ["z", "a", "m"]);
	}

	#[rstest]
	fn test_non_object_data_yields_null(registry: SchemaRegistry) {
		let field = FieldSpec::new("id");

		let value = FieldResolver::resolve(
			&field,
			&json!(42),
			&SerializationContext::default(),
			&registry,
		)
		.unwrap();

		assert_eq!(value, Some(Value::Null));
	}

	#[rstest]
	fn test_computed_field_receives_context(registry: SchemaRegistry) {
		// Arrange
		let field = FieldSpec::computed("greeting", |data, ctx| {
			Ok(json!(format!(
				"{} ({})",
				data["name"].as_str().unwrap_or("?"),
				ctx.view().unwrap_or("default")
			)))
		});
		let context = SerializationContext::default().with_view("compact");

		// Act
		let value = FieldResolver::resolve(&field, &json!({"name": "Ada"}), &context, &registry)
			.unwrap();

		// Assert
		assert_eq!(value, Some(json!("Ada (compact)")));
	}

	#[rstest]
	fn test_computed_failure_propagates(registry: SchemaRegistry) {
		let field = FieldSpec::computed("age", |_, _| Err("no birth date".into()));

		let err = FieldResolver::resolve(
			&field,
			&json!({}),
			&SerializationContext::default(),
			&registry,
		)
		.unwrap_err();

		match err {
			ResolveError::Compute { field, source } => {
				assert_eq!(field, "age");
				assert_eq!(source.to_string(), "no birth date");
			}
			other => panic!("Expected Compute error, got {:?}", other),
		}
	}

	#[rstest]
	fn test_filtered_field_is_not_computed(registry: SchemaRegistry) {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let field = FieldSpec::computed("audit", move |_, _| {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(Value::Null)
		})
		.scope("auditor");

		// Act
		let value = FieldResolver::resolve(
			&field,
			&json!({}),
			&SerializationContext::default(),
			&registry,
		)
		.unwrap();

		// Assert
		assert_eq!(value, None);
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[rstest]
	fn test_view_restricted_field(registry: SchemaRegistry) {
		let fields = vec![FieldSpec::new("id"), FieldSpec::new("bio").view("detailed")];
		let data = json!({"id": 1, "bio": "hello"});

		let plain =
			FieldResolver::resolve_fields(&fields, &data, &SerializationContext::default(), &registry)
				.unwrap();
		let detailed = FieldResolver::resolve_fields(
			&fields,
			&data,
			&SerializationContext::default().with_view("detailed"),
			&registry,
		)
		.unwrap();

		assert!(!plain.contains_key("bio"));
		assert_eq!(detailed["bio"], json!("hello"));
	}

	#[rstest]
	fn test_scope_restricted_field(registry: SchemaRegistry) {
		let fields = vec![FieldSpec::new("id"), FieldSpec::new("salary").scope("hr")];
		let data = json!({"id": 1, "salary": 100});
		let context = SerializationContext::default().with_scope(Scope::from_iter(["hr"]));

		let output = FieldResolver::resolve_fields(&fields, &data, &context, &registry).unwrap();

		assert_eq!(Value::Object(output), json!({"id": 1, "salary": 100}));
	}

	#[rstest]
	fn test_field_filter_applies(registry: SchemaRegistry) {
		let fields = vec![
			FieldSpec::new("id"),
			FieldSpec::new("name"),
			FieldSpec::new("email"),
		];
		let data = json!({"id": 1, "name": "A", "email": "a@example.com"});
		let context = SerializationContext::default()
			.with_field_filter(FieldFilter::new(["id", "email"], ["email"]));

		let output = FieldResolver::resolve_fields(&fields, &data, &context, &registry).unwrap();

		assert_eq!(Value::Object(output), json!({"id": 1}));
	}

	#[rstest]
	fn test_source_value_borrows_for_lookups() {
		let data = json!({"tags": ["a", "b"]});
		let field = FieldSpec::new("tags");

		let value = FieldResolver::source_value(&field, &data, &SerializationContext::default())
			.unwrap();

		assert!(matches!(value, Cow::Borrowed(_)));
	}
}
