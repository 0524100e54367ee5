//! Association traversal
//!
//! An association is descended into only if the `within` whitelist names it
//! (or no whitelist is given) and the descent stays within `max_depth`.
//! Associations that fail either check are omitted from the output without
//! an error.

use crate::context::SerializationContext;
use crate::error::ResolveError;
use crate::field::{Association, FieldSpec};
use crate::registry::SchemaRegistry;
use crate::resolver::FieldResolver;
use serde_json::Value;

/// Walks `one` and `many` associations into their nested schemas
pub struct AssociationWalker;

impl AssociationWalker {
	/// Serialize the associated value(s) of `field`
	///
	/// Returns `Ok(None)` if the association is not traversed. A `one`
	/// association whose value is missing or null serializes to `null`; a
	/// `many` association whose value is not an array serializes to `[]`.
	/// Element order of `many` associations is preserved.
	///
	/// # Errors
	///
	/// Returns [`ResolveError::UnknownSchema`] if the nested schema is not
	/// registered, or any error raised while resolving the nested fields.
	pub fn walk(
		field: &FieldSpec,
		data: &Value,
		context: &SerializationContext,
		registry: &SchemaRegistry,
	) -> Result<Option<Value>, ResolveError> {
		let (schema_id, many) = match field.association() {
			Association::None => {
				return FieldResolver::resolve_value(field, data, context).map(Some);
			}
			Association::One(schema) => (schema.as_str(), false),
			Association::Many(schema) => (schema.as_str(), true),
		};

		let Some(within) = context.narrow_within(field.name()) else {
			tracing::trace!(field = field.name(), "association not whitelisted");
			return Ok(None);
		};
		if !context.can_descend() {
			tracing::trace!(
				field = field.name(),
				depth = context.depth(),
				max_depth = context.max_depth(),
				"association exceeds max depth"
			);
			return Ok(None);
		}

		let schema = registry
			.get(schema_id)
			.ok_or_else(|| ResolveError::UnknownSchema {
				field: field.name().to_string(),
				schema: schema_id.to_string(),
			})?;
		let child = context.descend(within);
		tracing::debug!(
			field = field.name(),
			schema = schema_id,
			depth = child.depth(),
			"descending into association"
		);

		let value = FieldResolver::source_value(field, data, context)?;
		let serialized = if many {
			match value.as_array() {
				Some(items) => items
					.iter()
					.map(|item| schema.resolve(item, &child, registry).map(Value::Object))
					.collect::<Result<Vec<_>, _>>()
					.map(Value::Array)?,
				None => Value::Array(Vec::new()),
			}
		} else if value.is_null() {
			Value::Null
		} else {
			Value::Object(schema.resolve(&value, &child, registry)?)
		};
		Ok(Some(serialized))
	}
}
