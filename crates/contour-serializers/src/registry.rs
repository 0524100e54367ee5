//! Read-only schema registry
//!
//! Schemas are registered during startup; afterwards the registry is only
//! read, so it can be shared across threads behind an `Arc` without locking.

use crate::error::SchemaError;
use crate::schema::Serializable;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Schemas keyed by identifier
#[derive(Clone, Default)]
pub struct SchemaRegistry {
	schemas: HashMap<String, Arc<dyn Serializable>>,
}

impl SchemaRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a schema under its identifier
	///
	/// # Errors
	///
	/// Returns an error if the identifier is already registered.
	///
	/// # Examples
	///
	/// ```
	/// use contour_serializers::{Schema, SchemaRegistry};
	///
	/// let mut registry = SchemaRegistry::new();
	/// registry.register(Schema::builder("user").field("id").build().unwrap()).unwrap();
	///
	/// assert!(registry.contains("user"));
	/// assert!(registry.register(Schema::builder("user").build().unwrap()).is_err());
	/// ```
	pub fn register<S>(&mut self, schema: S) -> Result<&mut Self, SchemaError>
	where
		S: Serializable + 'static,
	{
		self.register_shared(Arc::new(schema))
	}

	/// Register an already shared schema
	pub fn register_shared(
		&mut self,
		schema: Arc<dyn Serializable>,
	) -> Result<&mut Self, SchemaError> {
		let identifier = schema.identifier().to_string();
		if self.schemas.contains_key(&identifier) {
			return Err(SchemaError::DuplicateSchema(identifier));
		}
		self.schemas.insert(identifier, schema);
		Ok(self)
	}

	/// Look up a schema
	pub fn get(&self, identifier: &str) -> Option<&dyn Serializable> {
		self.schemas.get(identifier).map(|schema| schema.as_ref())
	}

	/// Whether `identifier` is registered
	pub fn contains(&self, identifier: &str) -> bool {
		self.schemas.contains_key(identifier)
	}

	/// Number of registered schemas
	pub fn len(&self) -> usize {
		self.schemas.len()
	}

	/// Whether no schema is registered
	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty()
	}

	/// Registered identifiers in sorted order
	pub fn identifiers(&self) -> Vec<&str> {
		let mut identifiers: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
		identifiers.sort_unstable();
		identifiers
	}

	/// Check that every association refers to a registered schema
	///
	/// The walker reports unknown schemas lazily when it reaches them; this
	/// catches the same misconfiguration eagerly at startup.
	pub fn validate(&self) -> Result<(), SchemaError> {
		for identifier in self.identifiers() {
			let Some(schema) = self.get(identifier) else {
				continue;
			};
			for (field, target) in schema.nested_schemas() {
				if !self.contains(target) {
					return Err(SchemaError::UnknownReference {
						schema: identifier.to_string(),
						field: field.to_string(),
						target: target.to_string(),
					});
				}
			}
		}
		Ok(())
	}
}

impl fmt::Debug for SchemaRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SchemaRegistry")
			.field("schemas", &self.identifiers())
			.finish()
	}
}
