//! Integration tests for association traversal across registered schemas

use contour_serializers::{
	FieldSpec, Schema, SchemaRegistry, Scope, Serializable, SerializationContext, WithinSpec,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

/// `a` and `b` refer to each other
#[fixture]
fn cyclic_registry() -> SchemaRegistry {
	let mut registry = SchemaRegistry::new();
	registry
		.register(Schema::builder("a").field("id").has_one("b", "b").build().unwrap())
		.unwrap()
		.register(Schema::builder("b").field("id").has_one("a", "a").build().unwrap())
		.unwrap();
	registry
}

#[fixture]
fn cyclic_data() -> Value {
	json!({
		"id": 1,
		"b": {
			"id": 2,
			"a": {
				"id": 3,
				"b": {"id": 4, "a": {"id": 5}}
			}
		}
	})
}

fn serialize(
	registry: &SchemaRegistry,
	schema: &str,
	data: &Value,
	context: &SerializationContext,
) -> Value {
	let schema = registry.get(schema).unwrap();
	Value::Object(schema.resolve(data, context, registry).unwrap())
}

#[rstest]
fn test_whitelist_bounds_cycle_at_two_levels(cyclic_registry: SchemaRegistry, cyclic_data: Value) {
	// Arrange
	let within = WithinSpec::only().nest("b", WithinSpec::only().nest("a", WithinSpec::only()));
	let context = SerializationContext::new(2).with_within(within);

	// Act
	let output = serialize(&cyclic_registry, "a", &cyclic_data, &context);

	// Assert
	assert_eq!(output, json!({"id": 1, "b": {"id": 2, "a": {"id": 3}}}));
}

#[rstest]
fn test_max_depth_cuts_before_whitelist(cyclic_registry: SchemaRegistry, cyclic_data: Value) {
	let within = WithinSpec::only().nest("b", WithinSpec::only().nest("a", WithinSpec::only()));
	let context = SerializationContext::new(1).with_within(within);

	let output = serialize(&cyclic_registry, "a", &cyclic_data, &context);

	assert_eq!(output, json!({"id": 1, "b": {"id": 2}}));
}

#[rstest]
fn test_unrestricted_cycle_is_truncated_at_max_depth(
	cyclic_registry: SchemaRegistry,
	cyclic_data: Value,
) {
	let context = SerializationContext::new(3);

	let output = serialize(&cyclic_registry, "a", &cyclic_data, &context);

	assert_eq!(
		output,
		json!({"id": 1, "b": {"id": 2, "a": {"id": 3, "b": {"id": 4}}}})
	);
}

#[rstest]
fn test_within_from_value_drives_traversal(cyclic_registry: SchemaRegistry, cyclic_data: Value) {
	// Arrange
	let within = WithinSpec::from_value(&json!({"b": ["a"]})).unwrap();
	let context = SerializationContext::default().with_within(within);

	// Act
	let output = serialize(&cyclic_registry, "a", &cyclic_data, &context);

	// Assert
	assert_eq!(output, json!({"id": 1, "b": {"id": 2, "a": {"id": 3}}}));
}

#[rstest]
fn test_default_depth_limit_on_self_reference() {
	// Arrange
	let mut registry = SchemaRegistry::new();
	registry
		.register(
			Schema::builder("node")
				.field("id")
				.has_one("child", "node")
				.build()
				.unwrap(),
		)
		.unwrap();
	let mut data = json!({"id": 20});
	for id in (0..20).rev() {
		data = json!({"id": id, "child": data});
	}

	// Act
	let output = serialize(&registry, "node", &data, &SerializationContext::default());

	// Assert
	let mut levels = 0;
	let mut cursor = &output;
	while let Some(child) = cursor.get("child") {
		levels += 1;
		cursor = child;
	}
	assert_eq!(levels, 10);
	assert_eq!(cursor["id"], json!(10));
}

#[rstest]
fn test_view_and_scope_propagate_into_associations() {
	// Arrange
	let mut registry = SchemaRegistry::new();
	let restricted = Schema::builder("member")
		.field("id")
		.spec(FieldSpec::new("bio").view("detailed"))
		.spec(FieldSpec::new("salary").scope("hr"))
		.build()
		.unwrap();
	registry.register(restricted).unwrap();
	registry
		.register(
			Schema::builder("department")
				.has_many("members", "member")
				.build()
				.unwrap(),
		)
		.unwrap();
	let data = json!({"members": [{"id": 1, "bio": "b", "salary": 10}]});

	// Act
	let plain = serialize(&registry, "department", &data, &SerializationContext::default());
	let privileged = serialize(
		&registry,
		"department",
		&data,
		&SerializationContext::default()
			.with_view("detailed")
			.with_scope(Scope::from_iter(["hr"])),
	);

	// Assert
	assert_eq!(plain, json!({"members": [{"id": 1}]}));
	assert_eq!(
		privileged,
		json!({"members": [{"id": 1, "bio": "b", "salary": 10}]})
	);
}

#[rstest]
fn test_registry_is_shared_across_threads(cyclic_registry: SchemaRegistry, cyclic_data: Value) {
	// Arrange
	let registry = Arc::new(cyclic_registry);
	let data = Arc::new(cyclic_data);

	// Act
	let outputs: Vec<Value> = std::thread::scope(|scope| {
		let handles: Vec<_> = (1..=4)
			.map(|max_depth| {
				let registry = Arc::clone(&registry);
				let data = Arc::clone(&data);
				scope.spawn(move || {
					serialize(&registry, "a", &data, &SerializationContext::new(max_depth))
				})
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	// Assert
	assert_eq!(outputs[0], json!({"id": 1, "b": {"id": 2}}));
	assert_eq!(
		outputs[3],
		json!({"id": 1, "b": {"id": 2, "a": {"id": 3, "b": {"id": 4, "a": {"id": 5}}}}})
	);
}
