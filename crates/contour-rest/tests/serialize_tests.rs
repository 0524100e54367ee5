//! Integration tests for the serialization pipeline: resolution, envelopes
//! and key casing

use contour_conf::Settings;
use contour_exception::ErrorKind;
use contour_rest::{Contour, SerializeOptions};
use contour_serializers::{FieldSpec, Schema, SchemaRegistry, WithinSpec};
use rstest::{fixture, rstest};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

#[fixture]
fn contour() -> Contour {
	let mut registry = SchemaRegistry::new();
	registry
		.register(Schema::builder("plain").fields(["id", "name"]).build().unwrap())
		.unwrap()
		.register(
			Schema::builder("user")
				.field("id")
				.field("user_name")
				.spec(FieldSpec::new("email").view("detailed"))
				.spec(FieldSpec::new("salary").scope("hr"))
				.computed("display_name", |data, _ctx| {
					Ok(Value::from(format!(
						"@{}",
						data["user_name"].as_str().unwrap_or_default()
					)))
				})
				.has_many("recent_posts", "post")
				.build()
				.unwrap(),
		)
		.unwrap()
		.register(
			Schema::builder("post")
				.field("post_id")
				.field_from("title", "headline")
				.has_one("author", "user")
				.build()
				.unwrap(),
		)
		.unwrap()
		.register(Schema::builder("a").field("id").has_one("b", "b").build().unwrap())
		.unwrap()
		.register(Schema::builder("b").field("id").has_one("a", "a").build().unwrap())
		.unwrap();
	registry.validate().unwrap();
	Contour::new(Arc::new(registry), Settings::default())
}

fn meta(entries: Value) -> Map<String, Value> {
	entries.as_object().cloned().unwrap()
}

#[rstest]
fn test_plain_schema(contour: Contour) {
	// Arrange
	let data = json!({"id": 1, "name": "A"});

	// Act
	let output = contour.serialize("plain", &data, &SerializeOptions::new()).unwrap();

	// Assert
	assert_eq!(output, json!({"id": 1, "name": "A"}));
}

#[rstest]
fn test_serializable_struct_input(contour: Contour) {
	#[derive(Serialize)]
	struct Row {
		id: u32,
		name: &'static str,
		secret: &'static str,
	}
	let row = Row {
		id: 7,
		name: "Grace",
		secret: "hunter2",
	};

	let output = contour.serialize("plain", &row, &SerializeOptions::new()).unwrap();

	assert_eq!(output, json!({"id": 7, "name": "Grace"}));
}

#[rstest]
fn test_unconvertible_input_is_input_error(contour: Contour) {
	struct Broken;

	impl Serialize for Broken {
		fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
			Err(serde::ser::Error::custom("cannot read row"))
		}
	}

	let err = contour
		.serialize("plain", &Broken, &SerializeOptions::new())
		.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Input);
	assert!(err.original().unwrap().to_string().contains("cannot read row"));
}

#[rstest]
#[case(SerializeOptions::new(), false)]
#[case(SerializeOptions::new().view("summary"), false)]
#[case(SerializeOptions::new().view("detailed"), true)]
fn test_view_filtering(
	contour: Contour,
	#[case] options: SerializeOptions,
	#[case] has_email: bool,
) {
	let data = json!({"id": 1, "user_name": "ada", "email": "ada@example.com"});

	let output = contour.serialize("user", &data, &options.camelize(false)).unwrap();

	assert_eq!(output.get("email").is_some(), has_email);
}

#[rstest]
fn test_scope_filtering(contour: Contour) {
	let data = json!({"id": 1, "user_name": "ada", "salary": 100});

	let anonymous = contour.serialize("user", &data, &SerializeOptions::new()).unwrap();
	let hr = contour
		.serialize("user", &data, &SerializeOptions::new().grant("hr"))
		.unwrap();

	assert!(anonymous.get("salary").is_none());
	assert_eq!(hr["salary"], json!(100));
}

#[rstest]
fn test_include_and_exclude_apply_to_top_level_only(contour: Contour) {
	// Arrange
	let data = json!({
		"id": 1,
		"user_name": "ada",
		"recent_posts": [{"post_id": 9, "headline": "Hi", "author": {"id": 1, "user_name": "ada"}}]
	});
	let options = SerializeOptions::new()
		.include(["id", "recent_posts", "user_name"])
		.exclude(["user_name"])
		.within(WithinSpec::only().include("recent_posts"))
		.camelize(false);

	// Act
	let output = contour.serialize("user", &data, &options).unwrap();

	// Assert
	assert_eq!(
		output,
		json!({"id": 1, "recent_posts": [{"post_id": 9, "title": "Hi"}]})
	);
}

#[rstest]
fn test_depth_bound_on_cycle(contour: Contour) {
	// Arrange
	let data = json!({"id": 1, "b": {"id": 2, "a": {"id": 3, "b": {"id": 4}}}});
	let within = WithinSpec::from_value(&json!({"b": {"a": {}}})).unwrap();
	let options = SerializeOptions::new().within(within).max_depth(2);

	// Act
	let output = contour.serialize("a", &data, &options).unwrap();

	// Assert
	assert_eq!(output, json!({"id": 1, "b": {"id": 2, "a": {"id": 3}}}));
}

#[rstest]
fn test_cycle_without_within_truncates_silently(contour: Contour) {
	let data = json!({"id": 1, "b": {"id": 2, "a": {"id": 3, "b": {"id": 4}}}});

	let output = contour
		.serialize("a", &data, &SerializeOptions::new().max_depth(1))
		.unwrap();

	assert_eq!(output, json!({"id": 1, "b": {"id": 2}}));
}

#[rstest]
fn test_camelization_nested_and_in_lists(contour: Contour) {
	// Arrange
	let data = json!({
		"id": 1,
		"user_name": "ada",
		"recent_posts": [
			{"post_id": 1, "headline": "First", "author": {"id": 1, "user_name": "ada"}}
		]
	});
	let options = SerializeOptions::new()
		.within(WithinSpec::from_value(&json!({"recent_posts": ["author"]})).unwrap());

	// Act
	let output = contour.serialize("user", &data, &options).unwrap();

	// Assert
	assert_eq!(
		output,
		json!({
			"id": 1,
			"userName": "ada",
			"displayName": "@ada",
			"recentPosts": [{
				"postId": 1,
				"title": "First",
				"author": {"id": 1, "userName": "ada", "displayName": "@ada"}
			}]
		})
	);
}

#[rstest]
fn test_camelize_disabled_keeps_keys(contour: Contour) {
	let data = json!({"id": 1, "user_name": "ada", "recent_posts": []});

	let output = contour
		.serialize("user", &data, &SerializeOptions::new().camelize(false))
		.unwrap();

	assert_eq!(
		output,
		json!({"id": 1, "user_name": "ada", "display_name": "@ada", "recent_posts": []})
	);
}

#[rstest]
fn test_camelize_default_comes_from_settings() {
	// Arrange
	let mut registry = SchemaRegistry::new();
	registry
		.register(Schema::builder("user").field("user_name").build().unwrap())
		.unwrap();
	let settings = Settings::default().camelize(false);
	let contour = Contour::new(Arc::new(registry), settings);

	// Act
	let default = contour
		.serialize("user", &json!({"user_name": "ada"}), &SerializeOptions::new())
		.unwrap();
	let forced = contour
		.serialize(
			"user",
			&json!({"user_name": "ada"}),
			&SerializeOptions::new().camelize(true),
		)
		.unwrap();

	// Assert
	assert_eq!(default, json!({"user_name": "ada"}));
	assert_eq!(forced, json!({"userName": "ada"}));
}

#[rstest]
fn test_pagination_block(contour: Contour) {
	let data = json!([{"id": 11, "name": "k"}]);
	let options = SerializeOptions::new().paginate(2, 10).total(25).camelize(false);

	let output = contour.serialize("plain", &data, &options).unwrap();

	assert_eq!(
		output,
		json!({
			"data": [{"id": 11, "name": "k"}],
			"meta": {"pagination": {"page": 2, "per_page": 10, "total": 25, "total_pages": 3}}
		})
	);
}

#[rstest]
fn test_pagination_keys_are_camelized(contour: Contour) {
	let options = SerializeOptions::new().paginate(1, 10).total(0);

	let output = contour.serialize("plain", &json!([]), &options).unwrap();

	assert_eq!(
		output["meta"]["pagination"],
		json!({"page": 1, "perPage": 10, "total": 0, "totalPages": 0})
	);
}

#[rstest]
fn test_envelope_root_and_meta(contour: Contour) {
	let options = SerializeOptions::new().root("user").meta(meta(json!({"v": 1})));

	let output = contour
		.serialize("plain", &json!({"id": 1, "name": "A"}), &options)
		.unwrap();

	assert_eq!(output, json!({"user": {"id": 1, "name": "A"}, "meta": {"v": 1}}));
}

#[rstest]
fn test_envelope_meta_only(contour: Contour) {
	let options = SerializeOptions::new().meta(meta(json!({"v": 1})));

	let output = contour
		.serialize("plain", &json!({"id": 1, "name": "A"}), &options)
		.unwrap();

	assert_eq!(output, json!({"data": {"id": 1, "name": "A"}, "meta": {"v": 1}}));
}

#[rstest]
fn test_envelope_meta_fn_receives_original_data(contour: Contour) {
	// Arrange
	let data = json!([{"id": 1, "name": "A", "archived": true}, {"id": 2, "name": "B"}]);
	let options = SerializeOptions::new().root("items").meta_fn(|data, _| {
		let archived = data
			.as_array()
			.map_or(0, |items| items.iter().filter(|item| item["archived"] == json!(true)).count());
		let mut meta = Map::new();
		meta.insert("archived_count".to_string(), Value::from(archived));
		Ok(meta)
	});

	// Act
	let output = contour.serialize("plain", &data, &options).unwrap();

	// Assert
	assert_eq!(
		output,
		json!({
			"items": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
			"meta": {"archivedCount": 1}
		})
	);
}
