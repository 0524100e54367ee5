//! Per-call serialization options

use contour_exception::BoxError;
use contour_pagination::Pagination;
use contour_serializers::{FieldFilter, Scope, SerializationContext, WithinSpec};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Signature of a meta builder: `(original_data, options) -> meta`
pub type MetaFn =
	Arc<dyn Fn(&Value, &SerializeOptions) -> Result<Map<String, Value>, BoxError> + Send + Sync>;

/// Response metadata, given literally or built per call
#[derive(Clone)]
pub enum Meta {
	Literal(Map<String, Value>),
	Computed(MetaFn),
}

impl fmt::Debug for Meta {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Meta::Literal(map) => f.debug_tuple("Literal").field(map).finish(),
			Meta::Computed(_) => f.write_str("Computed(<fn>)"),
		}
	}
}

/// Options recognized by a serialization call
///
/// Unset options fall back to the process [`Settings`](contour_conf::Settings).
///
/// # Examples
///
/// ```
/// use contour_rest::SerializeOptions;
/// use serde_json::json;
///
/// let options = SerializeOptions::new()
///     .view("detailed")
///     .root("users")
///     .paginate(2, 10)
///     .total(25)
///     .camelize(false);
///
/// assert_eq!(options.view.as_deref(), Some("detailed"));
/// assert_eq!(options.pagination().unwrap().total_pages(), Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
	/// Active view
	pub view: Option<String>,
	/// Granted authorization scopes
	pub scope: Scope,
	/// Top-level fields to keep (empty keeps all)
	pub include: Vec<String>,
	/// Top-level fields to drop
	pub exclude: Vec<String>,
	/// Root key wrapping the payload
	pub root: Option<String>,
	/// Response metadata
	pub meta: Option<Meta>,
	pub page: Option<u64>,
	pub per_page: Option<u64>,
	pub total: Option<u64>,
	/// Association whitelist; `None` leaves every association eligible
	pub within: Option<WithinSpec>,
	/// Maximum association depth
	pub max_depth: Option<usize>,
	/// Whether to camelize keys
	pub camelize: Option<bool>,
}

impl SerializeOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn view(mut self, view: impl Into<String>) -> Self {
		self.view = Some(view.into());
		self
	}

	pub fn scope(mut self, scope: Scope) -> Self {
		self.scope = scope;
		self
	}

	/// Grant one more authorization scope
	pub fn grant(mut self, scope: impl Into<String>) -> Self {
		self.scope = self.scope.grant(scope);
		self
	}

	pub fn include<I>(mut self, fields: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		self.include = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn exclude<I>(mut self, fields: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		self.exclude = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn root(mut self, root: impl Into<String>) -> Self {
		self.root = Some(root.into());
		self
	}

	/// Attach literal metadata
	pub fn meta(mut self, meta: Map<String, Value>) -> Self {
		self.meta = Some(Meta::Literal(meta));
		self
	}

	/// Build metadata from the original data when the call runs
	///
	/// # Examples
	///
	/// ```
	/// use contour_rest::SerializeOptions;
	/// use serde_json::{Map, Value};
	///
	/// let options = SerializeOptions::new().meta_fn(|data, _options| {
	///     let mut meta = Map::new();
	///     meta.insert("count".to_string(), Value::from(data.as_array().map_or(1, Vec::len)));
	///     Ok(meta)
	/// });
	/// assert!(options.meta.is_some());
	/// ```
	pub fn meta_fn<F>(mut self, build: F) -> Self
	where
		F: Fn(&Value, &SerializeOptions) -> Result<Map<String, Value>, BoxError>
			+ Send
			+ Sync
			+ 'static,
	{
		self.meta = Some(Meta::Computed(Arc::new(build)));
		self
	}

	/// Set `page` and `per_page`
	pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
		self.page = Some(page);
		self.per_page = Some(per_page);
		self
	}

	pub fn total(mut self, total: u64) -> Self {
		self.total = Some(total);
		self
	}

	pub fn within(mut self, within: WithinSpec) -> Self {
		self.within = Some(within);
		self
	}

	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = Some(max_depth);
		self
	}

	pub fn camelize(mut self, camelize: bool) -> Self {
		self.camelize = Some(camelize);
		self
	}

	/// Pagination block, present only when both `page` and `per_page` are set
	pub fn pagination(&self) -> Option<Pagination> {
		Pagination::from_parts(self.page, self.per_page, self.total)
	}

	/// Root context for this call
	pub(crate) fn context(&self, default_max_depth: usize) -> SerializationContext {
		let mut context = SerializationContext::new(self.max_depth.unwrap_or(default_max_depth))
			.with_scope(self.scope.clone());
		if let Some(view) = &self.view {
			context = context.with_view(view.as_str());
		}
		if let Some(within) = &self.within {
			context = context.with_within(within.clone());
		}
		if !self.include.is_empty() || !self.exclude.is_empty() {
			context = context.with_field_filter(FieldFilter::new(
				self.include.iter().map(String::as_str),
				self.exclude.iter().map(String::as_str),
			));
		}
		context
	}
}
