//! Per-call serialization context
//!
//! A [`SerializationContext`] is built once at the start of a call and then
//! threaded by value through the recursion. Descending into an association
//! produces a new context with `depth + 1` and a narrowed whitelist; the
//! parent context is never mutated, so sibling branches of a `many`
//! association cannot interfere with each other.

use crate::within::WithinSpec;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Default maximum association depth
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Set of authorization scopes granted to the caller
///
/// # Examples
///
/// ```
/// use contour_serializers::Scope;
///
/// let scope = Scope::from_iter(["admin", "billing"]);
/// assert!(scope.satisfies("admin"));
/// assert!(!scope.satisfies("support"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
	granted: BTreeSet<String>,
}

impl Scope {
	/// An empty scope granting nothing
	pub fn new() -> Self {
		Self::default()
	}

	/// Grant an additional scope
	pub fn grant(mut self, scope: impl Into<String>) -> Self {
		self.granted.insert(scope.into());
		self
	}

	/// Whether the `required` scope has been granted
	pub fn satisfies(&self, required: &str) -> bool {
		self.granted.contains(required)
	}

	/// Whether nothing has been granted
	pub fn is_empty(&self) -> bool {
		self.granted.is_empty()
	}

	/// Iterate over granted scopes in sorted order
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.granted.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for Scope {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self {
			granted: iter.into_iter().map(Into::into).collect(),
		}
	}
}

/// Top-level field selection (`include` / `exclude` call options)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilter {
	include: Option<BTreeSet<String>>,
	exclude: BTreeSet<String>,
}

impl FieldFilter {
	/// Build a filter; an empty `include` list means "all fields"
	pub fn new<I, E>(include: I, exclude: E) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
		E: IntoIterator,
		E::Item: Into<String>,
	{
		let include: BTreeSet<String> = include.into_iter().map(Into::into).collect();
		Self {
			include: (!include.is_empty()).then_some(include),
			exclude: exclude.into_iter().map(Into::into).collect(),
		}
	}

	/// Whether `name` passes the filter; `exclude` wins over `include`
	pub fn allows(&self, name: &str) -> bool {
		if self.exclude.contains(name) {
			return false;
		}
		self.include
			.as_ref()
			.is_none_or(|include| include.contains(name))
	}
}

/// Immutable context for one serialization call
#[derive(Debug, Clone)]
pub struct SerializationContext {
	view: Option<Arc<str>>,
	scope: Arc<Scope>,
	depth: usize,
	max_depth: usize,
	within: Arc<WithinSpec>,
	field_filter: Option<Arc<FieldFilter>>,
}

impl SerializationContext {
	/// Create a root context (depth 0, unrestricted, no view, no scope)
	///
	/// # Examples
	///
	/// ```
	/// use contour_serializers::SerializationContext;
	///
	/// let context = SerializationContext::new(3);
	/// assert_eq!(context.depth(), 0);
	/// assert_eq!(context.max_depth(), 3);
	/// assert!(context.within().is_unrestricted());
	/// ```
	pub fn new(max_depth: usize) -> Self {
		Self {
			view: None,
			scope: Arc::new(Scope::new()),
			depth: 0,
			max_depth,
			within: Arc::new(WithinSpec::Unrestricted),
			field_filter: None,
		}
	}

	/// Set the active view
	pub fn with_view(mut self, view: impl Into<String>) -> Self {
		self.view = Some(Arc::from(view.into()));
		self
	}

	/// Set the granted authorization scope
	pub fn with_scope(mut self, scope: Scope) -> Self {
		self.scope = Arc::new(scope);
		self
	}

	/// Set the association whitelist
	pub fn with_within(mut self, within: WithinSpec) -> Self {
		self.within = Arc::new(within);
		self
	}

	/// Restrict top-level fields
	pub fn with_field_filter(mut self, filter: FieldFilter) -> Self {
		self.field_filter = Some(Arc::new(filter));
		self
	}

	/// Active view identifier
	pub fn view(&self) -> Option<&str> {
		self.view.as_deref()
	}

	/// Granted authorization scope
	pub fn scope(&self) -> &Scope {
		&self.scope
	}

	/// Current depth (0 = top-level call)
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Maximum allowed depth
	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Remaining association whitelist at this depth
	pub fn within(&self) -> &WithinSpec {
		&self.within
	}

	/// Top-level field filter, only present at depth 0
	pub fn field_filter(&self) -> Option<&FieldFilter> {
		self.field_filter.as_deref()
	}

	/// Check if a descent would stay within `max_depth`
	pub fn can_descend(&self) -> bool {
		self.depth < self.max_depth
	}

	/// Whitelist to use when descending into `field`, or `None` when the
	/// association is not eligible
	pub fn narrow_within(&self, field: &str) -> Option<Arc<WithinSpec>> {
		match self.within.as_ref() {
			WithinSpec::Unrestricted => Some(Arc::clone(&self.within)),
			WithinSpec::Only(entries) => entries.get(field).cloned(),
		}
	}

	/// Create the child context for an association descent
	///
	/// # Examples
	///
	/// ```
	/// use contour_serializers::{SerializationContext, WithinSpec};
	/// use std::sync::Arc;
	///
	/// let context = SerializationContext::new(3).with_view("detailed");
	/// let child = context.descend(Arc::new(WithinSpec::only()));
	///
	/// assert_eq!(child.depth(), 1);
	/// assert_eq!(child.view(), Some("detailed"));
	/// assert!(child.within().is_empty());
	/// // The parent is untouched
	/// assert_eq!(context.depth(), 0);
	/// ```
	pub fn descend(&self, within: Arc<WithinSpec>) -> Self {
		Self {
			view: self.view.clone(),
			scope: Arc::clone(&self.scope),
			depth: self.depth + 1,
			max_depth: self.max_depth,
			within,
			field_filter: None,
		}
	}
}

impl Default for SerializationContext {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_DEPTH)
	}
}
