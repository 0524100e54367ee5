//! # Contour Pagination
//!
//! Pagination metadata merged into response envelopes under
//! `meta.pagination`.
//!
//! A block is only produced when both `page` and `per_page` are known;
//! `total` and `total_pages` are added when the total item count is known.
//!
//! ## Example
//!
//! ```
//! use contour_pagination::Pagination;
//! use serde_json::json;
//!
//! let block = Pagination::from_parts(Some(2), Some(10), Some(25)).unwrap();
//! assert_eq!(block.total_pages(), Some(3));
//! assert_eq!(
//!     serde_json::Value::Object(block.to_map()),
//!     json!({"page": 2, "per_page": 10, "total": 25, "total_pages": 3})
//! );
//!
//! // Without `per_page` there is nothing to describe
//! assert!(Pagination::from_parts(Some(2), None, Some(25)).is_none());
//! ```

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Key under which the block is stored inside `meta`
pub const PAGINATION_KEY: &str = "pagination";

/// Pagination metadata for one page of results
///
/// Serializes to the same map as [`Pagination::to_map`], including the
/// derived `total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
	/// Current page number
	pub page: u64,
	/// Items per page
	pub per_page: u64,
	/// Total number of items across all pages, if known
	#[serde(default)]
	pub total: Option<u64>,
}

impl Pagination {
	/// Creates a block without a known total.
	///
	/// # Examples
	///
	/// ```
	/// use contour_pagination::Pagination;
	///
	/// let block = Pagination::new(1, 20);
	/// assert_eq!(block.total_pages(), None);
	/// ```
	pub fn new(page: u64, per_page: u64) -> Self {
		Self {
			page,
			per_page,
			total: None,
		}
	}

	/// Sets the total item count
	pub fn with_total(mut self, total: u64) -> Self {
		self.total = Some(total);
		self
	}

	/// Builds a block from optional call options.
	///
	/// Returns `None` unless both `page` and `per_page` are present.
	pub fn from_parts(page: Option<u64>, per_page: Option<u64>, total: Option<u64>) -> Option<Self> {
		let (page, per_page) = (page?, per_page?);
		Some(Self {
			page,
			per_page,
			total,
		})
	}

	/// Number of pages, when the total is known
	///
	/// See [`total_pages`] for the handling of zero totals and page sizes.
	pub fn total_pages(&self) -> Option<u64> {
		self.total.map(|total| total_pages(total, self.per_page))
	}

	/// Renders the block as an ordered map
	/// (`page`, `per_page`, then `total` and `total_pages` when known)
	pub fn to_map(&self) -> Map<String, Value> {
		let mut map = Map::new();
		map.insert("page".to_string(), Value::from(self.page));
		map.insert("per_page".to_string(), Value::from(self.per_page));
		if let Some(total) = self.total {
			map.insert("total".to_string(), Value::from(total));
			map.insert(
				"total_pages".to_string(),
				Value::from(total_pages(total, self.per_page)),
			);
		}
		map
	}
}

impl Serialize for Pagination {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_map().serialize(serializer)
	}
}

impl From<Pagination> for Value {
	fn from(pagination: Pagination) -> Self {
		Value::Object(pagination.to_map())
	}
}

/// Computes `floor((total - 1) / per_page) + 1`.
///
/// A zero `total` has no pages and yields `0`, as does a zero `per_page`.
///
/// # Examples
///
/// ```
/// use contour_pagination::total_pages;
///
/// assert_eq!(total_pages(25, 10), 3);
/// assert_eq!(total_pages(20, 10), 2);
/// assert_eq!(total_pages(0, 10), 0);
/// assert_eq!(total_pages(5, 0), 0);
/// ```
pub fn total_pages(total: u64, per_page: u64) -> u64 {
	if total == 0 || per_page == 0 {
		return 0;
	}
	(total - 1) / per_page + 1
}
