//! Query options handed to the OData builder.

use serde::Deserialize;

use super::Filter;
use super::OrderBy;

/// A structured description of an OData query.
///
/// Every field is optional. Unset fields produce no query segment at all, so
/// options can be assembled piecemeal.
///
/// # Example
///
/// ```
/// use timesheet_lib::api::query::Filter;
/// use timesheet_lib::api::query::OrderBy;
/// use timesheet_lib::api::query::QueryOptions;
///
/// let options = QueryOptions::new()
///     .select(&["id", "date"])
///     .filter(Filter::new().contains("name", "an"))
///     .order_by(OrderBy::desc("date"))
///     .top(10);
/// ```
///
/// Options also deserialize from the JSON shape used by the front end:
///
/// ```
/// use timesheet_lib::api::query::QueryOptions;
///
/// let options: QueryOptions = serde_json::from_str(
///     r#"{"filter": {"age": [["ge", 20], ["le", 30]]}, "orderBy": ["id", "asc"], "top": 5}"#,
/// ).unwrap();
/// assert_eq!(options.top, Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    /// Fields to select (`$select`).
    pub select: Option<Vec<String>>,
    /// Relations to expand (`$expand`).
    pub expand: Option<Vec<String>>,
    /// Filter entries (`$filter`).
    pub filter: Option<Filter>,
    /// Maximum number of results (`$top`).
    pub top: Option<u64>,
    /// Number of results to skip (`$skip`).
    pub skip: Option<u64>,
    /// Result ordering (`$orderby`).
    pub order_by: Option<OrderBy>,
    /// Whether to request the total count (`$count`).
    pub count: Option<bool>,
}

impl QueryOptions {
    /// Creates empty query options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies which fields to select.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select = Some(fields.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Specifies which relations to expand.
    pub fn expand(mut self, relations: &[&str]) -> Self {
        self.expand = Some(relations.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Sets the filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Limits the number of records returned.
    pub fn top(mut self, n: u64) -> Self {
        self.top = Some(n);
        self
    }

    /// Skips the first `n` records.
    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    /// Sets the ordering of results.
    pub fn order_by(mut self, order: impl Into<OrderBy>) -> Self {
        self.order_by = Some(order.into());
        self
    }

    /// Requests the total count of matching records.
    pub fn include_count(mut self) -> Self {
        self.count = Some(true);
        self
    }
}
