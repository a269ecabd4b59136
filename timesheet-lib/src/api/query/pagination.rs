//! Page-based pagination mapped onto `$top` and `$skip`.

use super::Filter;
use super::OrderBy;
use super::QueryOptions;

/// Page size used when none is given.
pub const DEFAULT_ITEMS_PER_PAGE: u64 = 10;

/// Pagination request for a list view.
///
/// Pages are 1-based. A paginated query always asks for the total count so
/// the caller can render page controls.
///
/// # Example
///
/// ```
/// use timesheet_lib::api::query::Filter;
/// use timesheet_lib::api::query::PaginationOptions;
/// use timesheet_lib::api::query::QueryOptions;
///
/// let base = QueryOptions::new().filter(Filter::new().contains("name", "an"));
/// let options = PaginationOptions::from_page(3, 25, base).into_query_options();
///
/// assert_eq!(options.top, Some(25));
/// assert_eq!(options.skip, Some(50));
/// assert_eq!(options.count, Some(true));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationOptions {
    page: u64,
    items_per_page: u64,
    filter: Option<Filter>,
    order_by: Option<OrderBy>,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            filter: None,
            order_by: None,
        }
    }
}

impl PaginationOptions {
    /// Creates options for `page` of size `items_per_page`, keeping the
    /// filter and ordering of `base`.
    ///
    /// Page 0 is treated as page 1.
    pub fn from_page(page: u64, items_per_page: u64, base: QueryOptions) -> Self {
        Self {
            page: page.max(1),
            items_per_page,
            filter: base.filter,
            order_by: base.order_by,
        }
    }

    /// Creates options for the first page with the default page size.
    pub fn from_options(base: QueryOptions) -> Self {
        Self::from_page(1, DEFAULT_ITEMS_PER_PAGE, base)
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    /// Returns the `$top` value for this page.
    pub fn top(&self) -> u64 {
        self.items_per_page
    }

    /// Returns the `$skip` value for this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.items_per_page)
    }

    /// Returns the filter, if any.
    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Returns the ordering, if any.
    pub fn order_by(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    /// Builds the query options for this page.
    pub fn to_query_options(&self) -> QueryOptions {
        self.clone().into_query_options()
    }

    /// Consumes the pagination options and builds the query options.
    pub fn into_query_options(self) -> QueryOptions {
        QueryOptions {
            top: Some(self.top()),
            skip: Some(self.skip()),
            count: Some(true),
            filter: self.filter,
            order_by: self.order_by,
            ..QueryOptions::default()
        }
    }
}

impl From<PaginationOptions> for QueryOptions {
    fn from(pagination: PaginationOptions) -> Self {
        pagination.into_query_options()
    }
}
