//! OData query support.
//!
//! This module turns [`QueryOptions`](super::QueryOptions) into OData v4 query
//! strings and composes them with a resource URL.
//!
//! # Example
//!
//! ```
//! use timesheet_lib::api::query::Filter;
//! use timesheet_lib::api::query::OrderBy;
//! use timesheet_lib::api::query::QueryOptions;
//! use timesheet_lib::api::query::odata::ODataBuilder;
//!
//! let builder = ODataBuilder::new("https://api.example.com/timesheets", false);
//! let options = QueryOptions::new()
//!     .filter(Filter::new().value("userId", 7))
//!     .order_by(OrderBy::desc("date"));
//!
//! assert_eq!(
//!     builder.build_url(Some(&options)),
//!     "https://api.example.com/timesheets?$filter=(userId eq 7)&$orderby=date desc"
//! );
//! ```

mod builder;
pub(crate) mod url;

pub use builder::ODataBuilder;
pub use builder::ODATA_SUFFIX;
