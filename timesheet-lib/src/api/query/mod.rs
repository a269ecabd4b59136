//! Query building for the OData backend.
//!
//! # Shared Types
//!
//! - [`Filter`] - Field filters, either scalar equality or operator conditions
//! - [`OrderBy`] - Ordering specification for query results
//! - [`QueryOptions`] - Everything a single query asks for
//! - [`PaginationOptions`] - Page number and size, mapped onto `$top`/`$skip`
//! - [`PaginatedResult`] - A decoded page of results with the total count
//!
//! # Query Builders
//!
//! - [`odata`] - OData URL builder (`$filter`, `$select`, `$expand`, etc.)

mod filter;
pub mod odata;
mod options;
mod order;
mod page;
mod pagination;

pub use filter::Filter;
pub use filter::FilterEntry;
pub use filter::FilterValue;
pub use filter::Operator;
pub use options::QueryOptions;
pub use order::Direction;
pub use order::FieldPath;
pub use order::OrderBy;
pub use page::PaginatedResult;
pub use pagination::PaginationOptions;
pub use pagination::DEFAULT_ITEMS_PER_PAGE;
