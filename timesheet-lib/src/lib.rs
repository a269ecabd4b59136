//! Timesheet API client library
//!
//! Builds OData v4 query URLs for the timesheet backend: filters, ordering,
//! pagination and the endpoint table, plus decoding of paginated responses.
//! No network I/O happens here; callers hand the URLs to their HTTP client.

pub mod api;
pub mod config;
pub mod date;
pub mod error;

pub use config::ApiConfig;
pub use error::Error;
