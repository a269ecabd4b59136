//! Backend API addressing

mod endpoint;
pub mod query;

pub use endpoint::*;
