//! Error types

mod config;
mod parse;

pub use config::*;
pub use parse::*;

/// Any error produced by this library.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid date or response input.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
