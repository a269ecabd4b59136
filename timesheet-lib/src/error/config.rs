//! Configuration error types

/// Errors that can occur while building an [`ApiConfig`](crate::config::ApiConfig).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why parsing failed.
        message: String,
    },

    /// The base URL uses a scheme other than http or https.
    #[error("Unsupported URL scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    /// The default page size must be at least 1.
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    /// A required environment variable is not set.
    #[error("Missing environment variable {name}")]
    MissingVar { name: &'static str },

    /// An environment variable is set but cannot be used.
    #[error("Invalid value '{value}' for {name}")]
    InvalidVar { name: &'static str, value: String },
}

impl ConfigError {
    /// Creates a new invalid URL error.
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new invalid variable error.
    pub fn invalid_var(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidVar {
            name,
            value: value.into(),
        }
    }
}
