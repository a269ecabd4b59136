//! Parse error types

/// Errors that can occur while decoding dates or API responses.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A date string did not match the expected format.
    #[error("Invalid date '{input}': expected {expected}")]
    Date {
        /// The rejected input.
        input: String,
        /// The expected format.
        expected: &'static str,
    },

    /// Failed to decode an API response.
    #[error("Response parse error: {message}")]
    Response {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ParseError {
    /// Creates a new date error.
    pub fn date(input: impl Into<String>, expected: &'static str) -> Self {
        Self::Date {
            input: input.into(),
            expected,
        }
    }

    /// Creates a new response error.
    pub fn response(message: impl Into<String>) -> Self {
        Self::Response {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new response error with the raw response body.
    pub fn response_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Response {
            message: message.into(),
            body: Some(body.into()),
        }
    }
}
