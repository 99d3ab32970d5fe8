//! docsearch Error Types
//!
//! Unified error type shared by the client, dispatcher and CLI.

/// Unified error type for docsearch
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// Rejected form input. The request is never sent.
    #[error("{message}")]
    Validation { message: String },

    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    #[error("HTTP error! status: 429 (rate limit exceeded)")]
    RateLimited,

    #[error("Request error: {message}")]
    Request { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl SearchError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn http<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn request<S: Into<String>>(message: S) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = SearchError::validation("test");
        assert!(matches!(err, SearchError::Validation { .. }));

        let err = SearchError::request("test");
        assert!(matches!(err, SearchError::Request { .. }));
    }

    #[test]
    fn test_http_message_mentions_status() {
        let err = SearchError::http(500, "boom");
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert!(matches!(err, SearchError::Http { status: 500, .. }));
    }

    #[test]
    fn test_rate_limited_message() {
        assert!(SearchError::RateLimited.to_string().contains("429"));
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = SearchError::validation("Please enter a search query");
        assert_eq!(err.to_string(), "Please enter a search query");
    }
}
