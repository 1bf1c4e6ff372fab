//! Error types for the SIGAA scraper
//!
//! Errors only occur at the HTTP/HTML boundary. The schedule and
//! instructor decoders in [`crate::parser`] never fail: malformed input
//! degrades to empty or sentinel output instead.

use thiserror::Error;

/// Error type for SIGAA scraper operations
#[derive(Error, Debug)]
pub enum SigaaError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A required credential was blank or unset
    #[error("Missing credential: {0}")]
    MissingCredentials(&'static str),

    /// The portal rejected the login form
    #[error("Login failed: {0}")]
    LoginFailed(String),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Required HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,
}

/// Result type alias for SIGAA scraper operations
pub type Result<T> = std::result::Result<T, SigaaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_display() {
        let error = SigaaError::MissingCredentials("SIGAA_USERNAME");
        assert_eq!(error.to_string(), "Missing credential: SIGAA_USERNAME");
    }

    #[test]
    fn test_login_failed_display() {
        let error = SigaaError::LoginFailed("user or password rejected".to_string());
        assert_eq!(error.to_string(), "Login failed: user or password rejected");
    }

    #[test]
    fn test_parse_error_display() {
        let error = SigaaError::ParseError("missing element".to_string());
        assert_eq!(error.to_string(), "Failed to parse HTML: missing element");
    }

    #[test]
    fn test_element_not_found_display() {
        let error = SigaaError::ElementNotFound("table#lista-turmas".to_string());
        assert_eq!(error.to_string(), "Element not found: table#lista-turmas");
    }

    #[test]
    fn test_rate_limited_display() {
        let error = SigaaError::RateLimited;
        assert_eq!(error.to_string(), "Rate limited - too many requests");
    }
}
