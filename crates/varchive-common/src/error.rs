//! Error types for the variation archive workspace
//!
//! Only cross-crate concerns live here: configuration and value parsing.
//! Request-level errors (routing, queries) belong to the server crate,
//! which owns their HTTP mapping.

use thiserror::Error;

/// Result type alias for varchive operations
pub type Result<T> = std::result::Result<T, VarchiveError>;

/// Shared error type for the variation archive workspace
#[derive(Error, Debug)]
pub enum VarchiveError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl VarchiveError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = VarchiveError::config("Server port must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Configuration error: Server port must be greater than 0"
        );
    }

    #[test]
    fn test_parse_error_message() {
        let err = VarchiveError::parse("Invalid log level: loud");
        assert_eq!(err.to_string(), "Parse error: Invalid log level: loud");
    }
}
