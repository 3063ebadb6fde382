//! AeroAPI client error types.

use std::fmt;

/// Errors from the AeroAPI HTTP client and pagination loop.
#[derive(Debug)]
pub enum AeroError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Upstream { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,
}

impl fmt::Display for AeroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AeroError::Http(e) => write!(f, "HTTP error: {e}"),
            AeroError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            AeroError::Upstream { status, message } => {
                write!(f, "upstream error {status}: {message}")
            }
            AeroError::RateLimited => write!(f, "rate limited by AeroAPI"),
            AeroError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for AeroError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AeroError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AeroError {
    fn from(err: reqwest::Error) -> Self {
        AeroError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AeroError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized (invalid API key)");

        let err = AeroError::Upstream {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "upstream error 502: Bad Gateway");

        let err = AeroError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));
    }
}
