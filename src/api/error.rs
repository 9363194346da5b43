use std::fmt;

/// Errors that can occur while talking to the agent backend.
///
/// The UI never shows these; they are collapsed into fixed, localized texts at
/// the component boundary and only the log keeps the distinction.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure (DNS, connection refused, reset).
    Network(String),
    /// The backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The body was not JSON or lacked the expected field.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
