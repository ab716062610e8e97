//! Error types for the aaio library

use thiserror::Error;

/// Result type alias for aaio operations
pub type Result<T> = std::result::Result<T, AaioError>;

/// Main error type for aaio operations
#[derive(Error, Debug)]
pub enum AaioError {
    /// A required credential or setting is missing
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An inbound payload is incomplete or malformed
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The API answered with an error envelope
    #[error("AAIO returned code {} with \"{}\"", display_code(.code), .message.as_deref().unwrap_or_default())]
    BadRequest {
        code: Option<i64>,
        message: Option<String>,
    },

    /// The API answered with something that is not a response envelope
    #[error("Unexpected response (status {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

fn display_code(code: &Option<i64>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

impl AaioError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an error from a vendor error envelope
    pub fn bad_request(code: Option<i64>, message: Option<String>) -> Self {
        Self::BadRequest { code, message }
    }

    /// Create an unexpected response error
    pub fn unexpected_response(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            status,
            body: body.into(),
        }
    }

    /// Whether the error was reported by the API itself rather than the transport
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::BadRequest { .. })
    }
}
