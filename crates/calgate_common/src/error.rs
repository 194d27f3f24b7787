// --- File: crates/calgate_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// Transport-level errors raised outside the success/error envelope.
///
/// Operation handlers report provider failures inside their response body;
/// only conditions that abort a request before or around an operation
/// (missing credentials, malformed input, unexpected failures) become a
/// `GatewayError` and thus a non-200 response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Client supplied input that cannot be interpreted
    #[error("{0}")]
    BadRequest(String),

    /// Missing, malformed or rejected bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// Anything else, including provider failures outside an envelope
    #[error("{0}")]
    Internal(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for GatewayError {
    fn status_code(&self) -> u16 {
        match self {
            GatewayError::BadRequest(_) => 400,
            GatewayError::Unauthorized(_) => 401,
            GatewayError::Internal(_) => 500,
        }
    }
}

impl GatewayError {
    /// The human-readable text placed in the `detail` field.
    pub fn detail(&self) -> &str {
        match self {
            GatewayError::BadRequest(msg)
            | GatewayError::Unauthorized(msg)
            | GatewayError::Internal(msg) => msg,
        }
    }
}

pub fn bad_request<T: fmt::Display>(message: T) -> GatewayError {
    GatewayError::BadRequest(message.to_string())
}

pub fn unauthorized<T: fmt::Display>(message: T) -> GatewayError {
    GatewayError::Unauthorized(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> GatewayError {
    GatewayError::Internal(message.to_string())
}
