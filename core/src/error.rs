//! Error types for the todo API client.
//!
//! # Design
//! A missing todo is not an error here: `parse_get_todo` returns `Ok(None)`
//! for a 404 so callers handle "not found" separately from failures. Every
//! other non-2xx response lands in `HttpError` with the raw status code and
//! body. Form validation never produces an `ApiError`; it lives in field
//! state.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `Transport`s.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned a status other than the expected one.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A todo id was not 24 hexadecimal characters.
    #[error("invalid todo id: {0:?}")]
    InvalidId(String),
}

impl ApiError {
    /// HTTP status to show the user. Failures that never reached the server
    /// report 0, the way browsers do.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::HttpError { status, .. } => *status,
            _ => 0,
        }
    }
}
