//! Error types for the Drive Folders client.
//!
//! # Design
//! Transport failures (`Transport`, `Timeout`) are kept apart from
//! responses the server did send (`NotFound`, `HttpError`, `Rejected`) and
//! from bodies that could not be understood (`Deserialization`,
//! `MissingField`). The lifecycle runner reports all of them without
//! aborting the run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The connection could not be established or broke mid-exchange.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server returned 404: the folder does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status the operation does not accept.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The vendor envelope reported `success: false`.
    #[error("request rejected by server: {}", .errors.join("; "))]
    Rejected { errors: Vec<String> },

    /// The response body was not the JSON shape the operation expects.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The response parsed but lacks a field the client depends on.
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status carried by the error, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }
}
