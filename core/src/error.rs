//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the todo
//! does not exist" from "the server returned an unexpected status." All other
//! non-2xx responses land in `HttpError` with the raw status code and body.
//! `UnexpectedShape` covers a 2xx body that is valid JSON of the wrong kind,
//! such as an object where the todo list was expected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("unexpected response shape: expected {expected}")]
    UnexpectedShape { expected: &'static str },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}
