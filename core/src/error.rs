//! Error types for request sending and request parsing.
//!
//! # Design
//! `SendError` separates the three points where a round-trip can fail:
//! establishing the connection, writing the request and the single read.
//! A short or empty read is never an error; it is returned to the caller as
//! (possibly empty) `ResponseBytes`.

use std::io;

use thiserror::Error;

/// Errors returned by `RequestSender::send`.
#[derive(Debug, Error)]
pub enum SendError {
    /// The request could not be built: bad port, a caller-supplied
    /// `Content-Length`, or a header containing CR/LF.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The TCP connection could not be established (refused, unreachable,
    /// DNS failure).
    #[error("failed to connect to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The request bytes were not fully written.
    #[error("failed to transmit request: {0}")]
    Transmission(#[source] io::Error),

    /// The single bounded read failed outright.
    #[error("failed to receive response: {0}")]
    Receive(#[source] io::Error),
}

/// Errors returned by `parse_request`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("invalid method: {0} (allowed: GET, POST)")]
    InvalidMethod(String),

    #[error("invalid path: {0} (must start with /)")]
    InvalidPath(String),

    #[error("malformed request: must contain a content length for the body")]
    MissingContentLength,

    #[error("malformed request: invalid content length {0:?}")]
    InvalidContentLength(String),

    /// Fewer body bytes are present than `Content-Length` announced.
    #[error("incomplete body: expected {expected} bytes, got {available}")]
    Incomplete { expected: usize, available: usize },
}

impl ParseError {
    /// True when more bytes from the stream could still turn this into a
    /// complete request.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseError::Incomplete { .. })
    }
}
