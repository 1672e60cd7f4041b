//! Minimal raw-socket HTTP/1.1 POST sender.
//!
//! # Overview
//! Builds one HTTP/1.1 request by hand, computes its `Content-Length` from
//! the UTF-8 byte length of the body, writes it over a fresh TCP connection
//! and hands back whatever a single 4096-byte read returns.
//!
//! # Design
//! - `HttpRequest` is plain data; `to_bytes` is the only place the wire
//!   format is produced.
//! - `RequestSender` is stateless apart from `host`/`port`. One call, one
//!   connection, one read. No retries, no keep-alive, no timeouts.
//! - `parse` holds the server-side counterpart used by the mock server to
//!   pull method, path and body out of a raw request chunk.

pub mod client;
pub mod error;
pub mod http;
pub mod parse;

pub use client::{send, RequestSender, READ_BUFFER_SIZE};
pub use error::{ParseError, SendError};
pub use http::{HttpMethod, HttpRequest, ResponseBytes};
pub use parse::{parse_request, ParsedRequest};
