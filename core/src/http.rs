//! HTTP/1.1 request message and raw response bytes.
//!
//! # Design
//! `HttpRequest` describes the request as plain data and owns the one piece
//! of logic that has to be right: serializing it to wire bytes with a
//! `Content-Length` computed from the body, never supplied by the caller.
//! The serializer emits caller headers in the order given and appends
//! `Content-Length` last, so the usual `Host`, `Content-Type` input yields
//! `Host`, `Content-Type`, `Content-Length` on the wire.
//!
//! `ResponseBytes` is deliberately opaque: it is whatever one bounded read
//! returned and is never parsed.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::SendError;

const CRLF: &str = "\r\n";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            other => Err(other.to_string()),
        }
    }
}

/// An HTTP/1.1 request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A POST request carrying `body`. `headers` are emitted in order, followed
    /// by the computed `Content-Length`.
    pub fn post(path: &str, headers: &[(&str, &str)], body: &str) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body: Some(body.to_string()),
        }
    }

    /// Byte length of the UTF-8 encoded body, or `None` without a body.
    pub fn content_length(&self) -> Option<usize> {
        self.body.as_ref().map(|body| body.len())
    }

    /// Serialize to the exact bytes sent on the wire.
    ///
    /// Fails if the caller already supplied `Content-Length`, or if the path
    /// or any header would break the line structure of the message.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SendError> {
        self.validate()?;

        // Writing into a String cannot fail.
        let mut head = format!("{} {} HTTP/1.1{CRLF}", self.method, self.path);
        for (name, value) in &self.headers {
            let _ = write!(head, "{name}: {value}{CRLF}");
        }
        if let Some(len) = self.content_length() {
            let _ = write!(head, "Content-Length: {len}{CRLF}");
        }
        head.push_str(CRLF);

        let mut bytes = head.into_bytes();
        if let Some(body) = &self.body {
            bytes.extend_from_slice(body.as_bytes());
        }
        Ok(bytes)
    }

    fn validate(&self) -> Result<(), SendError> {
        if self.path.is_empty() || self.path.contains([' ', '\r', '\n']) {
            return Err(SendError::InvalidRequest(format!(
                "path {:?} must be non-empty and contain no spaces or line breaks",
                self.path
            )));
        }
        for (name, value) in &self.headers {
            if name.eq_ignore_ascii_case("content-length") {
                return Err(SendError::InvalidRequest(
                    "Content-Length is computed from the body and must not be supplied".to_string(),
                ));
            }
            if name.is_empty() || name.contains([':', '\r', '\n']) || value.contains(['\r', '\n']) {
                return Err(SendError::InvalidRequest(format!(
                    "header {name:?} is not a valid single-line header"
                )));
            }
        }
        Ok(())
    }
}

/// Raw bytes returned by a single bounded read. May be empty when the peer
/// closed the connection without answering; may be a prefix of a longer
/// response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBytes(Vec<u8>);

impl ResponseBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Lossy UTF-8 view, for printing.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl From<Vec<u8>> for ResponseBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}
