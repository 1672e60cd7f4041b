//! Blocking one-shot sender: connect, write, read once, close.
//!
//! # Design
//! `RequestSender` holds only the target host and port and carries no state
//! between calls. Every `send` opens its own `TcpStream`, writes the whole
//! serialized request, performs a single read into a fixed buffer and drops
//! the stream, which closes it on every exit path.
//!
//! No connect, write or read timeout is set; a peer that accepts but never
//! answers blocks the caller until the OS gives up.

use std::io::{Read, Write};
use std::net::TcpStream;

use crate::error::SendError;
use crate::http::{HttpRequest, ResponseBytes};

/// Size of the buffer used for the single read.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Synchronous sender bound to one `host:port`.
#[derive(Debug, Clone)]
pub struct RequestSender {
    host: String,
    port: u16,
}

impl RequestSender {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// POST `body` to `path` with `headers`, appending the computed
    /// `Content-Length`.
    pub fn send(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<ResponseBytes, SendError> {
        self.send_request(&HttpRequest::post(path, headers, body))
    }

    /// Transmit an already built request and return the first chunk of the
    /// response.
    pub fn send_request(&self, request: &HttpRequest) -> Result<ResponseBytes, SendError> {
        if self.port == 0 {
            return Err(SendError::InvalidRequest(
                "port must be in 1..=65535".to_string(),
            ));
        }
        let message = request.to_bytes()?;
        let addr = format!("{}:{}", self.host, self.port);

        tracing::debug!(%addr, "connecting");
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .map_err(|source| SendError::Connection {
                addr: addr.clone(),
                source,
            })?;

        stream.write_all(&message).map_err(SendError::Transmission)?;
        stream.flush().map_err(SendError::Transmission)?;
        tracing::debug!(%addr, bytes = message.len(), "request sent");

        let mut buf = [0u8; READ_BUFFER_SIZE];
        let n = stream.read(&mut buf).map_err(SendError::Receive)?;
        if n == 0 {
            tracing::debug!(%addr, "peer closed without sending data");
        } else {
            tracing::debug!(%addr, bytes = n, "response chunk received");
        }

        Ok(ResponseBytes::from(buf[..n].to_vec()))
    }
}

/// One-call form: build the POST, send it to `host:port`, return the first
/// response chunk.
pub fn send(
    host: &str,
    port: u16,
    path: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> Result<ResponseBytes, SendError> {
    RequestSender::new(host, port).send(path, headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_zero_is_rejected_before_connecting() {
        let err = send("127.0.0.1", 0, "/", &[], "").unwrap_err();
        assert!(matches!(err, SendError::InvalidRequest(_)));
    }

    #[test]
    fn invalid_request_is_rejected_before_connecting() {
        // Nothing listens here; the request error must win over a connect error.
        let sender = RequestSender::new("127.0.0.1", 9);
        let err = sender
            .send("/", &[("Content-Length", "3")], "abc")
            .unwrap_err();
        assert!(matches!(err, SendError::InvalidRequest(_)));
    }

    #[test]
    fn unresolvable_host_is_a_connection_error() {
        let err = send("nonexistent.invalid", 8000, "/", &[], "").unwrap_err();
        assert!(matches!(err, SendError::Connection { .. }));
    }

    #[test]
    fn sender_keeps_its_target() {
        let sender = RequestSender::new("localhost", 8000);
        assert_eq!(sender.host(), "localhost");
        assert_eq!(sender.port(), 8000);
    }
}
