//! Hand-rolled HTTP/1.1 server on a bare tokio socket.
//!
//! One request per connection: read it, parse it with
//! `rawpost_core::parse_request`, write a response with an exact
//! `Content-Length`, close. Every parse error becomes a JSON 400 whose
//! `Message` is the error's `Display`.

use std::io;

use rawpost_core::{parse_request, HttpMethod, ParseError};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

use crate::echo::read_request;
use crate::{greeting, ErrorBody};

pub async fn run(listener: TcpListener) -> io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream).await {
                tracing::warn!(%peer, error = %err, "connection failed");
            }
        });
    }
}

async fn handle_connection(mut stream: TcpStream) -> io::Result<()> {
    let request = read_request(&mut stream).await?;
    let response = respond(&request)?;
    stream.write_all(&response).await?;
    stream.shutdown().await
}

/// Full response bytes for one raw request.
pub fn respond(raw: &[u8]) -> serde_json::Result<Vec<u8>> {
    match parse_request(raw) {
        Ok(req) => {
            tracing::info!(method = %req.method, path = %req.path, body_len = req.body.len(), "request");
            let body = (req.method == HttpMethod::Post).then_some(req.body.as_str());
            let text = greeting(req.method.as_str(), &req.path, body);
            Ok(response("200 OK", "text/plain; charset=utf-8", text.as_bytes()))
        }
        Err(err) => bad_request(&err),
    }
}

fn bad_request(err: &ParseError) -> serde_json::Result<Vec<u8>> {
    tracing::warn!(error = %err, "rejecting request");
    let body = serde_json::to_vec(&ErrorBody::bad_request(err.to_string()))?;
    Ok(response("400 Bad Request", "application/json", &body))
}

fn response(status: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
    let mut bytes = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n\r\n",
        body.len()
    )
    .into_bytes();
    bytes.extend_from_slice(body);
    bytes
}
