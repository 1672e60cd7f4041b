//! Raw TCP echo server.
//!
//! Reads one complete HTTP request per connection and writes the exact bytes
//! back, so a client can compare what it sent with what arrived.

use std::io;

use rawpost_core::parse::is_complete;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const CHUNK_SIZE: usize = 4096;

/// Requests larger than this are echoed as far as they were read.
pub const MAX_REQUEST_SIZE: usize = 64 * 1024;

pub async fn run(listener: TcpListener) -> io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(err) = echo_connection(stream).await {
                tracing::warn!(%peer, error = %err, "echo failed");
            }
        });
    }
}

async fn echo_connection(mut stream: TcpStream) -> io::Result<()> {
    let request = read_request(&mut stream).await?;
    tracing::debug!(bytes = request.len(), "echoing request");
    stream.write_all(&request).await?;
    stream.shutdown().await
}

/// Read until the buffer holds a complete request, the peer closes, or
/// `MAX_REQUEST_SIZE` is reached.
pub async fn read_request<R: AsyncRead + Unpin>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.len() >= MAX_REQUEST_SIZE || is_complete(&buf) {
            break;
        }
    }
    Ok(buf)
}
