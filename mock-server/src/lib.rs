//! Local HTTP servers for exercising the raw sender.
//!
//! `raw::run` is the hand-rolled server: it reads one request off the
//! socket, runs it through `rawpost_core::parse_request` and answers with a
//! plain-text greeting that repeats the method, path and (for POST) body, or
//! a JSON 400 carrying the parse error. `app()` serves the same greeting
//! through axum. `echo::run` writes each request back byte for byte.

pub mod echo;
pub mod raw;

use axum::{
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Body of every 400 response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: "Bad request".to_string(),
            message: message.into(),
        }
    }
}

/// Plain-text greeting; `body` is reported only when present.
pub fn greeting(method: &str, path: &str, body: Option<&str>) -> String {
    let mut text = format!(
        "Hello from my custom http server!\r\nRequest method: {method}\r\nRequest path: {path}\r\n"
    );
    if let Some(body) = body {
        text.push_str(&format!("Request body: {body}\n"));
    }
    text
}

pub fn app() -> Router {
    Router::new().fallback(greet)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn greet(method: Method, uri: Uri, body: String) -> Response {
    if method != Method::GET && method != Method::POST {
        tracing::warn!(%method, path = uri.path(), "rejecting request");
        let err = ErrorBody::bad_request(format!("invalid method: {method} (allowed: GET, POST)"));
        return (StatusCode::BAD_REQUEST, Json(err)).into_response();
    }

    tracing::info!(%method, path = uri.path(), body_len = body.len(), "request");
    let body = (method == Method::POST).then_some(body.as_str());
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        greeting(method.as_str(), uri.path(), body),
    )
        .into_response()
}
