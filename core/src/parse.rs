//! Server-side parsing of one raw request chunk.
//!
//! Extracts method, path and (for POST) the body. Only `GET` and `POST` are
//! accepted, paths must be absolute, and a POST body is exactly
//! `Content-Length` bytes taken from after the blank line. A POST without a
//! blank line is treated as having no body.

use crate::error::ParseError;
use crate::http::HttpMethod;

const HEAD_END: &[u8] = b"\r\n\r\n";

/// The parts of a request the server cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: String,
}

/// Offset of the `\r\n\r\n` separating head and body, if present.
pub fn find_head_end(raw: &[u8]) -> Option<usize> {
    raw.windows(HEAD_END.len()).position(|w| w == HEAD_END)
}

/// True once `raw` holds a full request head and, for POST, every body byte
/// announced by `Content-Length`. Malformed input counts as complete: more
/// bytes cannot fix it.
pub fn is_complete(raw: &[u8]) -> bool {
    find_head_end(raw).is_some() && !matches!(parse_request(raw), Err(e) if e.is_incomplete())
}

/// Extract method, path and body from a raw request.
pub fn parse_request(raw: &[u8]) -> Result<ParsedRequest, ParseError> {
    let head_end = find_head_end(raw);
    let head = std::str::from_utf8(&raw[..head_end.unwrap_or(raw.len())])
        .map_err(|_| ParseError::Malformed("request head is not valid UTF-8".to_string()))?;

    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut tokens = request_line.split(' ').filter(|t| !t.is_empty());
    let (method, path) = match (tokens.next(), tokens.next()) {
        (Some(method), Some(path)) => (method, path),
        _ => {
            return Err(ParseError::Malformed(
                "request line must contain a method and a path".to_string(),
            ))
        }
    };

    let method: HttpMethod = method.parse().map_err(ParseError::InvalidMethod)?;
    if !path.starts_with('/') {
        return Err(ParseError::InvalidPath(path.to_string()));
    }

    let body = match (method, head_end) {
        (HttpMethod::Post, Some(end)) => {
            let content_length = content_length(lines)?;
            let available = &raw[end + HEAD_END.len()..];
            if available.len() < content_length {
                return Err(ParseError::Incomplete {
                    expected: content_length,
                    available: available.len(),
                });
            }
            String::from_utf8(available[..content_length].to_vec())
                .map_err(|_| ParseError::Malformed("body is not valid UTF-8".to_string()))?
        }
        _ => String::new(),
    };

    Ok(ParsedRequest {
        method,
        path: path.to_string(),
        body,
    })
}

fn content_length<'a>(header_lines: impl Iterator<Item = &'a str>) -> Result<usize, ParseError> {
    for line in header_lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            let value = value.trim();
            return value
                .parse()
                .map_err(|_| ParseError::InvalidContentLength(value.to_string()));
        }
    }
    Err(ParseError::MissingContentLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpRequest;

    #[test]
    fn parses_serialized_post() {
        let body = "{\n  \"name\": \"Jane Doe\"\n}";
        let raw = HttpRequest::post(
            "/api/users",
            &[("Host", "example.com"), ("Content-Type", "application/json")],
            body,
        )
        .to_bytes()
        .unwrap();

        let parsed = parse_request(&raw).unwrap();
        assert_eq!(parsed.method, HttpMethod::Post);
        assert_eq!(parsed.path, "/api/users");
        assert_eq!(parsed.body, body);
    }

    #[test]
    fn get_has_no_body() {
        let parsed = parse_request(b"GET /health HTTP/1.1\r\nHost: x\r\n\r\nignored").unwrap();
        assert_eq!(parsed.method, HttpMethod::Get);
        assert_eq!(parsed.path, "/health");
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn post_without_blank_line_has_empty_body() {
        let parsed = parse_request(b"POST /api/users HTTP/1.1\r\nHost: x").unwrap();
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn body_is_truncated_to_content_length() {
        let raw = b"POST / HTTP/1.1\r\ncontent-length: 5\r\n\r\nhello world";
        assert_eq!(parse_request(raw).unwrap().body, "hello");
    }

    #[test]
    fn short_body_is_incomplete() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 55\r\n\r\n{\n";
        let err = parse_request(raw).unwrap_err();
        assert_eq!(err, ParseError::Incomplete { expected: 55, available: 2 });
        assert!(err.is_incomplete());
    }

    #[test]
    fn post_body_requires_content_length() {
        let raw = b"POST / HTTP/1.1\r\nHost: x\r\n\r\nbody";
        assert_eq!(parse_request(raw).unwrap_err(), ParseError::MissingContentLength);
    }

    #[test]
    fn non_numeric_content_length_is_rejected() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\nbody";
        assert_eq!(
            parse_request(raw).unwrap_err(),
            ParseError::InvalidContentLength("lots".to_string())
        );
    }

    #[test]
    fn unsupported_method_is_rejected() {
        let err = parse_request(b"PUT /x HTTP/1.1\r\n\r\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidMethod("PUT".to_string()));
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = parse_request(b"GET api/users HTTP/1.1\r\n\r\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidPath("api/users".to_string()));
    }

    #[test]
    fn request_line_needs_method_and_path() {
        assert!(matches!(parse_request(b"GET").unwrap_err(), ParseError::Malformed(_)));
        assert!(matches!(parse_request(b"").unwrap_err(), ParseError::Malformed(_)));
    }

    #[test]
    fn finds_head_end() {
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n\r\n"), Some(14));
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n"), None);
    }

    #[test]
    fn completeness_tracks_head_and_body() {
        assert!(!is_complete(b"POST / HTTP/1.1\r\nContent-Length: 4"));
        assert!(!is_complete(b"POST / HTTP/1.1\r\nContent-Length: 4\r\n\r\nab"));
        assert!(is_complete(b"POST / HTTP/1.1\r\nContent-Length: 4\r\n\r\nabcd"));
        assert!(is_complete(b"BREW /pot HTTP/1.1\r\n\r\n"));
    }
}
