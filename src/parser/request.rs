//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;
use crate::router::Params;

/// Represents an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The percent-decoded request path, without the query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
    /// Query parameters parsed from the request target
    pub query_params: HashMap<String, String>,
    /// Path parameters bound by the router for this request only
    pub params: Params,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    ///
    /// `target` is the request target as it appears on the request line; anything
    /// after the first `?` is split off into [`query_params`](Self::query_params)
    /// and the rest is percent-decoded into [`path`](Self::path). Escapes that
    /// do not decode to UTF-8 are replaced.
    pub fn new(method: Method, target: impl Into<String>, version: HttpVersion, headers: HashMap<String, String>) -> Self {
        let target = target.into();
        let (raw_path, query_params) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target.as_str(), HashMap::new()),
        };
        let path = percent_decode_str(raw_path).decode_utf8_lossy().into_owned();

        Self {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
            query_params,
            params: Params::new(),
        }
    }

    /// Create a new HTTP request with a body.
    pub fn with_body(
        method: Method,
        target: impl Into<String>,
        version: HttpVersion,
        headers: HashMap<String, String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        let mut request = Self::new(method, target, version, headers);
        request.body = body.into();
        request
    }

    /// Get a path parameter bound by the router.
    ///
    /// Values are the raw path segments; parsing them (for example into an
    /// integer id) is up to the handler.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Get a header value (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v))
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Parse the request body as JSON.
    ///
    /// Fails with [`Error::MissingHeader`] unless the request declares an
    /// `application/json` content type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    /// Check if a query parameter exists.
    pub fn has_query_param(&self, name: &str) -> bool {
        self.query_params.contains_key(name)
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// Offset of the first body byte, once the blank line ending the head has
/// arrived.
pub(crate) fn body_offset(input: &[u8]) -> Option<usize> {
    input.windows(2).enumerate().find_map(|(i, window)| {
        if window == b"\n\n" {
            Some(i + 2)
        } else if window == b"\n\r" && input.get(i + 2) == Some(&b'\n') {
            Some(i + 3)
        } else {
            None
        }
    })
}

/// The `Content-Length` declared in a request head, or 0.
pub(crate) fn declared_content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Split the raw request into its head and body at the first blank line.
fn split_head(input: &[u8]) -> (&[u8], &[u8]) {
    match body_offset(input) {
        Some(offset) => input.split_at(offset),
        None => (input, &[]),
    }
}

/// Parse an HTTP request from a byte slice.
///
/// Everything after the blank line that ends the header section is taken as
/// the body, unparsed.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let (head, body) = split_head(input);
    let head = std::str::from_utf8(head)
        .map_err(|_| Error::MalformedRequestLine("Invalid UTF-8".to_string()))?;

    let mut lines = head.lines();

    let request_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;

    let target = parts[1];
    let raw_path = target.split_once('?').map_or(target, |(path, _)| path);
    if !target.starts_with('/') || percent_decode_str(raw_path).decode_utf8().is_err() {
        return Err(Error::InvalidPath);
    }

    let version = HttpVersion::from_str(parts[2])?;

    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        let (name, value) = line.split_once(':').ok_or(Error::InvalidHeaderFormat)?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    if version.requires_host() && !headers.keys().any(|k| k.eq_ignore_ascii_case("Host")) {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    Ok(HttpRequest::with_body(method, target, version, headers, body))
}
