//! Tests for the HTTP request parser.

#[cfg(test)]
mod parser_tests {
    use std::collections::HashMap;
    use serde::Deserialize;

    use crate::parser::{HttpRequest, Method, HttpVersion, Error, parse_request, body_offset, declared_content_length};

    fn json_headers() -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /people HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/people");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert!(result.body.is_empty());
        assert!(result.params.is_empty());
    }

    #[test]
    fn test_missing_host_header() {
        let request = b"GET /people HTTP/1.1\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
    }

    #[test]
    fn test_http10_without_host() {
        let request = b"GET /people HTTP/1.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.version, HttpVersion::Http10);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_invalid_method() {
        let request = b"BREW /pot HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidMethod(ref m)) if m == "BREW"));
    }

    #[test]
    fn test_invalid_http_version() {
        let request = b"GET /people HTTP/9.9\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "HTTP/9.9"));
    }

    #[test]
    fn test_target_must_be_a_path() {
        let request = b"GET people HTTP/1.1\r\nHost: example.com\r\n\r\n";
        assert!(matches!(parse_request(request), Err(Error::InvalidPath)));
    }

    #[test]
    fn test_invalid_header_format() {
        let request = b"GET /people HTTP/1.1\r\nInvalidHeader\r\n\r\n";
        assert!(matches!(parse_request(request), Err(Error::InvalidHeaderFormat)));
    }

    #[test]
    fn test_empty_and_truncated_requests() {
        assert!(matches!(parse_request(b""), Err(Error::EmptyRequest)));
        assert!(matches!(parse_request(b"GET\r\n"), Err(Error::MalformedRequestLine(_))));
        assert!(matches!(
            parse_request(b"GET  HTTP/1.1\r\nHost: example.com\r\n\r\n"),
            Err(Error::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn test_malformed_utf8_in_head() {
        let request = b"GET /people HTTP/1.1\r\nHost: example.com\r\nX-Test: \xFF\xFF\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref s)) if s == "Invalid UTF-8"));
    }

    #[test]
    fn test_all_methods() {
        for method in Method::ALL {
            let raw = format!("{method} /people HTTP/1.1\r\nHost: example.com\r\n\r\n");
            let result = parse_request(raw.as_bytes()).unwrap();
            assert_eq!(result.method, method);
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn test_headers_are_trimmed_and_keep_colons() {
        let request = b"GET /people HTTP/1.1\r\nHost: example.com  \r\nX-Test:  a:b:c \r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("X-Test").unwrap(), "a:b:c");
    }

    #[test]
    fn test_mixed_line_endings() {
        let request = b"GET /people HTTP/1.1\r\nHost: example.com\nUser-Agent: test\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
    }

    #[test]
    fn test_query_string_is_split_from_path() {
        let request = b"GET /search?q=test&flag&empty= HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/search");
        assert_eq!(result.get_query_param("q").unwrap(), "test");
        assert_eq!(result.get_query_param("flag").unwrap(), "");
        assert!(result.has_query_param("empty"));
        assert!(!result.has_query_param("missing"));
    }

    #[test]
    fn test_body_follows_blank_line() {
        let request = b"POST /people HTTP/1.1\r\n\
            Host: example.com\r\n\
            Content-Type: application/json\r\n\
            \r\n\
            {\"name\":\"Ada\",\"age\":36}";

        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.path, "/people");
        assert_eq!(result.body_str(), "{\"name\":\"Ada\",\"age\":36}");
        assert!(result.is_json());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = HttpRequest::new(Method::GET, "/people", HttpVersion::Http11, json_headers());
        assert_eq!(request.get_header("host").unwrap(), "example.com");
        assert_eq!(request.get_header("HOST").unwrap(), "example.com");
        assert!(request.has_header("content-type"));
        assert!(!request.has_header("X-Test"));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NewPerson {
        name: String,
        age: u32,
    }

    #[test]
    fn test_json_body() {
        let body = r#"{"name":"Ada","age":36}"#;
        let request = HttpRequest::with_body(Method::POST, "/people", HttpVersion::Http11, json_headers(), body);
        let person: NewPerson = request.json().unwrap();
        assert_eq!(person, NewPerson { name: "Ada".to_string(), age: 36 });

        let mut text_headers = json_headers();
        text_headers.insert("Content-Type".to_string(), "text/plain".to_string());
        let request = HttpRequest::with_body(Method::POST, "/people", HttpVersion::Http11, text_headers, body);
        let result: Result<NewPerson, _> = request.json();
        assert!(matches!(result, Err(Error::MissingHeader(_))));

        let request = HttpRequest::with_body(Method::POST, "/people", HttpVersion::Http11, json_headers(), "{\"name\":}");
        let result: Result<NewPerson, _> = request.json();
        assert!(matches!(result, Err(Error::JsonError(_))));
    }

    #[test]
    fn test_http_version_display() {
        assert_eq!(HttpVersion::Http10.to_string(), "HTTP/1.0");
        assert_eq!(HttpVersion::Http11.to_string(), "HTTP/1.1");
        assert_eq!(HttpVersion::Http20.to_string(), "HTTP/2");
    }

    #[test]
    fn test_path_is_percent_decoded() {
        let request = b"GET /people/Ada%20Lovelace?note=a%20b HTTP/1.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/people/Ada Lovelace");
        // Query values are left as sent.
        assert_eq!(result.get_query_param("note").unwrap(), "a%20b");

        let result = parse_request(b"GET /caf%C3%A9 HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.path, "/caf\u{e9}");
    }

    #[test]
    fn test_path_escape_must_be_utf8() {
        let request = b"GET /people/%FF HTTP/1.0\r\n\r\n";
        assert!(matches!(parse_request(request), Err(Error::InvalidPath)));

        let built = HttpRequest::new(Method::GET, "/people/%FF", HttpVersion::Http10, HashMap::new());
        assert_eq!(built.path, "/people/\u{fffd}");
    }

    #[test]
    fn test_head_boundary_and_content_length() {
        let raw = b"POST /people HTTP/1.1\r\nHost: a\r\ncontent-length: 10\r\n\r\n{\"name\":1}";
        let offset = body_offset(raw).unwrap();
        assert_eq!(&raw[offset..], b"{\"name\":1}");
        assert_eq!(declared_content_length(&raw[..offset]), 10);

        assert_eq!(body_offset(b"GET / HTTP/1.0\nX: y\n\nrest"), Some(21));
        assert!(body_offset(b"GET / HTTP/1.1\r\nHost: a\r\n").is_none());
        assert_eq!(declared_content_length(b"GET / HTTP/1.0\r\n\r\n"), 0);
    }
}
