use todo_server::http::request::{
    BodyError, HeaderValue, Headers, Method, Request, RequestLine, suppresses_body,
};

fn request(method: &str, target: &str, headers: Headers) -> Request {
    Request::new(
        RequestLine {
            method: method.to_string(),
            target: target.to_string(),
            version: "HTTP/1.1".to_string(),
        },
        headers,
    )
}

#[test]
fn test_request_header_retrieval() {
    let mut headers = Headers::new();
    headers.insert("Host", "example.com");
    headers.insert("Content-Type", "application/json");

    let req = request("GET", "/", headers);

    assert_eq!(req.header("Host"), Some(&HeaderValue::from("example.com")));
    assert_eq!(req.header("host"), None);
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_content_length_parsing() {
    let mut headers = Headers::new();
    headers.insert("Content-Length", 42u64);

    let req = request("POST", "/todo", headers);

    assert_eq!(req.content_length().unwrap(), Some(42));
}

#[test]
fn test_request_content_length_any_case() {
    let mut headers = Headers::new();
    headers.insert("content-length", HeaderValue::parse("7"));

    let req = request("POST", "/todo", headers);

    assert_eq!(req.content_length().unwrap(), Some(7));
}

#[test]
fn test_request_content_length_missing() {
    let req = request("GET", "/", Headers::new());

    assert_eq!(req.content_length().unwrap(), None);
}

#[test]
fn test_request_content_length_invalid() {
    let mut headers = Headers::new();
    headers.insert("Content-Length", "not-a-number");

    let req = request("POST", "/todo", headers);

    assert!(matches!(
        req.content_length(),
        Err(BodyError::InvalidLength { .. })
    ));
}

#[test]
fn test_body_requires_length_indicator() {
    let req = request("POST", "/todo", Headers::new());

    assert!(matches!(req.body(), Err(BodyError::LengthRequired)));
}

#[test]
fn test_body_is_returned_when_read() {
    let mut req = request("POST", "/todo", Headers::new());
    req.body = Some(b"{}".to_vec());

    assert_eq!(req.body().unwrap(), b"{}");
}

#[test]
fn test_path_segments() {
    let req = request("GET", "/todo/12?fields=title", Headers::new());

    assert_eq!(req.path_segments(), vec!["todo", "12"]);
}

#[test]
fn test_path_segments_are_not_normalized() {
    let segments = |target: &str| request("GET", target, Headers::new()).path_segments();

    assert_eq!(segments("/x/../todo/1"), vec!["x", "..", "todo", "1"]);
    assert_eq!(segments("/todo/1/.."), vec!["todo", "1", ".."]);
    assert_eq!(segments("/./todo"), vec![".", "todo"]);
    assert_eq!(segments("/todo\\1"), vec!["todo\\1"]);
    assert_eq!(segments("/todo/\u{e9}"), vec!["todo", "\u{e9}"]);
    assert_eq!(segments("/todo/%41"), vec!["todo", "%41"]);
}

#[test]
fn test_header_value_classification() {
    assert_eq!(HeaderValue::parse("123"), HeaderValue::Number(123));
    assert_eq!(HeaderValue::parse(""), HeaderValue::Text(String::new()));
    assert_eq!(HeaderValue::parse("12a"), HeaderValue::Text("12a".to_string()));
    assert_eq!(HeaderValue::parse("+5"), HeaderValue::Text("+5".to_string()));
    // beyond u64
    let huge = "99999999999999999999999";
    assert_eq!(HeaderValue::parse(huge), HeaderValue::Text(huge.to_string()));
}

#[test]
fn test_header_value_display() {
    assert_eq!(HeaderValue::Number(7).to_string(), "7");
    assert_eq!(HeaderValue::from("close").to_string(), "close");
}

#[test]
fn test_method_tokens() {
    let methods = vec![
        ("GET", Method::GET),
        ("HEAD", Method::HEAD),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (token, expected) in methods {
        assert_eq!(Method::from_token(token), Some(expected));
        assert_eq!(expected.as_str(), token);
    }
    assert_eq!(Method::from_token("Get"), None);
}

#[test]
fn test_only_head_suppresses_body() {
    assert!(suppresses_body("HEAD"));
    assert!(!suppresses_body("GET"));
    assert!(!suppresses_body("head"));
}
