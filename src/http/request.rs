use std::fmt;

use thiserror::Error;

/// HTTP request methods the server knows how to name.
///
/// Which of them are actually served is decided by the
/// [`Dispatcher`](crate::http::dispatch::Dispatcher) built at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses a method token exactly as received.
    ///
    /// # Example
    ///
    /// ```
    /// # use todo_server::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_token("get"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true when responses to `method` must never carry body bytes.
pub fn suppresses_body(method: &str) -> bool {
    method == Method::HEAD.as_str()
}

/// A header value after parsing.
///
/// Values made only of ASCII digits are kept as numbers, everything else as
/// text. This applies to every header, not only `Content-Length`, so a
/// custom header such as `X-Ticket: 0042` comes back as `Number(42)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Text(String),
    Number(u64),
}

impl HeaderValue {
    /// Classifies an already trimmed raw value.
    ///
    /// Digit strings too large for `u64` stay textual.
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = raw.parse() {
                return HeaderValue::Number(number);
            }
        }
        HeaderValue::Text(raw.to_string())
    }

    pub fn as_number(&self) -> Option<u64> {
        match self {
            HeaderValue::Number(n) => Some(*n),
            HeaderValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(s) => Some(s),
            HeaderValue::Number(_) => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(s) => f.write_str(s),
            HeaderValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Text(value.to_string())
    }
}

impl From<u64> for HeaderValue {
    fn from(value: u64) -> Self {
        HeaderValue::Number(value)
    }
}

/// Request headers in arrival order.
///
/// Names are compared exactly as received. Inserting a name that is already
/// present replaces its value in place, so the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, HeaderValue)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<HeaderValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Why a request body could not be provided.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("request carries no Content-Length")]
    LengthRequired,

    #[error("invalid Content-Length {value:?}")]
    InvalidLength { value: String },

    #[error("body of {length} bytes exceeds the limit of {limit}")]
    TooLarge { length: u64, limit: u64 },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// The request line split into its three tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Method token as received (uppercase by convention)
    pub method: String,
    /// Raw request target, query component included
    pub target: String,
    /// Version token, guaranteed to start with `HTTP/`
    pub version: String,
}

/// A parsed HTTP request.
///
/// Lives for exactly one request lifecycle. The body is only present when
/// the request announced a numeric `Content-Length`.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub target: String,
    pub version: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(line: RequestLine, headers: Headers) -> Self {
        Self {
            method: line.method,
            target: line.target,
            version: line.version,
            headers,
            body: None,
        }
    }

    /// Retrieves a header value by its exact name.
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    /// The declared body length.
    ///
    /// `Ok(None)` when no length indicator is present. A textual value (for
    /// example `-1` or `ten`) is an error.
    pub fn content_length(&self) -> Result<Option<u64>, BodyError> {
        content_length(&self.headers)
    }

    /// The body bytes, read by the engine before dispatch.
    ///
    /// Fails with [`BodyError::LengthRequired`] when the client sent no
    /// length indicator.
    pub fn body(&self) -> Result<&[u8], BodyError> {
        self.body.as_deref().ok_or(BodyError::LengthRequired)
    }

    /// The path component of the target split on `/`, without empty
    /// segments and without the query component. No normalization happens:
    /// `..` and `.` stay ordinary segments.
    pub fn path_segments(&self) -> Vec<String> {
        path_segments(&self.target)
    }
}

pub(crate) fn content_length(headers: &Headers) -> Result<Option<u64>, BodyError> {
    let value = headers.get("Content-Length").or_else(|| {
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("Content-Length"))
            .map(|(_, value)| value)
    });

    match value {
        None => Ok(None),
        Some(HeaderValue::Number(n)) => Ok(Some(*n)),
        Some(HeaderValue::Text(value)) => Err(BodyError::InvalidLength {
            value: value.clone(),
        }),
    }
}

fn path_segments(target: &str) -> Vec<String> {
    raw_path(target)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The path exactly as the client sent it, without query or fragment. Dot
/// segments and backslashes are left alone.
fn raw_path(target: &str) -> &str {
    let target = target.split(['?', '#']).next().unwrap_or_default();
    if target.starts_with('/') {
        return target;
    }

    // absolute-form: `url` only vouches for the shape, the path is sliced
    // from the original text so it is never normalized
    match (url::Url::parse(target), target.split_once("://")) {
        (Ok(url), Some((_, rest))) if url.has_host() => {
            rest.find('/').map_or("", |at| &rest[at..])
        }
        _ => "",
    }
}
