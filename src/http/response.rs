use serde::Serialize;

use crate::http::status::StatusCode;

/// A successful response computed by a resource handler.
///
/// Framing headers (`Server`, `Date`, `Content-Length`) are added by the
/// connection when the response is sent, never stored here.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Extra headers in emission order
    pub headers: Vec<(String, String)>,
    /// Response body, if any
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Created)
///     .json(&task)?
///     .build();
/// ```
#[derive(Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the body and sets a JSON content type.
    pub fn json<T: Serialize>(self, value: &T) -> serde_json::Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response with a plain text body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/html;charset=utf-8")
            .body(body)
            .build()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("Content-Type"))
            .map(|(_, v)| v.as_str())
    }
}

/// What a resource handler hands back to the connection.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Send this response as is
    Content(Response),
    /// Send a standard error document
    Error {
        status: StatusCode,
        message: Option<String>,
    },
}

impl Reply {
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Reply::Error {
            status,
            message: Some(message.into()),
        }
    }

    /// An error document with the registry's default message.
    pub fn status(status: StatusCode) -> Self {
        Reply::Error {
            status,
            message: None,
        }
    }

    /// A JSON response, or a 500 when `value` cannot be serialized.
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match ResponseBuilder::new(status).json(value) {
            Ok(builder) => Reply::Content(builder.build()),
            Err(e) => Reply::error(
                StatusCode::InternalServerError,
                format!("Failed to encode response: {e}"),
            ),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Reply::Content(response) => response.status,
            Reply::Error { status, .. } => *status,
        }
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Reply::Content(response)
    }
}
