/// HTTP status codes known to the server.
///
/// Every code the engine or the REST layer can emit lives here, together
/// with its reason phrase and a short explanatory text used as the default
/// message of error documents. The table is immutable and shared by all
/// connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum StatusCode {
    Continue = 100,
    SwitchingProtocols = 101,

    Ok = 200,
    Created = 201,
    Accepted = 202,
    NonAuthoritativeInformation = 203,
    NoContent = 204,
    ResetContent = 205,
    PartialContent = 206,

    MultipleChoices = 300,
    MovedPermanently = 301,
    Found = 302,
    SeeOther = 303,
    NotModified = 304,
    UseProxy = 305,
    TemporaryRedirect = 307,

    BadRequest = 400,
    Unauthorized = 401,
    PaymentRequired = 402,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    NotAcceptable = 406,
    ProxyAuthenticationRequired = 407,
    RequestTimeout = 408,
    Conflict = 409,
    Gone = 410,
    LengthRequired = 411,
    PreconditionFailed = 412,
    RequestEntityTooLarge = 413,
    RequestUriTooLong = 414,
    UnsupportedMediaType = 415,
    RequestedRangeNotSatisfiable = 416,
    ExpectationFailed = 417,
    PreconditionRequired = 428,
    TooManyRequests = 429,
    RequestHeaderFieldsTooLarge = 431,

    InternalServerError = 500,
    NotImplemented = 501,
    BadGateway = 502,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
    HttpVersionNotSupported = 505,
    NetworkAuthenticationRequired = 511,
}

impl StatusCode {
    /// All registered codes in ascending order.
    pub const ALL: &'static [StatusCode] = &[
        StatusCode::Continue, StatusCode::SwitchingProtocols, StatusCode::Ok,
        StatusCode::Created, StatusCode::Accepted, StatusCode::NonAuthoritativeInformation,
        StatusCode::NoContent, StatusCode::ResetContent, StatusCode::PartialContent,
        StatusCode::MultipleChoices, StatusCode::MovedPermanently, StatusCode::Found,
        StatusCode::SeeOther, StatusCode::NotModified, StatusCode::UseProxy,
        StatusCode::TemporaryRedirect, StatusCode::BadRequest, StatusCode::Unauthorized,
        StatusCode::PaymentRequired, StatusCode::Forbidden, StatusCode::NotFound,
        StatusCode::MethodNotAllowed, StatusCode::NotAcceptable,
        StatusCode::ProxyAuthenticationRequired, StatusCode::RequestTimeout,
        StatusCode::Conflict, StatusCode::Gone, StatusCode::LengthRequired,
        StatusCode::PreconditionFailed, StatusCode::RequestEntityTooLarge,
        StatusCode::RequestUriTooLong, StatusCode::UnsupportedMediaType,
        StatusCode::RequestedRangeNotSatisfiable, StatusCode::ExpectationFailed,
        StatusCode::PreconditionRequired, StatusCode::TooManyRequests,
        StatusCode::RequestHeaderFieldsTooLarge, StatusCode::InternalServerError,
        StatusCode::NotImplemented, StatusCode::BadGateway, StatusCode::ServiceUnavailable,
        StatusCode::GatewayTimeout, StatusCode::HttpVersionNotSupported,
        StatusCode::NetworkAuthenticationRequired,
    ];

    /// Looks up a numeric code in the registry.
    ///
    /// # Example
    ///
    /// ```
    /// # use todo_server::http::status::StatusCode;
    /// assert_eq!(StatusCode::from_u16(404), Some(StatusCode::NotFound));
    /// assert_eq!(StatusCode::from_u16(299), None);
    /// ```
    pub fn from_u16(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_u16() == code)
    }

    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use todo_server::http::status::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Returns the standard reason phrase, used in the status line and as
    /// the title of error documents.
    pub fn reason_phrase(&self) -> &'static str {
        self.info().0
    }

    /// Returns the explanatory text used when an error carries no message.
    pub fn description(&self) -> &'static str {
        self.info().1
    }

    fn info(&self) -> (&'static str, &'static str) {
        match self {
            StatusCode::Continue => ("Continue", "Request received, please continue"),
            StatusCode::SwitchingProtocols => (
                "Switching Protocols",
                "Switching to new protocol; obey Upgrade header",
            ),
            StatusCode::Ok => ("OK", "Request fulfilled, document follows"),
            StatusCode::Created => ("Created", "Document created, URL follows"),
            StatusCode::Accepted => ("Accepted", "Request accepted, processing continues off-line"),
            StatusCode::NonAuthoritativeInformation => (
                "Non-Authoritative Information",
                "Request fulfilled from cache",
            ),
            StatusCode::NoContent => ("No Content", "Request fulfilled, nothing follows"),
            StatusCode::ResetContent => ("Reset Content", "Clear input form for further input."),
            StatusCode::PartialContent => ("Partial Content", "Partial content follows."),
            StatusCode::MultipleChoices => (
                "Multiple Choices",
                "Object has several resources -- see URI list",
            ),
            StatusCode::MovedPermanently => (
                "Moved Permanently",
                "Object moved permanently -- see URI list",
            ),
            StatusCode::Found => ("Found", "Object moved temporarily -- see URI list"),
            StatusCode::SeeOther => ("See Other", "Object moved -- see Method and URL list"),
            StatusCode::NotModified => (
                "Not Modified",
                "Document has not changed since given time",
            ),
            StatusCode::UseProxy => (
                "Use Proxy",
                "You must use proxy specified in Location to access this resource.",
            ),
            StatusCode::TemporaryRedirect => (
                "Temporary Redirect",
                "Object moved temporarily -- see URI list",
            ),
            StatusCode::BadRequest => ("Bad Request", "Bad request syntax or unsupported method"),
            StatusCode::Unauthorized => (
                "Unauthorized",
                "No permission -- see authorization schemes",
            ),
            StatusCode::PaymentRequired => (
                "Payment Required",
                "No payment -- see charging schemes",
            ),
            StatusCode::Forbidden => (
                "Forbidden",
                "Request forbidden -- authorization will not help",
            ),
            StatusCode::NotFound => ("Not Found", "Nothing matches the given URI"),
            StatusCode::MethodNotAllowed => (
                "Method Not Allowed",
                "Specified method is invalid for this resource.",
            ),
            StatusCode::NotAcceptable => (
                "Not Acceptable",
                "URI not available in preferred format.",
            ),
            StatusCode::ProxyAuthenticationRequired => (
                "Proxy Authentication Required",
                "You must authenticate with this proxy before proceeding.",
            ),
            StatusCode::RequestTimeout => (
                "Request Timeout",
                "Request timed out; try again later.",
            ),
            StatusCode::Conflict => ("Conflict", "Request conflict."),
            StatusCode::Gone => ("Gone", "URI no longer exists and has been permanently removed."),
            StatusCode::LengthRequired => (
                "Length Required",
                "Client must specify Content-Length.",
            ),
            StatusCode::PreconditionFailed => (
                "Precondition Failed",
                "Precondition in headers is false.",
            ),
            StatusCode::RequestEntityTooLarge => (
                "Request Entity Too Large",
                "Entity is too large.",
            ),
            StatusCode::RequestUriTooLong => ("Request-URI Too Long", "URI is too long."),
            StatusCode::UnsupportedMediaType => (
                "Unsupported Media Type",
                "Entity body in unsupported format.",
            ),
            StatusCode::RequestedRangeNotSatisfiable => (
                "Requested Range Not Satisfiable",
                "Cannot satisfy request range.",
            ),
            StatusCode::ExpectationFailed => (
                "Expectation Failed",
                "Expect condition could not be satisfied.",
            ),
            StatusCode::PreconditionRequired => (
                "Precondition Required",
                "The origin server requires the request to be conditional.",
            ),
            StatusCode::TooManyRequests => (
                "Too Many Requests",
                "The user has sent too many requests in a given amount of time (\"rate limiting\").",
            ),
            StatusCode::RequestHeaderFieldsTooLarge => (
                "Request Header Fields Too Large",
                "The server is unwilling to process the request because its header fields are too large.",
            ),
            StatusCode::InternalServerError => (
                "Internal Server Error",
                "Server got itself in trouble",
            ),
            StatusCode::NotImplemented => (
                "Not Implemented",
                "Server does not support this operation",
            ),
            StatusCode::BadGateway => (
                "Bad Gateway",
                "Invalid responses from another server/proxy.",
            ),
            StatusCode::ServiceUnavailable => (
                "Service Unavailable",
                "The server cannot process the request due to a high load",
            ),
            StatusCode::GatewayTimeout => (
                "Gateway Timeout",
                "The gateway server did not receive a timely response",
            ),
            StatusCode::HttpVersionNotSupported => (
                "HTTP Version Not Supported",
                "Cannot fulfill request.",
            ),
            StatusCode::NetworkAuthenticationRequired => (
                "Network Authentication Required",
                "The client needs to authenticate to gain network access.",
            ),
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
