use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt};

use crate::http::request::{self, BodyError, HeaderValue, Headers, Request, RequestLine};

/// Longest accepted request line or header line, terminator included.
pub const MAX_LINE_BYTES: usize = 8192;

/// Most header fields accepted in one request.
pub const MAX_HEADERS: usize = 100;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Bad request syntax {line}")]
    BadRequestSyntax { line: String },

    #[error("Bad request version {version}")]
    BadRequestVersion {
        /// Method token, kept so the error response can honour HEAD
        method: String,
        version: String,
    },

    #[error("Malformed header line {line}")]
    MalformedHeaderLine { line: String },

    #[error("Line longer than {limit} bytes")]
    LineTooLong { limit: usize, request_line: bool },

    #[error("More than {limit} header fields")]
    TooManyHeaders { limit: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Reads the request line.
///
/// Returns `Ok(None)` when the peer sent nothing or a blank line: there is
/// no request to answer.
pub async fn read_request_line<R>(reader: &mut R) -> Result<Option<RequestLine>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let line = read_line(reader, true).await?;
    if line.is_empty() {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let [method, target, version] = words.as_slice() else {
        return Err(ParseError::BadRequestSyntax { line: line.clone() });
    };

    if !version.starts_with("HTTP/") {
        return Err(ParseError::BadRequestVersion {
            method: method.to_string(),
            version: version.to_string(),
        });
    }

    Ok(Some(RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    }))
}

/// Reads header lines up to and including the blank terminator.
///
/// A line without a colon aborts parsing; no partial map is returned. End of
/// stream before the terminator ends the block like a blank line would.
pub async fn read_headers<R>(reader: &mut R) -> Result<Headers, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut headers = Headers::new();
    let mut lines = 0;

    loop {
        let line = read_line(reader, false).await?;
        if line.is_empty() {
            return Ok(headers);
        }

        lines += 1;
        if lines > MAX_HEADERS {
            return Err(ParseError::TooManyHeaders { limit: MAX_HEADERS });
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(ParseError::MalformedHeaderLine { line });
        };

        headers.insert(name.trim(), HeaderValue::parse(value.trim()));
    }
}

/// Reads the request line and the header block.
pub async fn parse_request<R>(reader: &mut R) -> Result<Option<Request>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let Some(line) = read_request_line(reader).await? else {
        return Ok(None);
    };
    let headers = read_headers(reader).await?;
    Ok(Some(Request::new(line, headers)))
}

/// Reads exactly as many body bytes as the headers announce.
///
/// `Ok(None)` when there is no length indicator; the request then simply
/// has no body.
pub async fn read_body<R>(
    reader: &mut R,
    headers: &Headers,
    limit: u64,
) -> Result<Option<Vec<u8>>, BodyError>
where
    R: AsyncRead + Unpin,
{
    let Some(length) = request::content_length(headers)? else {
        return Ok(None);
    };
    if length > limit {
        return Err(BodyError::TooLarge { length, limit });
    }

    // bounded by `limit` above
    let mut body = vec![0u8; length as usize];
    reader.read_exact(&mut body).await?;
    Ok(Some(body))
}

/// Reads one line and decodes it byte-for-byte (ISO-8859-1), trimmed.
async fn read_line<R>(reader: &mut R, request_line: bool) -> Result<String, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut limited = (&mut *reader).take(MAX_LINE_BYTES as u64);
    limited.read_until(b'\n', &mut buf).await?;

    // a full buffer without the terminator means the line goes on
    if buf.len() == MAX_LINE_BYTES && !buf.ends_with(b"\n") {
        return Err(ParseError::LineTooLong {
            limit: MAX_LINE_BYTES,
            request_line,
        });
    }

    let line: String = buf.iter().map(|&b| char::from(b)).collect();
    Ok(line.trim().to_string())
}
