use std::fmt::Display;
use std::time::SystemTime;

use bytes::{BufMut, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::status::StatusCode;

pub const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("header written before the status line")]
    StatusNotWritten,

    #[error("headers were already sent")]
    HeadersAlreadySent,

    #[error("body written before the headers were sent")]
    HeadersNotSent,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Nothing buffered, ready for a status line
    Idle,
    /// Status line buffered, headers may follow
    Head,
    /// Head flushed, only body bytes may follow
    Body,
}

/// Current time in the `Date` header format, e.g.
/// `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn http_date() -> String {
    httpdate::fmt_http_date(SystemTime::now())
}

/// Staged writer for one response.
///
/// The status line and headers accumulate in memory and reach the stream as
/// a single write in [`end_headers`](Self::end_headers). Body bytes are only
/// accepted afterwards and are silently dropped when the request method
/// forbids a response body.
pub struct ResponseWriter<'a, W> {
    stream: &'a mut W,
    buffer: BytesMut,
    stage: Stage,
    suppress_body: bool,
}

impl<'a, W> ResponseWriter<'a, W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(stream: &'a mut W, suppress_body: bool) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(512),
            stage: Stage::Idle,
            suppress_body,
        }
    }

    /// Buffers `HTTP/1.1 <code> <reason>`.
    ///
    /// An empty or missing `reason` falls back to the registry phrase. Control
    /// characters in a custom reason are replaced by spaces so it cannot
    /// break the framing.
    pub fn write_status(
        &mut self,
        status: StatusCode,
        reason: Option<&str>,
    ) -> Result<(), WriteError> {
        if self.stage == Stage::Head {
            return Err(WriteError::HeadersAlreadySent);
        }

        let reason = match reason {
            Some(reason) if !reason.is_empty() => sanitize(reason),
            _ => status.reason_phrase().to_string(),
        };

        self.buffer.clear();
        self.put_line(&format!("{} {} {}", HTTP_VERSION, status.as_u16(), reason));
        self.stage = Stage::Head;
        Ok(())
    }

    /// Buffers one `name: value` line.
    pub fn write_header(&mut self, name: &str, value: impl Display) -> Result<(), WriteError> {
        match self.stage {
            Stage::Idle => Err(WriteError::StatusNotWritten),
            Stage::Body => Err(WriteError::HeadersAlreadySent),
            Stage::Head => {
                self.put_line(&format!("{name}: {value}"));
                Ok(())
            }
        }
    }

    /// Sends status line, headers and the blank terminator as one write.
    pub async fn end_headers(&mut self) -> Result<(), WriteError> {
        match self.stage {
            Stage::Idle => return Err(WriteError::StatusNotWritten),
            Stage::Body => return Err(WriteError::HeadersAlreadySent),
            Stage::Head => {}
        }

        self.buffer.put_slice(b"\r\n");
        let head = self.buffer.split().freeze();
        self.stage = Stage::Body;

        self.stream.write_all(&head).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Writes body bytes after the head has been sent.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<(), WriteError> {
        if self.stage != Stage::Body {
            return Err(WriteError::HeadersNotSent);
        }
        if self.suppress_body || body.is_empty() {
            return Ok(());
        }

        self.stream.write_all(body).await?;
        self.stream.flush().await?;
        Ok(())
    }

    fn put_line(&mut self, line: &str) {
        // header text is ISO-8859-1 on the wire; anything wider becomes '?'
        self.buffer.extend(
            line.chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?')),
        );
        self.buffer.put_slice(b"\r\n");
    }
}

fn sanitize(reason: &str) -> String {
    reason
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
