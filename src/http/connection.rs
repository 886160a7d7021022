use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::{error::Elapsed, timeout};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::http::dispatch::Dispatcher;
use crate::http::error_page::{self, ERROR_CONTENT_TYPE};
use crate::http::parser::{self, ParseError};
use crate::http::request::{self, BodyError, Request, RequestLine};
use crate::http::response::{Reply, Response};
use crate::http::status::StatusCode;
use crate::http::writer::{ResponseWriter, http_date};

/// Per-connection limits and identity, derived from [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub server_name: String,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
    pub max_body_bytes: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for ConnectionSettings {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            server_name: cfg.server_name.clone(),
            read_timeout: cfg.read_timeout_secs.map(Duration::from_secs),
            write_timeout: cfg.write_timeout_secs.map(Duration::from_secs),
            max_body_bytes: cfg.max_body_bytes,
        }
    }
}

pub enum ConnectionState {
    AwaitingRequestLine,
    AwaitingHeaders(RequestLine),
    Dispatched(Request),
    ResponseSent,
    Closed,
}

/// Serves exactly one request on an accepted stream.
pub struct Connection<S, H> {
    stream: BufReader<S>,
    dispatcher: Arc<Dispatcher<H>>,
    settings: ConnectionSettings,
    state: ConnectionState,
    /// Method of the current request, once known
    method: Option<String>,
}

impl<S, H> Connection<S, H>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, dispatcher: Arc<Dispatcher<H>>, settings: ConnectionSettings) -> Self {
        Self {
            stream: BufReader::new(stream),
            dispatcher,
            settings,
            state: ConnectionState::AwaitingRequestLine,
            method: None,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitingRequestLine => {
                    let read_timeout = self.settings.read_timeout;
                    match deadline(read_timeout, parser::read_request_line(&mut self.stream)).await
                    {
                        Err(_) => self.timed_out("request line"),
                        Ok(Ok(None)) => ConnectionState::Closed,
                        Ok(Ok(Some(line))) => {
                            info!(
                                method = %line.method,
                                target = %line.target,
                                version = %line.version,
                                "Request"
                            );
                            self.method = Some(line.method.clone());
                            ConnectionState::AwaitingHeaders(line)
                        }
                        Ok(Err(e)) => self.reject(e).await?,
                    }
                }

                ConnectionState::AwaitingHeaders(line) => {
                    let read_timeout = self.settings.read_timeout;
                    match deadline(read_timeout, parser::read_headers(&mut self.stream)).await {
                        Err(_) => self.timed_out("headers"),
                        Ok(Ok(headers)) => ConnectionState::Dispatched(Request::new(line, headers)),
                        Ok(Err(e)) => self.reject(e).await?,
                    }
                }

                ConnectionState::Dispatched(request) => self.dispatch(request).await?,

                ConnectionState::ResponseSent => ConnectionState::Closed,

                ConnectionState::Closed => break,
            };
        }

        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown failed");
        }
        Ok(())
    }

    async fn dispatch(&mut self, mut request: Request) -> anyhow::Result<ConnectionState> {
        let Some(operation) = self.dispatcher.lookup(&request.method) else {
            let message = format!("Unsupported method {}", request.method);
            self.respond_error(StatusCode::NotImplemented, Some(&message)).await?;
            return Ok(ConnectionState::ResponseSent);
        };

        let read_timeout = self.settings.read_timeout;
        let max_body = self.settings.max_body_bytes;
        let body = deadline(
            read_timeout,
            parser::read_body(&mut self.stream, &request.headers, max_body),
        )
        .await;

        match body {
            Err(_) => return Ok(self.timed_out("body")),
            Ok(Ok(body)) => request.body = body,
            Ok(Err(BodyError::Io { source })) => return Err(source.into()),
            Ok(Err(e)) => {
                let status = match e {
                    BodyError::TooLarge { .. } => StatusCode::RequestEntityTooLarge,
                    BodyError::LengthRequired => StatusCode::LengthRequired,
                    _ => StatusCode::BadRequest,
                };
                self.respond_error(status, Some(&e.to_string())).await?;
                return Ok(ConnectionState::ResponseSent);
            }
        }

        let reply = operation(self.dispatcher.handler(), &request);
        debug!(status = reply.status_code().as_u16(), "Operation finished");

        match reply {
            Reply::Content(response) => {
                let write_timeout = self.settings.write_timeout;
                deadline(write_timeout, self.send_response(&response)).await??;
            }
            Reply::Error { status, message } => {
                self.respond_error(status, message.as_deref()).await?;
            }
        }
        Ok(ConnectionState::ResponseSent)
    }

    /// Answers a parse failure, or propagates it when the stream itself broke.
    async fn reject(&mut self, error: ParseError) -> anyhow::Result<ConnectionState> {
        let message = error.to_string();
        let status = match error {
            ParseError::Io { source } => return Err(source.into()),
            ParseError::BadRequestVersion { method, .. } => {
                self.method = Some(method);
                StatusCode::BadRequest
            }
            ParseError::BadRequestSyntax { .. } | ParseError::MalformedHeaderLine { .. } => {
                StatusCode::BadRequest
            }
            ParseError::LineTooLong { request_line: true, .. } => StatusCode::RequestUriTooLong,
            ParseError::LineTooLong { .. } | ParseError::TooManyHeaders { .. } => {
                StatusCode::RequestHeaderFieldsTooLarge
            }
        };

        self.respond_error(status, Some(&message)).await?;
        Ok(ConnectionState::ResponseSent)
    }

    async fn respond_error(&mut self, status: StatusCode, message: Option<&str>) -> anyhow::Result<()> {
        let write_timeout = self.settings.write_timeout;
        deadline(write_timeout, self.send_error(status, message)).await??;
        Ok(())
    }

    fn timed_out(&self, phase: &str) -> ConnectionState {
        warn!(phase, "Timed out waiting for client");
        ConnectionState::Closed
    }

    /// Sends the standard HTML error document.
    ///
    /// The message, when given, also replaces the reason phrase of the status
    /// line. The document is not written for HEAD requests, but its length
    /// is still announced.
    pub async fn send_error(
        &mut self,
        status: StatusCode,
        message: Option<&str>,
    ) -> anyhow::Result<()> {
        let content = error_page::render(status, message);

        warn!(
            code = status.as_u16(),
            message = message.unwrap_or_else(|| status.description()),
            "Sending error"
        );

        let suppress = self.method.as_deref().is_some_and(request::suppresses_body);
        let mut writer = ResponseWriter::new(&mut self.stream, suppress);

        writer.write_status(status, message)?;
        writer.write_header("Server", &self.settings.server_name)?;
        writer.write_header("Date", http_date())?;
        writer.write_header("Content-Type", ERROR_CONTENT_TYPE)?;
        writer.write_header("Connection", "close")?;
        writer.write_header("Content-Length", content.len())?;
        writer.end_headers().await?;
        writer.write_body(&content).await?;
        Ok(())
    }

    /// Sends a handler response with the standard headers and a matching
    /// `Content-Length`.
    pub async fn send_response(&mut self, response: &Response) -> anyhow::Result<()> {
        let body = response.body.as_deref().unwrap_or_default();
        let suppress = self.method.as_deref().is_some_and(request::suppresses_body);
        let mut writer = ResponseWriter::new(&mut self.stream, suppress);

        writer.write_status(response.status, None)?;
        writer.write_header("Server", &self.settings.server_name)?;
        writer.write_header("Date", http_date())?;
        for (name, value) in &response.headers {
            if name.eq_ignore_ascii_case("Content-Length") {
                continue;
            }
            writer.write_header(name, value)?;
        }
        writer.write_header("Content-Length", body.len())?;
        writer.end_headers().await?;
        writer.write_body(body).await?;
        Ok(())
    }
}

async fn deadline<F: Future>(limit: Option<Duration>, fut: F) -> Result<F::Output, Elapsed> {
    match limit {
        Some(limit) => timeout(limit, fut).await,
        None => Ok(fut.await),
    }
}
