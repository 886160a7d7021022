#![allow(dead_code)]

use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use todo_server::http::connection::{Connection, ConnectionSettings};
use todo_server::http::dispatch::Dispatcher;
use todo_server::todo::{TaskStore, TodoApi};

/// A parsed response as seen by the client.
#[derive(Debug)]
pub struct Exchange {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Exchange {
    pub fn code(&self) -> u16 {
        self.status_line
            .split(' ')
            .nth(1)
            .and_then(|code| code.parse().ok())
            .unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn content_length(&self) -> usize {
        self.header("Content-Length").unwrap().parse().unwrap()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub fn todo_dispatcher() -> Arc<Dispatcher<TodoApi>> {
    let store = Arc::new(TaskStore::new());
    Arc::new(TodoApi::new(store).into_dispatcher().unwrap())
}

/// Runs one connection over an in-memory pipe and returns the raw bytes the
/// server wrote plus the outcome of `Connection::run`.
pub async fn raw_exchange<H>(
    dispatcher: &Arc<Dispatcher<H>>,
    settings: ConnectionSettings,
    request: &[u8],
    close_write: bool,
) -> (Vec<u8>, anyhow::Result<()>)
where
    H: Send + Sync + 'static,
{
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    let conn = Connection::new(server, Arc::clone(dispatcher), settings);
    let task = tokio::spawn(conn.run());

    client.write_all(request).await.unwrap();
    if close_write {
        client.shutdown().await.unwrap();
    }

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    let result = task.await.unwrap();
    (out, result)
}

pub async fn send<H>(dispatcher: &Arc<Dispatcher<H>>, request: &str) -> Exchange
where
    H: Send + Sync + 'static,
{
    let (out, result) =
        raw_exchange(dispatcher, ConnectionSettings::default(), request.as_bytes(), true).await;
    result.unwrap();
    parse_response(&out)
}

pub fn parse_response(raw: &[u8]) -> Exchange {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator");
    let head = std::str::from_utf8(&raw[..split]).unwrap();
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap().to_string();
    let headers = lines
        .map(|line| {
            let (k, v) = line.split_once(": ").unwrap();
            (k.to_string(), v.to_string())
        })
        .collect();

    Exchange {
        status_line,
        headers,
        body: raw[split + 4..].to_vec(),
    }
}

/// A request with a JSON body and a matching `Content-Length`.
pub fn json_request(method: &str, target: &str, body: &str) -> String {
    format!(
        "{method} {target} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
}

pub fn bare_request(method: &str, target: &str) -> String {
    format!("{method} {target} HTTP/1.1\r\nHost: localhost\r\n\r\n")
}
