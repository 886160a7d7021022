//! HTTP/1.1 protocol engine.
//!
//! Everything between raw socket bytes and a resource handler lives here.
//!
//! # Architecture
//!
//! - **`status`**: Status registry, code to reason phrase and description
//! - **`parser`**: Line-oriented request line, header and body parsing
//! - **`request`**: Parsed request, typed header values, method tokens
//! - **`writer`**: Staged response writer (status, headers, one flush, body)
//! - **`response`**: Handler-side response and reply types
//! - **`error_page`**: HTML error documents
//! - **`dispatch`**: Method table built at startup
//! - **`connection`**: The per-connection request lifecycle
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────────────┐
//!        │ AwaitingRequestLine │ ← empty line or EOF → Closed
//!        └──────────┬──────────┘
//!                   │ bad syntax/version → error sent → ResponseSent
//!                   ▼
//!        ┌─────────────────────┐
//!        │   AwaitingHeaders   │ ← missing colon → error sent → ResponseSent
//!        └──────────┬──────────┘
//!                   ▼
//!        ┌─────────────────────┐
//!        │     Dispatched      │ ← unknown method → 501
//!        └──────────┬──────────┘
//!                   ▼
//!        ┌─────────────────────┐
//!        │    ResponseSent     │
//!        └──────────┬──────────┘
//!                   ▼
//!                 Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use todo_server::http::connection::{Connection, ConnectionSettings};
//!
//! let (socket, _peer) = listener.accept().await?;
//! let conn = Connection::new(socket, Arc::clone(&dispatcher), ConnectionSettings::default());
//! conn.run().await?;
//! ```

pub mod connection;
pub mod dispatch;
pub mod error_page;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod writer;
