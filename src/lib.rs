//! Todo Server - HTTP/1.1 engine with a small REST task API
//!
//! The `http` module parses requests straight off the socket and frames
//! responses; `todo` is the resource served on top of it.

pub mod config;
pub mod http;
pub mod server;
pub mod todo;
