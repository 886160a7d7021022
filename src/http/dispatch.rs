use std::collections::HashMap;

use thiserror::Error;

use crate::http::request::{Method, Request};
use crate::http::response::Reply;

/// A resource operation bound to one method.
pub type Operation<H> = fn(&H, &Request) -> Reply;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("method {0} registered twice")]
    DuplicateMethod(Method),

    #[error("no operation registered")]
    Empty,
}

/// Method table for one resource handler.
///
/// Built once at startup. Looking up a method that is unknown or not
/// registered yields `None`, which the connection turns into 501.
pub struct Dispatcher<H> {
    handler: H,
    operations: HashMap<Method, Operation<H>>,
}

impl<H> std::fmt::Debug for Dispatcher<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut methods: Vec<_> = self.operations.keys().map(Method::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("Dispatcher").field("methods", &methods).finish()
    }
}

impl<H> Dispatcher<H> {
    pub fn builder(handler: H) -> DispatcherBuilder<H> {
        DispatcherBuilder {
            handler,
            operations: Vec::new(),
        }
    }

    /// Finds the operation for a method token as received.
    pub fn lookup(&self, method: &str) -> Option<Operation<H>> {
        let method = Method::from_token(method)?;
        self.operations.get(&method).copied()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

pub struct DispatcherBuilder<H> {
    handler: H,
    operations: Vec<(Method, Operation<H>)>,
}

impl<H> DispatcherBuilder<H> {
    pub fn route(mut self, method: Method, operation: Operation<H>) -> Self {
        self.operations.push((method, operation));
        self
    }

    /// Validates the table: no method twice, at least one method.
    pub fn build(self) -> Result<Dispatcher<H>, DispatchError> {
        if self.operations.is_empty() {
            return Err(DispatchError::Empty);
        }

        let mut operations = HashMap::new();
        for (method, operation) in self.operations {
            if operations.insert(method, operation).is_some() {
                return Err(DispatchError::DuplicateMethod(method));
            }
        }

        Ok(Dispatcher {
            handler: self.handler,
            operations,
        })
    }
}
