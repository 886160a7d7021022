//! REST surface for the task store.
//!
//! ```text
//! GET    /todo        list all tasks
//! GET    /todo/{id}   one task
//! POST   /todo        create, `title` required → 201
//! PUT    /todo/{id}   partial update
//! DELETE /todo/{id}   remove → {"result": true}
//! ```

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::http::dispatch::{DispatchError, Dispatcher};
use crate::http::request::{BodyError, Method, Request};
use crate::http::response::Reply;
use crate::http::status::StatusCode;
use crate::todo::store::{NewTask, TaskPatch, TaskStore};

/// Collection name in the path
pub const RESOURCE: &str = "todo";

enum Target {
    Collection,
    Item(u64),
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    id: Option<u64>,
    #[serde(flatten)]
    patch: TaskPatch,
}

/// Routes task requests to the store.
#[derive(Debug, Clone)]
pub struct TodoApi {
    store: Arc<TaskStore>,
}

impl TodoApi {
    pub fn new(store: Arc<TaskStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The method table served by this API.
    pub fn into_dispatcher(self) -> Result<Dispatcher<Self>, DispatchError> {
        Dispatcher::builder(self)
            .route(Method::GET, Self::get)
            .route(Method::HEAD, Self::get)
            .route(Method::POST, Self::post)
            .route(Method::PUT, Self::put)
            .route(Method::DELETE, Self::delete)
            .build()
    }

    pub fn get(&self, request: &Request) -> Reply {
        match resolve(request) {
            Ok(Target::Collection) => Reply::json(StatusCode::Ok, &self.store.list()),
            Ok(Target::Item(id)) => match self.store.get(id) {
                Some(task) => Reply::json(StatusCode::Ok, &task),
                None => task_not_found(id),
            },
            Err(reply) => reply,
        }
    }

    pub fn post(&self, request: &Request) -> Reply {
        match resolve(request) {
            Ok(Target::Collection) => {}
            Ok(Target::Item(_)) => return not_allowed(request),
            Err(reply) => return reply,
        }

        let new: NewTask = match json_body(request) {
            Ok(new) => new,
            Err(reply) => return reply,
        };
        let task = self.store.create(new);
        tracing::debug!(id = task.id, "Task created");
        Reply::json(StatusCode::Created, &task)
    }

    pub fn put(&self, request: &Request) -> Reply {
        let id = match resolve(request) {
            Ok(Target::Item(id)) => id,
            Ok(Target::Collection) => return not_allowed(request),
            Err(reply) => return reply,
        };

        let body: UpdateBody = match json_body(request) {
            Ok(body) => body,
            Err(reply) => return reply,
        };
        if body.id.is_some_and(|new_id| new_id != id) {
            return Reply::error(StatusCode::Forbidden, "Task id cannot be changed");
        }

        match self.store.update(id, body.patch) {
            Some(task) => Reply::json(StatusCode::Ok, &task),
            None => task_not_found(id),
        }
    }

    pub fn delete(&self, request: &Request) -> Reply {
        let id = match resolve(request) {
            Ok(Target::Item(id)) => id,
            Ok(Target::Collection) => return not_allowed(request),
            Err(reply) => return reply,
        };

        if self.store.delete(id) {
            Reply::json(StatusCode::Ok, &json!({ "result": true }))
        } else {
            task_not_found(id)
        }
    }
}

fn resolve(request: &Request) -> Result<Target, Reply> {
    let segments = request.path_segments();
    match segments.as_slice() {
        [name] if name == RESOURCE => Ok(Target::Collection),
        [name, id] if name == RESOURCE => parse_id(id)
            .map(Target::Item)
            .ok_or_else(|| Reply::error(StatusCode::BadRequest, format!("Invalid task id {id}"))),
        _ => Err(Reply::error(
            StatusCode::NotFound,
            format!("Resource {} not found", request.target),
        )),
    }
}

// digits only, no sign
fn parse_id(id: &str) -> Option<u64> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse().ok()
}

fn json_body<T: DeserializeOwned>(request: &Request) -> Result<T, Reply> {
    let body = request.body().map_err(|e| match e {
        BodyError::LengthRequired => Reply::status(StatusCode::LengthRequired),
        other => Reply::error(StatusCode::BadRequest, other.to_string()),
    })?;

    serde_json::from_slice(body)
        .map_err(|e| Reply::error(StatusCode::BadRequest, format!("Invalid task body: {e}")))
}

fn task_not_found(id: u64) -> Reply {
    Reply::error(StatusCode::NotFound, format!("Task {id} not found"))
}

fn not_allowed(request: &Request) -> Reply {
    Reply::error(
        StatusCode::MethodNotAllowed,
        format!("Method {} not allowed on {}", request.method, request.target),
    )
}
