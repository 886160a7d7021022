//! Todo task resource: the store and the REST handler on top of it.

pub mod api;
pub mod store;

pub use api::TodoApi;
pub use store::{NewTask, Task, TaskPatch, TaskStore};
