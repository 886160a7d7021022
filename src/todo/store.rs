//! In-memory task storage.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// A single todo task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// Fields for a new task. Only the title is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub done: Option<bool>,
}

/// A partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

#[derive(Debug)]
struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
}

/// Owned task list guarded by a single mutex.
///
/// Every method takes the lock once and releases it before returning, so
/// callers never hold it while writing to a socket. Ids start at 1 and are
/// never reused.
#[derive(Debug)]
pub struct TaskStore {
    inner: Mutex<Inner>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a panic mid-update leaves plain data behind; keep serving it
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn get(&self, id: u64) -> Option<Task> {
        self.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn create(&self, new: NewTask) -> Task {
        let mut inner = self.lock();
        let task = Task {
            id: inner.next_id,
            title: new.title,
            description: new.description.unwrap_or_default(),
            done: new.done.unwrap_or(false),
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        task
    }

    /// Applies `patch` and returns the updated task, or `None` if `id` is
    /// unknown.
    pub fn update(&self, id: u64, patch: TaskPatch) -> Option<Task> {
        let mut inner = self.lock();
        let task = inner.tasks.iter_mut().find(|t| t.id == id)?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(done) = patch.done {
            task.done = done;
        }
        Some(task.clone())
    }

    /// Removes the task; false if it did not exist.
    pub fn delete(&self, id: u64) -> bool {
        let mut inner = self.lock();
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        inner.tasks.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
