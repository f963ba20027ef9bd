use tokio::runtime::Runtime;
use tuido_core::todo::{CreateTodo, Todo};

use crate::{HttpService, ServiceError, TodoService};

/// Blocking wrapper around the async `HttpService`.
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers like the TUI, which issues one request per
/// user action and waits for it to finish.
pub struct BlockingHttpService {
    inner: HttpService,
    rt: Runtime,
}

impl BlockingHttpService {
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: HttpService::new(base_url),
            rt: Runtime::new().expect("failed to create tokio runtime"),
        }
    }

    pub fn list_todos(&self) -> Result<Vec<Todo>, ServiceError> {
        self.rt.block_on(self.inner.list_todos())
    }

    pub fn get_todo(&self, id: &str) -> Result<Todo, ServiceError> {
        self.rt.block_on(self.inner.get_todo(id))
    }

    pub fn add_todo(&self, input: &CreateTodo) -> Result<(), ServiceError> {
        self.rt.block_on(self.inner.add_todo(input))
    }

    pub fn update_todo(&self, todo: &Todo) -> Result<(), ServiceError> {
        self.rt.block_on(self.inner.update_todo(todo))
    }

    pub fn delete_todo(&self, id: &str) -> Result<String, ServiceError> {
        self.rt.block_on(self.inner.delete_todo(id))
    }
}
