use async_trait::async_trait;
use thiserror::Error;
use tuido_core::todo::{CreateTodo, Todo};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Abstraction over the todo backend.
///
/// The TUI programs against this trait; `HttpService` is the async HTTP
/// client implementation and `BlockingHttpService` its sync wrapper.
#[async_trait]
pub trait TodoService: Send + Sync {
    async fn list_todos(&self) -> Result<Vec<Todo>, ServiceError>;
    async fn get_todo(&self, id: &str) -> Result<Todo, ServiceError>;
    async fn add_todo(&self, input: &CreateTodo) -> Result<(), ServiceError>;
    async fn update_todo(&self, todo: &Todo) -> Result<(), ServiceError>;
    /// Returns the response body; the backend answers delete with a plain
    /// text message that the UI displays directly.
    async fn delete_todo(&self, id: &str) -> Result<String, ServiceError>;
}
