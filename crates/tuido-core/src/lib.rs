pub mod error;
pub mod todo;

pub use error::TuidoError;
pub use todo::{CreateTodo, Draft, Todo};
