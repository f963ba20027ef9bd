use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TuidoError;

/// A single todo item as the backend returns it.
///
/// The backend assigns numeric ids but the UI treats them as opaque text,
/// so deserialization accepts both JSON strings and numbers for `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// POST body for `/todoapi/add`. The id is only sent when the user typed
/// one; a blank id means the server assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// The form's in-progress todo, shared between Add and Edit modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl Draft {
    /// Copy a row's fields into the draft for editing.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
        }
    }

    /// The title is the only required field.
    pub fn validate(&self) -> Result<(), TuidoError> {
        if self.title.trim().is_empty() {
            return Err(TuidoError::InvalidInput("title must not be empty".into()));
        }
        Ok(())
    }

    pub fn to_create(&self) -> CreateTodo {
        CreateTodo {
            id: if self.id.trim().is_empty() {
                None
            } else {
                Some(self.id.trim().to_string())
            },
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
        }
    }

    /// Full todo for `/todoapi/update`, which replaces every field shown.
    pub fn to_todo(&self) -> Todo {
        Todo {
            id: self.id.trim().to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
        }
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for id, got {other}"
        ))),
    }
}
