//! In-memory `todoapi` fixture for integration tests.
//!
//! Implements the same REST contract the real backend exposes, backed by a
//! `Mutex<Vec<Todo>>`, so client and TUI tests can run against a live HTTP
//! server on a random port.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tuido_core::todo::{CreateTodo, Todo};

type Store = Arc<Mutex<Vec<Todo>>>;

type ApiError = (StatusCode, Json<serde_json::Value>);

fn not_found(id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("todo {id} not found") })),
    )
}

fn bad_request(msg: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
}

async fn list_all(State(store): State<Store>) -> Json<Vec<Todo>> {
    Json(store.lock().unwrap().clone())
}

async fn get_one(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    store
        .lock()
        .unwrap()
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

async fn add(
    State(store): State<Store>,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Todo>, ApiError> {
    if input.title.trim().is_empty() {
        return Err(bad_request("title must not be empty"));
    }
    let mut todos = store.lock().unwrap();
    let id = match input.id {
        Some(id) => {
            if todos.iter().any(|t| t.id == id) {
                return Err(bad_request("duplicate id"));
            }
            id
        }
        None => {
            let next = todos
                .iter()
                .filter_map(|t| t.id.parse::<u64>().ok())
                .max()
                .unwrap_or(0)
                .saturating_add(1);
            next.to_string()
        }
    };
    let todo = Todo {
        id,
        title: input.title,
        description: input.description,
        completed: input.completed,
    };
    todos.push(todo.clone());
    Ok(Json(todo))
}

async fn update(
    State(store): State<Store>,
    Json(todo): Json<Todo>,
) -> Result<Json<Todo>, ApiError> {
    if todo.title.trim().is_empty() {
        return Err(bad_request("title must not be empty"));
    }
    let mut todos = store.lock().unwrap();
    match todos.iter_mut().find(|t| t.id == todo.id) {
        Some(existing) => {
            *existing = todo.clone();
            Ok(Json(todo))
        }
        None => Err(not_found(&todo.id)),
    }
}

async fn remove(State(store): State<Store>, Path(id): Path<String>) -> Result<String, ApiError> {
    let mut todos = store.lock().unwrap();
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return Err(not_found(&id));
    }
    Ok(format!("Todo with id {id} deleted."))
}

async fn remove_silent(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    let mut todos = store.lock().unwrap();
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return Err(not_found(&id));
    }
    Ok(String::new())
}

/// Build the fixture router with an empty in-memory store.
pub fn todoapi_router() -> Router {
    Router::new()
        .route("/todoapi/all", get(list_all))
        .route("/todoapi/get/{id}", get(get_one))
        .route("/todoapi/add", post(add))
        .route("/todoapi/update", put(update))
        .route("/todoapi/delete/{id}", delete(remove))
        .with_state(Store::default())
}

/// Fixture variant whose delete succeeds with an empty body, for clients
/// that supply their own confirmation message.
pub fn todoapi_router_silent_delete() -> Router {
    Router::new()
        .route("/todoapi/all", get(list_all))
        .route("/todoapi/get/{id}", get(get_one))
        .route("/todoapi/add", post(add))
        .route("/todoapi/update", put(update))
        .route("/todoapi/delete/{id}", delete(remove_silent))
        .with_state(Store::default())
}

/// A running fixture server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn the fixture on a random port. Returns the TestServer with the
/// `base_url` (e.g. "http://127.0.0.1:12345").
pub async fn spawn_test_server() -> TestServer {
    serve(todoapi_router()).await
}

/// Spawn the silent-delete variant on a random port.
pub async fn spawn_test_server_silent_delete() -> TestServer {
    serve(todoapi_router_silent_delete()).await
}

async fn serve(app: Router) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}
