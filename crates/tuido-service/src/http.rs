use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tuido_core::todo::{CreateTodo, Todo};

use crate::{ServiceError, TodoService};

/// Async HTTP client implementation of TodoService.
/// Talks to a backend exposing the `/todoapi` routes.
pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/todoapi{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn post_json<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<(), ServiceError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(parse_error(resp).await)
        }
    }

    async fn put_json<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<(), ServiceError> {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(parse_error(resp).await)
        }
    }

    async fn delete_text(&self, path: &str) -> Result<String, ServiceError> {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            resp.text()
                .await
                .map_err(|e| ServiceError::Internal(format!("read body: {e}")))
        } else {
            Err(parse_error_with_status(status, resp).await)
        }
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

async fn parse_error(resp: reqwest::Response) -> ServiceError {
    let status = resp.status();
    parse_error_with_status(status, resp).await
}

async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> ServiceError {
    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
        ServiceError::NotFound(msg)
    } else if status == StatusCode::BAD_REQUEST {
        ServiceError::InvalidInput(msg)
    } else {
        ServiceError::Internal(msg)
    }
}

#[async_trait]
impl TodoService for HttpService {
    async fn list_todos(&self) -> Result<Vec<Todo>, ServiceError> {
        self.get_json("/all").await
    }

    async fn get_todo(&self, id: &str) -> Result<Todo, ServiceError> {
        self.get_json(&format!("/get/{id}")).await
    }

    async fn add_todo(&self, input: &CreateTodo) -> Result<(), ServiceError> {
        self.post_json("/add", input).await
    }

    async fn update_todo(&self, todo: &Todo) -> Result<(), ServiceError> {
        self.put_json("/update", todo).await
    }

    async fn delete_todo(&self, id: &str) -> Result<String, ServiceError> {
        self.delete_text(&format!("/delete/{id}")).await
    }
}
