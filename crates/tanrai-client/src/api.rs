//! The todo API as seen by the client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tanrai_core::{CreateTodo, Todo, UpdateTodo};
use tracing::{debug, instrument};

use crate::errors::{ClientError, Result};

/// The four remote operations on the todo list.
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// `GET /api/todos`
    async fn list(&self) -> Result<Vec<Todo>>;

    /// `POST /api/todos`
    async fn create(&self, body: &CreateTodo) -> Result<Todo>;

    /// `PUT /api/todos/{id}`
    async fn update(&self, id: i64, body: &UpdateTodo) -> Result<Todo>;

    /// `DELETE /api/todos/{id}`; returns the server's confirmation message.
    async fn delete(&self, id: i64) -> Result<String>;
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// [`TodoApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: reqwest::Client,
    base_url: String,
}

/// Per-request timeout used by [`HttpTodoApi::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

impl HttpTodoApi {
    /// Client for the API rooted at `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Client whose requests fail with [`ClientError::Http`] after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tanrai/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self::with_client(client, base_url)
    }

    /// Same as [`new`](Self::new) with a shared `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn todos_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/api/todos/{id}", self.base_url)
    }
}

/// Decode a success body, or turn a failure status into [`ClientError::Status`].
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<MessageBody>(&text)
            .map(|b| b.message)
            .unwrap_or(text);
        debug!(status = status.as_u16(), %message, "api error response");
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Todo>> {
        let resp = self.client.get(self.todos_url()).send().await?;
        decode(resp).await
    }

    #[instrument(skip(self, body))]
    async fn create(&self, body: &CreateTodo) -> Result<Todo> {
        let resp = self.client.post(self.todos_url()).json(body).send().await?;
        decode(resp).await
    }

    #[instrument(skip(self, body))]
    async fn update(&self, id: i64, body: &UpdateTodo) -> Result<Todo> {
        let resp = self.client.put(self.todo_url(id)).json(body).send().await?;
        decode(resp).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<String> {
        let resp = self.client.delete(self.todo_url(id)).send().await?;
        decode::<MessageBody>(resp).await.map(|b| b.message)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
