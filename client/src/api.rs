//! Typed access to the four remote procedures
//!
//! `TodoApi` is the transport seam: the state controller depends on the
//! trait, `ApiClient` implements it over HTTP, and tests swap in a fake.

use async_trait::async_trait;
use thiserror::Error;
use todo_schema::{CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, UpdateTodoCompletionInput};

/// Failures a remote call can surface to the state controller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the input (400/422)
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced todo no longer exists server-side (404)
    ///
    /// Local state has diverged; reload rather than retry.
    #[error("todo not found")]
    NotFound,

    /// Any other non-success status
    #[error("server error: status {0}")]
    Server(u16),

    /// The request never completed
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// The four procedures the server exposes.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ClientError>;
    async fn get_todos(&self) -> Result<Vec<Todo>, ClientError>;
    async fn update_todo_completion(
        &self,
        input: UpdateTodoCompletionInput,
    ) -> Result<Todo, ClientError>;
    async fn delete_todo(&self, input: DeleteTodoInput) -> Result<DeleteTodoResult, ClientError>;
}

/// HTTP implementation of [`TodoApi`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against a base URL like `http://127.0.0.1:8080`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        match status.as_u16() {
            404 => Err(ClientError::NotFound),
            400 | 422 => {
                let body = resp.text().await.unwrap_or_default();
                Err(ClientError::Validation(body))
            }
            code => Err(ClientError::Server(code)),
        }
    }
}

#[async_trait]
impl TodoApi for ApiClient {
    async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ClientError> {
        let resp = self
            .http
            .post(format!("{}/todos", self.base_url))
            .json(&input)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn get_todos(&self) -> Result<Vec<Todo>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/todos", self.base_url))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn update_todo_completion(
        &self,
        input: UpdateTodoCompletionInput,
    ) -> Result<Todo, ClientError> {
        let resp = self
            .http
            .put(format!("{}/todos/{}/completion", self.base_url, input.id))
            .json(&serde_json::json!({"completed": input.completed}))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn delete_todo(&self, input: DeleteTodoInput) -> Result<DeleteTodoResult, ClientError> {
        let resp = self
            .http
            .delete(format!("{}/todos/{}", self.base_url, input.id))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}
