//! Scripted [`TodoApi`] for controller tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use tanrai_core::{CreateTodo, Todo, UpdateTodo};

use crate::api::TodoApi;
use crate::errors::{ClientError, Result};

/// Pre-programmed reply, consumed in order by whichever call comes next.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Reply to `list`.
    Todos(Vec<Todo>),
    /// Reply to `create` or `update`.
    Todo(Todo),
    /// Reply to `delete`.
    Message(String),
    /// Fail with a status error.
    Error {
        /// HTTP status to report.
        status: u16,
        /// Error message.
        message: String,
    },
    /// Never settle; for cancellation and in-flight tests.
    Pending,
}

impl MockResponse {
    /// A 500 with the given message.
    pub fn server_error(message: &str) -> Self {
        Self::Error {
            status: 500,
            message: message.to_owned(),
        }
    }

    /// The usual delete confirmation.
    pub fn deleted() -> Self {
        Self::Message("Todo deleted successfully".into())
    }
}

/// A recorded call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    /// `list()`
    List,
    /// `create(body)`
    Create(CreateTodo),
    /// `update(id, body)`
    Update(i64, UpdateTodo),
    /// `delete(id)`
    Delete(i64),
}

/// Mock API that returns pre-programmed responses in sequence.
#[derive(Default)]
pub struct MockTodoApi {
    responses: Mutex<VecDeque<MockResponse>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockTodoApi {
    /// Mock that answers with `responses`, one per call.
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::default(),
        }
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    async fn next(&self, call: MockCall) -> Result<MockResponse> {
        let (idx, response) = {
            let mut calls = self.calls.lock();
            calls.push(call);
            (calls.len() - 1, self.responses.lock().pop_front())
        };
        match response {
            Some(MockResponse::Pending) => std::future::pending().await,
            Some(MockResponse::Error { status, message }) => {
                Err(ClientError::Status { status, message })
            }
            Some(response) => Ok(response),
            None => Err(unexpected(&format!("no response configured for call {idx}"))),
        }
    }
}

fn unexpected(detail: &str) -> ClientError {
    ClientError::Status {
        status: 500,
        message: format!("MockTodoApi: {detail}"),
    }
}

#[async_trait]
impl TodoApi for MockTodoApi {
    async fn list(&self) -> Result<Vec<Todo>> {
        match self.next(MockCall::List).await? {
            MockResponse::Todos(todos) => Ok(todos),
            other => Err(unexpected(&format!("list got {other:?}"))),
        }
    }

    async fn create(&self, body: &CreateTodo) -> Result<Todo> {
        match self.next(MockCall::Create(body.clone())).await? {
            MockResponse::Todo(todo) => Ok(todo),
            other => Err(unexpected(&format!("create got {other:?}"))),
        }
    }

    async fn update(&self, id: i64, body: &UpdateTodo) -> Result<Todo> {
        match self.next(MockCall::Update(id, body.clone())).await? {
            MockResponse::Todo(todo) => Ok(todo),
            other => Err(unexpected(&format!("update got {other:?}"))),
        }
    }

    async fn delete(&self, id: i64) -> Result<String> {
        match self.next(MockCall::Delete(id)).await? {
            MockResponse::Message(message) => Ok(message),
            other => Err(unexpected(&format!("delete got {other:?}"))),
        }
    }
}
