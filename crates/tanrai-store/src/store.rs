//! Async facade over the connection pool.

use std::path::Path;

use tanrai_core::{NewTodo, Todo, TodoPatch};
use tokio::task;
use tracing::{info, instrument};

use crate::connection::{self, ConnectionConfig, ConnectionPool};
use crate::errors::Result;
use crate::repository::TodoRepository;
use crate::schema::init_schema;

/// Shared handle to the todo database.
///
/// Cloning is cheap; clones share the pool. Each call checks out one
/// connection inside a blocking task and drops it before the task returns,
/// so a failed query never strands a connection.
#[derive(Clone)]
pub struct TodoStore {
    pool: ConnectionPool,
}

impl TodoStore {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: &Path, config: &ConnectionConfig) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let pool = connection::new_file(path, config)?;
        let store = Self::from_pool(pool)?;
        info!(path = %path.display(), pool_size = config.pool_size, "todo store opened");
        Ok(store)
    }

    /// A fresh in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::from_pool(connection::new_in_memory(&ConnectionConfig::default())?)
    }

    /// Wrap an existing pool, creating the schema if needed.
    pub fn from_pool(pool: ConnectionPool) -> Result<Self> {
        {
            let conn = pool.get()?;
            init_schema(&conn)?;
        }
        Ok(Self { pool })
    }

    /// The underlying pool.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// All todos, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Todo>> {
        self.run(TodoRepository::list).await
    }

    /// A single todo.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Todo>> {
        self.run(move |conn| TodoRepository::get(conn, id)).await
    }

    /// Insert a validated todo.
    #[instrument(skip(self, new), fields(text_len = new.text.len()))]
    pub async fn create(&self, new: NewTodo) -> Result<Todo> {
        self.run(move |conn| TodoRepository::create(conn, &new)).await
    }

    /// Apply a patch. `None` when `id` does not exist.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: TodoPatch) -> Result<Option<Todo>> {
        self.run(move |conn| TodoRepository::update(conn, id, &patch))
            .await
    }

    /// Delete by id. `false` when `id` does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.run(move |conn| TodoRepository::delete(conn, id)).await
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<T> {
            let conn = pool.get()?;
            op(&conn)
        })
        .await?
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
