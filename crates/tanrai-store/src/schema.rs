//! SQL DDL for the todo store.

use rusqlite::Connection;
use tracing::debug;

use crate::errors::Result;

/// Idempotent table creation.
///
/// `AUTOINCREMENT` keeps ids monotonic: a deleted id is never handed out
/// again, even when it was the largest. `created_at` is written by the store
/// in RFC 3339 with millisecond precision.
pub const CREATE_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL CHECK (length(text) <= 255),
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);
";

/// Create the `todos` table if absent.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLES)?;
    debug!("todos schema ready");
    Ok(())
}
