//! SQL data access for todos.
//!
//! All methods take a `&Connection` and are stateless. Partial updates never
//! assemble SQL at runtime: each [`TodoPatch`] variant maps to one of the
//! fixed statements below.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tanrai_core::{NewTodo, Todo, TodoPatch};

use crate::errors::{Result, StoreError};

const SELECT_ALL: &str = "SELECT id, text, completed, created_at FROM todos \
                          ORDER BY created_at DESC, id DESC";
const SELECT_ONE: &str = "SELECT id, text, completed, created_at FROM todos WHERE id = ?1";
const EXISTS: &str = "SELECT 1 FROM todos WHERE id = ?1";
const INSERT: &str = "INSERT INTO todos (text, completed) VALUES (?1, ?2)";
const UPDATE_TEXT: &str = "UPDATE todos SET text = ?1 WHERE id = ?2";
const UPDATE_COMPLETED: &str = "UPDATE todos SET completed = ?1 WHERE id = ?2";
const UPDATE_BOTH: &str = "UPDATE todos SET text = ?1, completed = ?2 WHERE id = ?3";
const DELETE: &str = "DELETE FROM todos WHERE id = ?1";

/// Raw row before timestamp decoding.
struct TodoRow {
    id: i64,
    text: String,
    completed: bool,
    created_at: String,
}

impl TodoRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            completed: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn into_todo(self) -> Result<Todo> {
        Ok(Todo {
            id: self.id,
            text: self.text,
            completed: self.completed,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Decode a stored timestamp.
///
/// Rows written by this store are RFC 3339; `CURRENT_TIMESTAMP`-style
/// `YYYY-MM-DD HH:MM:SS` values (UTC) are accepted too.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::CorruptRow {
            column: "created_at",
            detail: format!("{raw:?}: {e}"),
        })
}

/// Todo repository for SQL CRUD operations.
pub struct TodoRepository;

impl TodoRepository {
    /// All todos, newest first. Ties on `created_at` go to the higher id.
    pub fn list(conn: &Connection) -> Result<Vec<Todo>> {
        let mut stmt = conn.prepare_cached(SELECT_ALL)?;
        let rows = stmt
            .query_map([], TodoRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(TodoRow::into_todo).collect()
    }

    /// Get a todo by id.
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Todo>> {
        let row = conn
            .prepare_cached(SELECT_ONE)?
            .query_row(params![id], TodoRow::from_row)
            .optional()?;
        row.map(TodoRow::into_todo).transpose()
    }

    /// Insert a todo and return the stored row.
    pub fn create(conn: &Connection, new: &NewTodo) -> Result<Todo> {
        let _ = conn
            .prepare_cached(INSERT)?
            .execute(params![new.text, new.completed])?;
        let id = conn.last_insert_rowid();
        Self::get(conn, id)?.ok_or(StoreError::NotFound(id))
    }

    /// Apply a patch. Returns the updated row, or `None` if `id` is unknown.
    ///
    /// [`TodoPatch::Empty`] runs no `UPDATE`; it only re-reads the row.
    pub fn update(conn: &Connection, id: i64, patch: &TodoPatch) -> Result<Option<Todo>> {
        let affected = match patch {
            TodoPatch::Empty => {
                let exists = conn
                    .prepare_cached(EXISTS)?
                    .query_row(params![id], |_| Ok(()))
                    .optional()?
                    .is_some();
                usize::from(exists)
            }
            TodoPatch::Text(text) => conn.prepare_cached(UPDATE_TEXT)?.execute(params![text, id])?,
            TodoPatch::Completed(completed) => conn
                .prepare_cached(UPDATE_COMPLETED)?
                .execute(params![completed, id])?,
            TodoPatch::Both { text, completed } => conn
                .prepare_cached(UPDATE_BOTH)?
                .execute(params![text, completed, id])?,
        };

        if affected == 0 {
            return Ok(None);
        }
        Self::get(conn, id)
    }

    /// Delete a todo. Returns `false` if `id` is unknown.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let affected = conn.prepare_cached(DELETE)?.execute(params![id])?;
        Ok(affected > 0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::init_schema;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn new(text: &str) -> NewTodo {
        NewTodo {
            text: text.to_string(),
            completed: false,
        }
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))
            .unwrap()
    }

    // ── create / get ────────────────────────────────────────────────

    #[test]
    fn create_assigns_id_and_timestamp() {
        let conn = setup();
        let before = Utc::now() - chrono::Duration::milliseconds(1);
        let todo = TodoRepository::create(&conn, &new("buy milk")).unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.text, "buy milk");
        assert!(!todo.completed);
        assert!(todo.created_at >= before);
    }

    #[test]
    fn create_keeps_completed_flag() {
        let conn = setup();
        let todo = TodoRepository::create(
            &conn,
            &NewTodo {
                text: "already done".into(),
                completed: true,
            },
        )
        .unwrap();
        assert!(todo.completed);
    }

    #[test]
    fn ids_increase() {
        let conn = setup();
        let a = TodoRepository::create(&conn, &new("a")).unwrap();
        let b = TodoRepository::create(&conn, &new("b")).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn ids_not_reused_after_delete() {
        let conn = setup();
        let a = TodoRepository::create(&conn, &new("a")).unwrap();
        assert!(TodoRepository::delete(&conn, a.id).unwrap());
        let b = TodoRepository::create(&conn, &new("b")).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn get_missing_is_none() {
        let conn = setup();
        assert!(TodoRepository::get(&conn, 99).unwrap().is_none());
    }

    // ── list ────────────────────────────────────────────────────────

    #[test]
    fn list_empty() {
        let conn = setup();
        assert!(TodoRepository::list(&conn).unwrap().is_empty());
    }

    #[test]
    fn list_newest_first() {
        let conn = setup();
        let first = TodoRepository::create(&conn, &new("first")).unwrap();
        let second = TodoRepository::create(&conn, &new("second")).unwrap();
        let ids: Vec<i64> = TodoRepository::list(&conn)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn list_orders_by_created_at_before_id() {
        let conn = setup();
        conn.execute_batch(
            "INSERT INTO todos (text, created_at) VALUES ('new', '2024-01-02T00:00:00.000Z');
             INSERT INTO todos (text, created_at) VALUES ('old', '2024-01-01T00:00:00.000Z');",
        )
        .unwrap();
        let texts: Vec<String> = TodoRepository::list(&conn)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["new", "old"]);
    }

    #[test]
    fn legacy_timestamp_format_decoded() {
        let conn = setup();
        conn.execute(
            "INSERT INTO todos (text, created_at) VALUES ('legacy', '2024-03-04 05:06:07')",
            [],
        )
        .unwrap();
        let todo = TodoRepository::get(&conn, 1).unwrap().unwrap();
        assert_eq!(todo.created_at.to_rfc3339(), "2024-03-04T05:06:07+00:00");
    }

    #[test]
    fn corrupt_timestamp_reported() {
        let conn = setup();
        conn.execute(
            "INSERT INTO todos (text, created_at) VALUES ('bad', 'yesterday')",
            [],
        )
        .unwrap();
        let err = TodoRepository::list(&conn).unwrap_err();
        assert!(matches!(
            err,
            StoreError::CorruptRow {
                column: "created_at",
                ..
            }
        ));
    }

    // ── update ──────────────────────────────────────────────────────

    #[test]
    fn update_completed_only_keeps_text_and_timestamp() {
        let conn = setup();
        let todo = TodoRepository::create(&conn, &new("buy milk")).unwrap();
        let updated = TodoRepository::update(&conn, todo.id, &TodoPatch::Completed(true))
            .unwrap()
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.text, todo.text);
        assert_eq!(updated.created_at, todo.created_at);
    }

    #[test]
    fn update_text_only_keeps_completed() {
        let conn = setup();
        let todo = TodoRepository::create(
            &conn,
            &NewTodo {
                text: "draft".into(),
                completed: true,
            },
        )
        .unwrap();
        let updated = TodoRepository::update(&conn, todo.id, &TodoPatch::Text("final".into()))
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "final");
        assert!(updated.completed);
    }

    #[test]
    fn update_both() {
        let conn = setup();
        let todo = TodoRepository::create(&conn, &new("a")).unwrap();
        let patch = TodoPatch::Both {
            text: "b".into(),
            completed: true,
        };
        let updated = TodoRepository::update(&conn, todo.id, &patch).unwrap().unwrap();
        assert_eq!(updated.text, "b");
        assert!(updated.completed);
    }

    #[test]
    fn update_empty_returns_current_row() {
        let conn = setup();
        let todo = TodoRepository::create(&conn, &new("same")).unwrap();
        let updated = TodoRepository::update(&conn, todo.id, &TodoPatch::Empty)
            .unwrap()
            .unwrap();
        assert_eq!(updated, todo);
    }

    #[test]
    fn update_empty_unknown_is_none() {
        let conn = setup();
        assert!(TodoRepository::update(&conn, 5, &TodoPatch::Empty)
            .unwrap()
            .is_none());
    }

    #[test]
    fn update_unknown_alters_nothing() {
        let conn = setup();
        let todo = TodoRepository::create(&conn, &new("untouched")).unwrap();
        let result = TodoRepository::update(&conn, todo.id + 100, &TodoPatch::Completed(true))
            .unwrap();
        assert!(result.is_none());
        assert_eq!(TodoRepository::get(&conn, todo.id).unwrap().unwrap(), todo);
    }

    #[test]
    fn update_same_value_still_found() {
        let conn = setup();
        let todo = TodoRepository::create(&conn, &new("x")).unwrap();
        let updated = TodoRepository::update(&conn, todo.id, &TodoPatch::Completed(false))
            .unwrap();
        assert!(updated.is_some());
    }

    // ── delete ──────────────────────────────────────────────────────

    #[test]
    fn delete_removes_exactly_one_row() {
        let conn = setup();
        let a = TodoRepository::create(&conn, &new("a")).unwrap();
        let _b = TodoRepository::create(&conn, &new("b")).unwrap();
        assert!(TodoRepository::delete(&conn, a.id).unwrap());
        assert_eq!(count(&conn), 1);
        assert!(TodoRepository::get(&conn, a.id).unwrap().is_none());
    }

    #[test]
    fn delete_unknown_is_false() {
        let conn = setup();
        let _ = TodoRepository::create(&conn, &new("a")).unwrap();
        assert!(!TodoRepository::delete(&conn, 42).unwrap());
        assert_eq!(count(&conn), 1);
    }
}
