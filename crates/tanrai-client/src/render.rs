//! Plain-text view of the list.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use tanrai_core::{Todo, relative_age};

use crate::api::TodoApi;
use crate::app::TodoApp;

/// One line: checkbox, id, text, age.
pub fn render_todo(todo: &Todo, now: DateTime<Utc>) -> String {
    let mark = if todo.completed { 'x' } else { ' ' };
    format!(
        "[{mark}] {:>4}  {}  ({})",
        todo.id,
        todo.text,
        relative_age(todo.created_at, now)
    )
}

/// Heading, any error, then the list or its placeholder.
pub fn render<A: TodoApi>(app: &TodoApp<A>, now: DateTime<Utc>) -> String {
    let mut out = String::from("My Tasks\n");
    if let Some(error) = app.error() {
        let _ = writeln!(out, "! {error}");
    }
    let todos = app.todos();
    if app.is_loading() {
        out.push_str("Loading your tasks...\n");
    } else if todos.is_empty() {
        out.push_str("No tasks yet. Add one above!\n");
    } else {
        for todo in &todos {
            let _ = writeln!(out, "{}", render_todo(todo, now));
        }
    }
    out
}
