//! The `Todo` entity and the bodies that create or modify it.
//!
//! Create and update bodies deserialize with every field optional so that the
//! service, not serde, decides what "missing" means. Updates are narrowed to a
//! [`TodoPatch`], which the store maps onto one fixed statement per variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Maximum `text` length in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// A persisted todo as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned identity. Never reused.
    pub id: i64,
    /// Task description.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Insertion time, assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// `POST /api/todos` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodo {
    /// Required and non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Defaults to `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl CreateTodo {
    /// Body for a new, not yet completed todo.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: Some(false),
        }
    }

    /// Check the body and fill in defaults.
    pub fn validate(self) -> Result<NewTodo, ValidationError> {
        let text = match self.text {
            Some(text) if !text.is_empty() => text,
            _ => return Err(ValidationError::TextRequired),
        };
        check_len(&text)?;
        Ok(NewTodo {
            text,
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// A validated insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    /// Non-empty text.
    pub text: String,
    /// Initial completion flag.
    pub completed: bool,
}

/// `PUT /api/todos/:id` body. Absent (or `null`) fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodo {
    /// Replacement text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Replacement completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// Body that only sets the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    /// Narrow the body to one of the supported patch shapes.
    pub fn into_patch(self) -> Result<TodoPatch, ValidationError> {
        if let Some(text) = &self.text {
            check_len(text)?;
        }
        Ok(match (self.text, self.completed) {
            (None, None) => TodoPatch::Empty,
            (Some(text), None) => TodoPatch::Text(text),
            (None, Some(completed)) => TodoPatch::Completed(completed),
            (Some(text), Some(completed)) => TodoPatch::Both { text, completed },
        })
    }
}

/// The partial updates the store knows how to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoPatch {
    /// Nothing to change; the store only checks the row exists.
    Empty,
    /// Replace `text`.
    Text(String),
    /// Replace `completed`.
    Completed(bool),
    /// Replace both fields.
    Both {
        /// New text.
        text: String,
        /// New completion flag.
        completed: bool,
    },
}

impl TodoPatch {
    /// Whether applying this patch changes nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

fn check_len(text: &str) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TextTooLong { len });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
