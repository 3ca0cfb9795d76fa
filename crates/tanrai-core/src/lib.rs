//! # tanrai-core
//!
//! Shared vocabulary for the Tanrai todo service and its client:
//!
//! - **Entity**: [`Todo`], the single persisted record
//! - **Request bodies**: [`CreateTodo`] and [`UpdateTodo`] as they arrive over HTTP
//! - **Patches**: [`TodoPatch`], the bounded set of partial-update shapes
//! - **Validation**: [`ValidationError`] for rejected input
//! - **Display**: [`relative_age`] labels such as `"5 min ago"`
//! - **Logging**: `tracing` subscriber setup shared by every binary

#![deny(unsafe_code)]

pub mod age;
pub mod errors;
pub mod logging;
pub mod todo;

pub use age::relative_age;
pub use errors::ValidationError;
pub use todo::{CreateTodo, MAX_TEXT_LEN, NewTodo, Todo, TodoPatch, UpdateTodo};
