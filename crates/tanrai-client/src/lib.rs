//! # tanrai-client
//!
//! Client side of the todo list.
//!
//! - [`TodoApi`]: the four API operations, with [`HttpTodoApi`] over `reqwest`
//! - [`reduce`]: pure list transitions; optimistic intents return their own
//!   revert
//! - [`TodoApp`]: holds the last-known list plus input and status flags, and
//!   reconciles optimistic mutations with server responses
//! - [`render`]: plain-text view of the list

#![deny(unsafe_code)]

pub mod api;
pub mod app;
pub mod errors;
pub mod mock;
pub mod render;
pub mod state;

pub use api::{HttpTodoApi, TodoApi};
pub use app::TodoApp;
pub use errors::{ClientError, Result};
pub use render::render;
pub use state::{Intent, Reduction, reduce};
