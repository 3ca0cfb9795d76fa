//! # tanrai-server
//!
//! Axum REST API for the todo list.
//!
//! - `GET/POST /api/todos`, `PUT/DELETE /api/todos/{id}` backed by
//!   [`TodoStore`](tanrai_store::TodoStore)
//! - `GET /health` with uptime
//! - Optional static-asset fallback for a bundled web client
//! - Request tracing via `tower-http`, permissive CORS
//! - Graceful shutdown via `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{AppState, TodoServer, build_router};
pub use shutdown::ShutdownCoordinator;
