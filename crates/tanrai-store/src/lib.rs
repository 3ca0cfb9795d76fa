//! # tanrai-store
//!
//! `SQLite` persistence for the `todos` table.
//!
//! # Architecture
//!
//! - **[`connection`]**: `r2d2` connection pool with WAL mode and busy-timeout
//!   pragmas applied to every connection.
//! - **[`schema`]**: idempotent table creation run once at startup.
//! - **[`repository`]**: stateless functions taking `&Connection`; one fixed
//!   statement per operation and per [`TodoPatch`](tanrai_core::TodoPatch)
//!   variant.
//! - **[`store`]**: [`TodoStore`], the async facade used by the server. Each
//!   call borrows one pooled connection on tokio's blocking pool and returns
//!   it when the call finishes, whatever the outcome.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod repository;
pub mod schema;
pub mod store;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection};
pub use errors::{Result, StoreError};
pub use repository::TodoRepository;
pub use store::TodoStore;
