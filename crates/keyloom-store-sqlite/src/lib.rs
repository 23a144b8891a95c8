//! SQLite backend for the Keyloom research store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. Schema creation is additive-only
//! and idempotent; see [`schema`].

mod encode;
mod store;

pub mod error;
pub mod init;
pub mod schema;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
