//! Core types and trait definitions for the Keyloom research store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod record;
pub mod session;
pub mod store;

pub use error::{Error, Result};
