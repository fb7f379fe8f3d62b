//! SQLite backend for the Rolodex contact book.
//!
//! An embedded document store: each contact is one JSON document, keyed by
//! its normalised name within a collection. Wraps [`tokio_rusqlite`] so all
//! database access runs on a dedicated thread without blocking the async
//! runtime.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
