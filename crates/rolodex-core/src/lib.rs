//! Core types and trait definitions for the Rolodex contact book.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod book;
pub mod contact;
pub mod error;
pub mod pagination;
pub mod store;

pub use book::ContactBook;
pub use contact::{Contact, ContactDetails, ContactField, ContactPatch};
pub use error::{Error, Result};
pub use pagination::PageRequest;
pub use store::ContactStore;

#[cfg(test)]
mod testing;
