//! Elasticsearch backend for the Rolodex contact book.
//!
//! Talks to the Elasticsearch REST API over [`reqwest`]. One index holds one
//! collection; document ids are normalised contact names. Relevance ranking
//! and query parsing are Elasticsearch's own.

mod request;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::ElasticStore;
