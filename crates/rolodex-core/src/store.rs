//! The `ContactStore` trait.
//!
//! The trait is implemented by document-store backends (e.g.
//! `rolodex-store-sqlite`, `rolodex-store-elastic`). Each backend is bound to
//! a single collection at construction time; ids are normalised contact
//! names. Higher layers depend on this abstraction, not on any backend.

use std::future::Future;

use crate::contact::{Contact, ContactPatch};

/// Raw document operations against one collection.
///
/// The methods do no validation and no existence checks; that is
/// [`crate::ContactBook`]'s job.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether a document with this id exists.
  fn exists<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Store `contact` under `contact.name`, replacing any existing document.
  fn index<'a>(
    &'a self,
    contact: &'a Contact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Fetch a document. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Merge the set fields of `patch` into an existing document. The patch's
  /// `name` is ignored.
  fn update<'a>(
    &'a self,
    id: &'a str,
    patch: &'a ContactPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove a document. Removing a missing document is not an error.
  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Return up to `limit` documents matching the free-text `query`, or any
  /// documents at all when `query` is `None`. Ordering is backend-defined.
  fn search<'a>(
    &'a self,
    query: Option<&'a str>,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;
}
