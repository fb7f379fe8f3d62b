//! Error types for `rolodex-core`.

use thiserror::Error;

use crate::contact::ContactField;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "Field not allowed: {0}. Allowed fields are: {allowed}",
    allowed = ContactField::allowed_list()
  )]
  FieldNotAllowed(String),

  #[error("Must have name in data")]
  MissingName,

  #[error("The limit for {field} is {limit} characters")]
  TooLong { field: ContactField, limit: usize },

  #[error("Invalid format for email_address")]
  InvalidEmail,

  #[error("Cannot modify name. It is used as a primary key")]
  NameChange,

  /// The body could not be decoded into a contact (wrong JSON types, not an
  /// object, invalid syntax).
  #[error("{0}")]
  Malformed(String),

  #[error("{0}")]
  Pagination(&'static str),

  #[error("Contact not found")]
  NotFound,

  #[error(
    "Contact already exists, try a PUT request to modify current contact"
  )]
  AlreadyExists,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error from a [`crate::store::ContactStore`].
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
