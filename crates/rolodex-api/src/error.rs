//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure leaves the service as `{"error": "<message>"}` with the
//! matching status code.

use std::any::Any;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(
    "Unauthorized, requires correct API key (e.g., -H 'X-Api-Key: KEY_HERE')"
  )]
  Unauthorized,

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error("Method Not Allowed")]
  MethodNotAllowed,

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  PayloadTooLarge(String),

  #[error("{0}")]
  Internal(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<rolodex_core::Error> for ApiError {
  fn from(err: rolodex_core::Error) -> Self {
    use rolodex_core::Error as E;

    let message = err.to_string();
    match err {
      E::NotFound => ApiError::NotFound(message),
      E::AlreadyExists => ApiError::Conflict(message),
      E::Store(_) => {
        tracing::error!(error = %message, "store failure");
        ApiError::Internal(message)
      }
      E::FieldNotAllowed(_)
      | E::MissingName
      | E::TooLong { .. }
      | E::InvalidEmail
      | E::NameChange
      | E::Malformed(_)
      | E::Pagination(_) => ApiError::BadRequest(message),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
  }
}

// ─── Router fallbacks ────────────────────────────────────────────────────────

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError { ApiError::NotFound("Not Found".to_owned()) }

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError { ApiError::MethodNotAllowed }

/// Response for a handler that panicked, used with
/// [`tower_http::catch_panic::CatchPanicLayer::custom`].
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
  let detail = err
    .downcast_ref::<String>()
    .map(String::as_str)
    .or_else(|| err.downcast_ref::<&str>().copied())
    .unwrap_or("unknown panic");
  tracing::error!(panic = detail, "handler panicked");
  ApiError::Internal("Internal Server Error".to_owned()).into_response()
}
