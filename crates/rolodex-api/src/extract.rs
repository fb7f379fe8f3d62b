//! Extractors whose rejections come back as JSON [`ApiError`]s instead of
//! axum's plain-text defaults.

use axum::{
  extract::{
    FromRequest, FromRequestParts, Request,
    rejection::{BytesRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
};
use bytes::Bytes;
use rolodex_core::contact::ContactPatch;

use crate::error::ApiError;

/// [`axum::extract::Query`] with a JSON rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// [`axum::extract::Path`] with a JSON rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<BytesRejection> for ApiError {
  fn from(rejection: BytesRejection) -> Self {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
      ApiError::PayloadTooLarge(rejection.body_text())
    } else {
      ApiError::BadRequest(rejection.body_text())
    }
  }
}

/// A contact body, decoded and allow-list checked. The body is parsed as
/// JSON whatever the `Content-Type` says. Bodies over axum's default limit
/// are rejected with 413.
pub struct ContactBody(pub ContactPatch);

impl<S> FromRequest<S> for ContactBody
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
    let bytes = Bytes::from_request(req, state).await?;
    Ok(Self(ContactPatch::from_slice(&bytes)?))
  }
}
