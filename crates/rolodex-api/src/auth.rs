//! Shared-secret `X-Api-Key` extractor and standalone verifier.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use rolodex_core::store::ContactStore;
use sha2::{Digest, Sha256};

use crate::{AppState, error::ApiError};

pub const API_KEY_HEADER: &str = "x-api-key";

/// The API key accepted by this server instance, if any.
#[derive(Clone, Default)]
pub struct AuthConfig {
  /// SHA-256 of the configured key. Comparing digests keeps the comparison
  /// independent of the key's length.
  key_digest: Option<[u8; 32]>,
}

impl AuthConfig {
  /// An empty or missing key disables the check.
  pub fn new(api_key: Option<&str>) -> Self {
    Self {
      key_digest: api_key.filter(|k| !k.is_empty()).map(digest),
    }
  }

  pub fn is_enabled(&self) -> bool { self.key_digest.is_some() }
}

fn digest(key: &str) -> [u8; 32] { Sha256::digest(key.as_bytes()).into() }

/// Zero-size marker: present in the handler means the request carried the
/// right key (or no key is configured).
pub struct Authorized;

/// Verify the `X-Api-Key` header against `config`.
pub fn verify_api_key(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<(), ApiError> {
  let Some(expected) = &config.key_digest else {
    return Ok(());
  };

  let given = headers
    .get(API_KEY_HEADER)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  if digest(given) != *expected {
    return Err(ApiError::Unauthorized);
  }
  Ok(())
}

impl<S> FromRequestParts<AppState<S>> for Authorized
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_api_key(&parts.headers, &state.auth)?;
    Ok(Authorized)
  }
}
