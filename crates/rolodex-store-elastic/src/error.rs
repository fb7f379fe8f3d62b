//! Error type for `rolodex-store-elastic`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid elasticsearch url {url:?}: {reason}")]
  Url { url: String, reason: String },

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("elasticsearch returned {status}: {body}")]
  Status { status: StatusCode, body: String },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
