//! Handlers for `/contact` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contact` | Optional `?pageSize`, `?page`, `?query` |
//! | `POST`   | `/contact` | Body: contact JSON; returns 201 + stored contact |
//! | `GET`    | `/contact/{name}` | 404 if not found |
//! | `PUT`    | `/contact/{name}` | Body: partial contact JSON, merged in |
//! | `DELETE` | `/contact/{name}` | 404 if not found |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rolodex_core::{contact::Contact, pagination::PageRequest, store::ContactStore};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  auth::Authorized,
  error::ApiError,
  extract::{ApiPath, ApiQuery, ContactBody},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query values; parsed by [`PageRequest::from_params`] so malformed
/// numbers come back as JSON errors.
#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(rename = "pageSize")]
  pub page_size: Option<String>,
  pub page:      Option<String>,
  /// Free-text query handed to the store's search facility.
  pub query:     Option<String>,
}

/// `GET /contact[?pageSize=<n>][&page=<n>][&query=<text>]`
pub async fn list<S>(
  _: Authorized,
  State(state): State<AppState<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let page = PageRequest::from_params(
    params.page_size.as_deref(),
    params.page.as_deref(),
  )?;
  let contacts = state.contacts.list(params.query.as_deref(), page).await?;
  tracing::debug!(
    count = contacts.len(),
    page_size = page.page_size(),
    page = page.page(),
    "listed contacts"
  );
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contact`. Returns 201 + the stored [`Contact`].
pub async fn create<S>(
  _: Authorized,
  State(state): State<AppState<S>>,
  ContactBody(patch): ContactBody,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let contact = state.contacts.create(patch).await?;
  tracing::info!(name = %contact.name, "contact created");
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contact/{name}`
pub async fn get_one<S>(
  _: Authorized,
  State(state): State<AppState<S>>,
  ApiPath(name): ApiPath<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.contacts.get(&name).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contact/{name}`. Merges the body into the stored contact.
pub async fn update<S>(
  _: Authorized,
  State(state): State<AppState<S>>,
  ApiPath(name): ApiPath<String>,
  ContactBody(patch): ContactBody,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  state.contacts.update(&name, patch).await?;
  tracing::info!(%name, "contact updated");
  Ok(Json(json!({ "message": "Contact updated" })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contact/{name}`
pub async fn delete<S>(
  _: Authorized,
  State(state): State<AppState<S>>,
  ApiPath(name): ApiPath<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  state.contacts.delete(&name).await?;
  tracing::info!(%name, "contact deleted");
  Ok(Json(json!({ "message": "Contact deleted" })))
}
