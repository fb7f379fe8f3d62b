//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rolodex_core::store::ContactStore`]. TLS and process concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let state = AppState::new(store, AuthConfig::new(Some("KEY")));
//! axum::serve(listener, rolodex_api::router(state)).await?;
//! ```

pub mod auth;
pub mod contacts;
pub mod error;
pub mod extract;
pub mod index;

use std::sync::Arc;

use axum::{Router, routing::get};
use rolodex_core::{ContactBook, store::ContactStore};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use auth::AuthConfig;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState<S: ContactStore> {
  pub contacts: ContactBook<S>,
  pub auth:     Arc<AuthConfig>,
}

impl<S: ContactStore> AppState<S> {
  pub fn new(store: S, auth: AuthConfig) -> Self {
    Self {
      contacts: ContactBook::new(Arc::new(store)),
      auth:     Arc::new(auth),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router. Every route except `/` requires the API key when
/// one is configured. Unknown paths, wrong methods and panics answer with the
/// same JSON error body as handler failures.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(index::handler))
    .route(
      "/contact",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contact/{name}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .fallback(error::not_found)
    .method_not_allowed_fallback(error::method_not_allowed)
    .layer(CatchPanicLayer::custom(error::panic_response))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
