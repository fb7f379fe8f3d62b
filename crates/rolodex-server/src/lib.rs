//! Process wiring for the Rolodex server: configuration, store selection,
//! and the HTTP listener.

pub mod settings;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rolodex_api::{AppState, AuthConfig};
use rolodex_core::store::ContactStore;
use rolodex_store_elastic::ElasticStore;
use rolodex_store_sqlite::SqliteStore;
use tokio::net::TcpListener;

pub use settings::{ServerConfig, StoreConfig};

/// Open the configured store and serve until Ctrl-C.
pub async fn run(cfg: ServerConfig) -> anyhow::Result<()> {
  let collection = cfg.collection();

  match &cfg.store {
    StoreConfig::Elasticsearch { url } => {
      let store = ElasticStore::new(url, collection)
        .with_context(|| format!("invalid elasticsearch url {url:?}"))?;
      store
        .ensure_index()
        .await
        .with_context(|| format!("failed to prepare index {collection:?} at {url}"))?;
      tracing::info!(%url, index = collection, "using elasticsearch store");
      serve(store, &cfg).await
    }
    StoreConfig::Sqlite { path } => {
      let path = expand_tilde(path);
      let store = SqliteStore::open(&path, collection)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      tracing::info!(path = %path.display(), collection, "using sqlite store");
      serve(store, &cfg).await
    }
  }
}

async fn serve<S>(store: S, cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let auth = AuthConfig::new(cfg.api_key());
  if !auth.is_enabled() {
    tracing::warn!("no api_key configured; /contact endpoints are open");
  }

  let app = rolodex_api::router(AppState::new(store, auth));
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
