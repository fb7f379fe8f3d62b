//! Runtime configuration, read once at startup.
//!
//! Sources, later ones winning: an optional TOML file, then `ROLODEX_*`
//! environment variables (`__` separates nested keys, e.g.
//! `ROLODEX_STORE__BACKEND=sqlite`).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  /// Shared secret for `X-Api-Key`; empty disables the check.
  #[serde(default)]
  pub api_key: String,
  /// Use the `tests` collection instead of `contacts`.
  #[serde(default)]
  pub testing: bool,
  #[serde(default)]
  pub store:   StoreConfig,
}

/// Which document store backs the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
  Elasticsearch {
    #[serde(default = "default_elasticsearch_url")]
    url: String,
  },
  Sqlite {
    path: PathBuf,
  },
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self::Elasticsearch {
      url: default_elasticsearch_url(),
    }
  }
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_elasticsearch_url() -> String { "http://localhost:9200".to_owned() }

impl ServerConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_builder(
      Config::builder().add_source(File::from(path).required(false)),
    )
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .add_source(
        Environment::with_prefix("ROLODEX")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  /// The collection (index / table partition) all documents live in.
  pub fn collection(&self) -> &'static str {
    if self.testing { "tests" } else { "contacts" }
  }

  pub fn api_key(&self) -> Option<&str> {
    Some(self.api_key.as_str()).filter(|k| !k.is_empty())
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use config::FileFormat;

  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    ServerConfig::from_builder(
      Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
    )
    .unwrap()
  }

  #[test]
  fn defaults() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "127.0.0.1:5000");
    assert_eq!(cfg.api_key(), None);
    assert_eq!(cfg.collection(), "contacts");
    assert_eq!(
      cfg.store,
      StoreConfig::Elasticsearch { url: "http://localhost:9200".into() }
    );
  }

  #[test]
  fn testing_switches_collection() {
    let cfg = parse("testing = true\napi_key = \"s3cret\"");
    assert_eq!(cfg.collection(), "tests");
    assert_eq!(cfg.api_key(), Some("s3cret"));
  }

  #[test]
  fn sqlite_backend() {
    let cfg = parse(
      r#"
        port = 8080

        [store]
        backend = "sqlite"
        path = "~/rolodex.sqlite"
      "#,
    );
    assert_eq!(cfg.port, 8080);
    assert_eq!(
      cfg.store,
      StoreConfig::Sqlite { path: PathBuf::from("~/rolodex.sqlite") }
    );
  }

  #[test]
  fn elasticsearch_url_override() {
    let cfg = parse(
      r#"
        [store]
        backend = "elasticsearch"
        url = "http://search.internal:9200"
      "#,
    );
    assert_eq!(
      cfg.store,
      StoreConfig::Elasticsearch { url: "http://search.internal:9200".into() }
    );
  }

  #[test]
  fn missing_file_is_fine() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/rolodex.toml")).unwrap();
    assert_eq!(cfg.port, 5000);
  }
}
