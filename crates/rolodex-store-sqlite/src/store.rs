//! [`SqliteStore`], the SQLite implementation of [`ContactStore`].

use std::{path::Path, sync::Arc};

use rusqlite::{
  OptionalExtension as _,
  functions::{Context, FunctionFlags},
  types::Value,
};

use rolodex_core::{
  contact::{Contact, ContactPatch},
  store::ContactStore,
};

use crate::{Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolodex document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:       tokio_rusqlite::Connection,
  collection: Arc<str>,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, scoped to `collection`, and run
  /// schema initialisation.
  pub async fn open(path: impl AsRef<Path>, collection: &str) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, collection: collection.into() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory(collection: &str) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, collection: collection.into() };
    store.init_schema().await?;
    Ok(store)
  }

  pub fn collection(&self) -> &str { &self.collection }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        conn.create_scalar_function(
          "fold",
          1,
          FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
          fold,
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert or replace the document for `contact`.
  async fn put(&self, contact: &Contact) -> Result<()> {
    let collection = self.collection.to_string();
    let doc_id     = contact.name.clone();
    let body       = serde_json::to_string(contact)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, doc_id, body) VALUES (?1, ?2, ?3)
           ON CONFLICT (collection, doc_id) DO UPDATE SET body = excluded.body",
          rusqlite::params![collection, doc_id, body],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch(&self, id: &str) -> Result<Option<Contact>> {
    let collection = self.collection.to_string();
    let doc_id     = id.to_owned();

    let body: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT body FROM documents WHERE collection = ?1 AND doc_id = ?2",
              rusqlite::params![collection, doc_id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(body.map(|b| serde_json::from_str(&b)).transpose()?)
  }
}

// ─── Search SQL ──────────────────────────────────────────────────────────────

/// `fold(value)`: Unicode lowercase of a text value, `NULL` for anything
/// else. SQLite's own `lower()` and `LIKE` only fold ASCII.
fn fold(ctx: &Context<'_>) -> rusqlite::Result<Option<String>> {
  Ok(ctx.get_raw(0).as_str().ok().map(str::to_lowercase))
}

/// Escape `LIKE` wildcards in `term` and wrap it for a substring match.
fn like_pattern(term: &str) -> String {
  let mut out = String::with_capacity(term.len() + 2);
  out.push('%');
  for c in term.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out.push('%');
  out
}

/// Build the search statement and its positional parameters. Each
/// whitespace-separated term matches a document if it is a case-insensitive
/// substring of any field value; any matching term selects the document.
fn search_sql(
  collection: &str,
  query: Option<&str>,
  limit: Option<usize>,
) -> (String, Vec<Value>) {
  let mut sql =
    String::from("SELECT d.body FROM documents d WHERE d.collection = ?1");
  let mut params = vec![Value::Text(collection.to_owned())];

  let terms: Vec<&str> =
    query.map(|q| q.split_whitespace().collect()).unwrap_or_default();
  if !terms.is_empty() {
    let conds: Vec<String> = terms
      .iter()
      .map(|term| {
        params.push(Value::Text(like_pattern(&term.to_lowercase())));
        format!(
          "EXISTS (SELECT 1 FROM json_each(d.body) j \
           WHERE fold(j.value) LIKE ?{} ESCAPE '\\')",
          params.len()
        )
      })
      .collect();
    sql.push_str(&format!(" AND ({})", conds.join(" OR ")));
  }

  // SQLite treats a negative LIMIT as "no limit".
  let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
  params.push(Value::Integer(limit));
  sql.push_str(&format!(" ORDER BY d.doc_id LIMIT ?{}", params.len()));

  (sql, params)
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn exists(&self, id: &str) -> Result<bool> {
    let collection = self.collection.to_string();
    let doc_id     = id.to_owned();

    let exists = self
      .conn
      .call(move |conn| {
        let exists: bool = conn.query_row(
          "SELECT EXISTS (
             SELECT 1 FROM documents WHERE collection = ?1 AND doc_id = ?2
           )",
          rusqlite::params![collection, doc_id],
          |row| row.get(0),
        )?;
        Ok(exists)
      })
      .await?;
    Ok(exists)
  }

  async fn index(&self, contact: &Contact) -> Result<()> {
    self.put(contact).await
  }

  async fn get(&self, id: &str) -> Result<Option<Contact>> {
    self.fetch(id).await
  }

  async fn update(&self, id: &str, patch: &ContactPatch) -> Result<()> {
    let Some(mut contact) = self.fetch(id).await? else {
      return Ok(());
    };
    contact.details.merge(patch.details.clone());
    self.put(&contact).await
  }

  async fn delete(&self, id: &str) -> Result<()> {
    let collection = self.collection.to_string();
    let doc_id     = id.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM documents WHERE collection = ?1 AND doc_id = ?2",
          rusqlite::params![collection, doc_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn search(
    &self,
    query: Option<&str>,
    limit: Option<usize>,
  ) -> Result<Vec<Contact>> {
    let (sql, params) = search_sql(&self.collection, query, limit);
    tracing::debug!(%sql, "sqlite search");

    let bodies: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| {
            row.get(0)
          })?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    bodies
      .iter()
      .map(|b| serde_json::from_str(b).map_err(Into::into))
      .collect()
  }
}
