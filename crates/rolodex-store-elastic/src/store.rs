//! [`ElasticStore`], the Elasticsearch implementation of [`ContactStore`].

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Response, StatusCode, Url};
use rolodex_core::{
  contact::{Contact, ContactPatch},
  store::ContactStore,
};

use crate::{
  Error, Result,
  request::{
    GetResponse, MAX_RESULT_WINDOW, SearchResponse, endpoint, search_body,
    update_body,
  },
};

/// Writes wait for the next refresh so a following search sees them.
const REFRESH: (&str, &str) = ("refresh", "wait_for");

/// A Rolodex document store backed by one Elasticsearch index.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ElasticStore {
  client: Client,
  base:   Url,
  index:  Arc<str>,
}

impl ElasticStore {
  /// Build a store for `index` on the cluster at `url`. No request is made.
  pub fn new(url: &str, index: &str) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Self::with_client(client, url, index)
  }

  /// Like [`ElasticStore::new`] with a caller-built client.
  pub fn with_client(client: Client, url: &str, index: &str) -> Result<Self> {
    let base = Url::parse(url).map_err(|e| Error::Url {
      url:    url.to_owned(),
      reason: e.to_string(),
    })?;
    if base.cannot_be_a_base() {
      return Err(Error::Url {
        url:    url.to_owned(),
        reason: "cannot be used as a base url".to_owned(),
      });
    }
    Ok(Self { client, base, index: index.into() })
  }

  pub fn index_name(&self) -> &str { &self.index }

  /// Create the index if it does not exist yet.
  pub async fn ensure_index(&self) -> Result<()> {
    let url = endpoint(&self.base, &[&*self.index])?;
    let resp = self.client.head(url.clone()).send().await?;
    if resp.status() != StatusCode::NOT_FOUND {
      check(resp).await?;
      return Ok(());
    }

    tracing::info!(index = %self.index, "creating elasticsearch index");
    let resp = self.client.put(url).send().await?;
    check(resp).await?;
    Ok(())
  }

  fn doc_url(&self, id: &str) -> Result<Url> {
    endpoint(&self.base, &[&*self.index, "_doc", id])
  }
}

/// Pass successful responses through; turn anything else into
/// [`Error::Status`] with the response body attached.
async fn check(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  Err(Error::Status { status, body })
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for ElasticStore {
  type Error = Error;

  async fn exists(&self, id: &str) -> Result<bool> {
    let resp = self.client.head(self.doc_url(id)?).send().await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(false);
    }
    check(resp).await?;
    Ok(true)
  }

  async fn index(&self, contact: &Contact) -> Result<()> {
    let resp = self
      .client
      .put(self.doc_url(&contact.name)?)
      .query(&[REFRESH])
      .json(contact)
      .send()
      .await?;
    check(resp).await?;
    Ok(())
  }

  async fn get(&self, id: &str) -> Result<Option<Contact>> {
    let resp = self.client.get(self.doc_url(id)?).send().await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    let doc: GetResponse = check(resp).await?.json().await?;
    Ok(Some(doc.source))
  }

  async fn update(&self, id: &str, patch: &ContactPatch) -> Result<()> {
    let url = endpoint(&self.base, &[&*self.index, "_update", id])?;
    let resp = self
      .client
      .post(url)
      .query(&[REFRESH])
      .json(&update_body(patch)?)
      .send()
      .await?;
    check(resp).await?;
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<()> {
    let resp = self
      .client
      .delete(self.doc_url(id)?)
      .query(&[REFRESH])
      .send()
      .await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(());
    }
    check(resp).await?;
    Ok(())
  }

  async fn search(
    &self,
    query: Option<&str>,
    limit: Option<usize>,
  ) -> Result<Vec<Contact>> {
    let size = limit.map_or(MAX_RESULT_WINDOW, |n| n.min(MAX_RESULT_WINDOW));
    let url = endpoint(&self.base, &[&*self.index, "_search"])?;
    tracing::debug!(index = %self.index, ?query, size, "elasticsearch search");

    let resp = self
      .client
      .post(url)
      .query(&[("filter_path", "hits.hits._source")])
      .json(&search_body(query, size))
      .send()
      .await?;
    let found: SearchResponse = check(resp).await?.json().await?;
    Ok(found.into_contacts())
  }
}
