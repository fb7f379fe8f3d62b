//! URL and body construction for Elasticsearch requests, plus the response
//! shapes we read back.

use reqwest::Url;
use rolodex_core::contact::{Contact, ContactPatch};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{Error, Result};

/// Elasticsearch's default `index.max_result_window`.
pub(crate) const MAX_RESULT_WINDOW: usize = 10_000;

/// Append `segments` to `base`'s path, percent-encoding each one. A contact
/// id such as `john baker` stays a single segment.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
  let mut url = base.clone();
  url
    .path_segments_mut()
    .map_err(|()| Error::Url {
      url:    base.to_string(),
      reason: "cannot be used as a base url".to_owned(),
    })?
    .pop_if_empty()
    .extend(segments);
  Ok(url)
}

/// `_search` body: `match_all` without a query, `query_string` with one.
pub(crate) fn search_body(query: Option<&str>, size: usize) -> Value {
  let query = match query {
    Some(q) => json!({ "query_string": { "query": q } }),
    None => json!({ "match_all": {} }),
  };
  json!({ "size": size, "query": query })
}

/// `_update` body. Only the attributes are sent; the id never changes.
pub(crate) fn update_body(patch: &ContactPatch) -> Result<Value> {
  Ok(json!({ "doc": serde_json::to_value(&patch.details)? }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetResponse {
  #[serde(rename = "_source")]
  pub source: Contact,
}

/// `_search` response filtered with `filter_path=hits.hits._source`. With no
/// hits Elasticsearch drops the whole path and returns `{}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
  #[serde(default)]
  hits: Hits,
}

#[derive(Debug, Default, Deserialize)]
struct Hits {
  #[serde(default)]
  hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
  #[serde(rename = "_source")]
  source: Contact,
}

impl SearchResponse {
  pub fn into_contacts(self) -> Vec<Contact> {
    self.hits.hits.into_iter().map(|h| h.source).collect()
  }
}
