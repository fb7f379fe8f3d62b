//! [`ContactBook`]: the contact operations exposed over HTTP, on top of any
//! [`ContactStore`].
//!
//! Every check (validation, existence, name immutability) runs before the
//! store is written to, so a rejected request never leaves a partial write.
//! The exists-then-write sequence is not atomic; concurrent creates of the
//! same name can race.

use std::sync::Arc;

use crate::{
  Error, Result,
  contact::{Contact, ContactPatch, normalize_name},
  pagination::PageRequest,
  store::ContactStore,
};

/// Contact operations over a shared store handle.
///
/// Cloning is cheap; the store is reference-counted.
pub struct ContactBook<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactBook<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: ContactStore> ContactBook<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Create a contact from a decoded body. Fails with
  /// [`Error::AlreadyExists`] if the lowercased name is taken.
  pub async fn create(&self, patch: ContactPatch) -> Result<Contact> {
    let contact = patch.into_contact()?;
    if self.exists(&contact.name).await? {
      return Err(Error::AlreadyExists);
    }
    self.store.index(&contact).await.map_err(Error::store)?;
    Ok(contact)
  }

  pub async fn get(&self, name: &str) -> Result<Contact> {
    let id = normalize_name(name);
    self
      .store
      .get(&id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound)
  }

  /// Merge `patch` into the stored contact. `patch.name` may only repeat the
  /// target name (in any casing).
  ///
  /// Checks run in order: existence (404), name guard, field rules. The
  /// allow-list is applied earlier, when the body is decoded into a
  /// [`ContactPatch`], so an unknown key is a 400 even for a missing contact.
  pub async fn update(&self, name: &str, mut patch: ContactPatch) -> Result<()> {
    let id = normalize_name(name);
    if !self.exists(&id).await? {
      return Err(Error::NotFound);
    }
    if let Some(new_name) = patch.name.take()
      && !new_name.is_empty()
      && normalize_name(&new_name) != id
    {
      return Err(Error::NameChange);
    }
    patch.validate()?;
    self.store.update(&id, &patch).await.map_err(Error::store)
  }

  pub async fn delete(&self, name: &str) -> Result<()> {
    let id = normalize_name(name);
    if !self.exists(&id).await? {
      return Err(Error::NotFound);
    }
    self.store.delete(&id).await.map_err(Error::store)
  }

  /// List (no query) or search contacts, returning one page of hits.
  pub async fn list(
    &self,
    query: Option<&str>,
    page: PageRequest,
  ) -> Result<Vec<Contact>> {
    let query = query.filter(|q| !q.is_empty());
    let hits = self
      .store
      .search(query, page.fetch_limit())
      .await
      .map_err(Error::store)?;
    Ok(page.window(hits))
  }

  async fn exists(&self, id: &str) -> Result<bool> {
    self.store.exists(id).await.map_err(Error::store)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::testing::MemoryStore;

  fn book() -> ContactBook<MemoryStore> {
    ContactBook::new(Arc::new(MemoryStore::default()))
  }

  fn patch(value: serde_json::Value) -> ContactPatch {
    ContactPatch::from_json(value).expect("valid patch")
  }

  #[tokio::test]
  async fn create_then_get_returns_submitted_fields() {
    let b = book();
    let created = b
      .create(patch(json!({ "name": "john baker", "mobile_phone": "1234567890" })))
      .await
      .unwrap();
    assert_eq!(
      serde_json::to_value(&created).unwrap(),
      json!({ "name": "john baker", "mobile_phone": "1234567890" })
    );
    assert_eq!(b.get("john baker").await.unwrap(), created);
  }

  #[tokio::test]
  async fn create_is_case_insensitive_on_name() {
    let b = book();
    b.create(patch(json!({ "name": "John Baker" }))).await.unwrap();
    assert!(matches!(
      b.create(patch(json!({ "name": "john baker" }))).await,
      Err(Error::AlreadyExists)
    ));
    assert!(matches!(
      b.create(patch(json!({ "name": "JOHN BAKER" }))).await,
      Err(Error::AlreadyExists)
    ));
    assert_eq!(b.get("JoHn BaKeR").await.unwrap().name, "john baker");
  }

  #[tokio::test]
  async fn invalid_create_writes_nothing() {
    let b = book();
    let result = b
      .create(patch(json!({ "name": "jazzy blues", "mobile_phone": "1".repeat(31) })))
      .await;
    assert!(matches!(result, Err(Error::TooLong { .. })));
    assert!(matches!(b.get("jazzy blues").await, Err(Error::NotFound)));
  }

  #[tokio::test]
  async fn get_missing_is_not_found() {
    assert!(matches!(book().get("zack baker").await, Err(Error::NotFound)));
  }

  #[tokio::test]
  async fn update_merges_rather_than_replaces() {
    let b = book();
    b.create(patch(json!({ "name": "john baker", "notes": "funny guy" })))
      .await
      .unwrap();
    b.update("john baker", patch(json!({ "mobile_phone": "1234567890" })))
      .await
      .unwrap();
    let got = b.get("john baker").await.unwrap();
    assert_eq!(
      serde_json::to_value(&got).unwrap(),
      json!({
        "name": "john baker",
        "notes": "funny guy",
        "mobile_phone": "1234567890",
      })
    );
  }

  #[tokio::test]
  async fn update_missing_is_not_found() {
    let result = book()
      .update("john baker", patch(json!({ "mobile_phone": "1234567890" })))
      .await;
    assert!(matches!(result, Err(Error::NotFound)));
  }

  #[tokio::test]
  async fn update_rejects_name_change() {
    let b = book();
    b.create(patch(json!({ "name": "john baker" }))).await.unwrap();
    assert!(matches!(
      b.update("john baker", patch(json!({ "name": "not john baker" }))).await,
      Err(Error::NameChange)
    ));
  }

  #[tokio::test]
  async fn update_accepts_same_name_in_other_casing() {
    let b = book();
    b.create(patch(json!({ "name": "john baker" }))).await.unwrap();
    b.update(
      "john baker",
      patch(json!({ "name": "John Baker", "notes": "hi" })),
    )
    .await
    .unwrap();
    let got = b.get("john baker").await.unwrap();
    assert_eq!(got.name, "john baker");
    assert_eq!(got.details.notes.as_deref(), Some("hi"));
  }

  #[tokio::test]
  async fn update_validates_fields() {
    let b = book();
    b.create(patch(json!({ "name": "john baker" }))).await.unwrap();
    assert!(matches!(
      b.update("john baker", patch(json!({ "email_address": "nope" }))).await,
      Err(Error::InvalidEmail)
    ));
  }

  #[tokio::test]
  async fn delete_then_get_is_not_found() {
    let b = book();
    b.create(patch(json!({ "name": "john baker" }))).await.unwrap();
    b.delete("john baker").await.unwrap();
    assert!(matches!(b.get("john baker").await, Err(Error::NotFound)));
    assert!(matches!(b.delete("john baker").await, Err(Error::NotFound)));
  }

  #[tokio::test]
  async fn list_pages_through_results() {
    let b = book();
    for name in ["a", "b", "c", "d", "e"] {
      b.create(patch(json!({ "name": name }))).await.unwrap();
    }
    let names = |cs: Vec<Contact>| cs.into_iter().map(|c| c.name).collect::<Vec<_>>();

    let page2 = b.list(None, PageRequest::new(2, 2).unwrap()).await.unwrap();
    assert_eq!(names(page2), ["c", "d"]);

    let page3 = b.list(None, PageRequest::new(2, 3).unwrap()).await.unwrap();
    assert_eq!(names(page3), ["e"]);

    let page4 = b.list(None, PageRequest::new(2, 4).unwrap()).await.unwrap();
    assert!(page4.is_empty());

    let all = b.list(None, PageRequest::all()).await.unwrap();
    assert_eq!(all.len(), 5);
  }

  #[tokio::test]
  async fn list_with_query_filters() {
    let b = book();
    b.create(patch(json!({ "name": "david jeffers", "address": "1234 Cherry Lane" })))
      .await
      .unwrap();
    b.create(patch(json!({ "name": "david heller", "address": "1234 Berry Lane" })))
      .await
      .unwrap();
    let hits = b.list(Some("Cherry"), PageRequest::default()).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "david jeffers");

    // An empty query lists everything.
    let hits = b.list(Some(""), PageRequest::default()).await.unwrap();
    assert_eq!(hits.len(), 2);
  }
}
