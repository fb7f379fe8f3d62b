//! A minimal in-process store for exercising [`crate::ContactBook`].

use std::{collections::BTreeMap, convert::Infallible, sync::Mutex};

use crate::{
  contact::{Contact, ContactPatch},
  store::ContactStore,
};

#[derive(Default)]
pub struct MemoryStore {
  docs: Mutex<BTreeMap<String, Contact>>,
}

impl MemoryStore {
  fn docs(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Contact>> {
    self.docs.lock().unwrap()
  }
}

fn matches_terms(contact: &Contact, terms: &[String]) -> bool {
  let values = std::iter::once(contact.name.as_str())
    .chain(contact.details.fields().into_iter().filter_map(|(_, v)| v));
  values
    .map(str::to_lowercase)
    .any(|v| terms.iter().any(|t| v.contains(t.as_str())))
}

impl ContactStore for MemoryStore {
  type Error = Infallible;

  async fn exists(&self, id: &str) -> Result<bool, Infallible> {
    Ok(self.docs().contains_key(id))
  }

  async fn index(&self, contact: &Contact) -> Result<(), Infallible> {
    self.docs().insert(contact.name.clone(), contact.clone());
    Ok(())
  }

  async fn get(&self, id: &str) -> Result<Option<Contact>, Infallible> {
    Ok(self.docs().get(id).cloned())
  }

  async fn update(
    &self,
    id: &str,
    patch: &ContactPatch,
  ) -> Result<(), Infallible> {
    if let Some(doc) = self.docs().get_mut(id) {
      doc.details.merge(patch.details.clone());
    }
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<(), Infallible> {
    self.docs().remove(id);
    Ok(())
  }

  async fn search(
    &self,
    query: Option<&str>,
    limit: Option<usize>,
  ) -> Result<Vec<Contact>, Infallible> {
    let terms: Vec<String> = query
      .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
      .unwrap_or_default();
    Ok(
      self
        .docs()
        .values()
        .filter(|c| terms.is_empty() || matches_terms(c, &terms))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect(),
    )
  }
}
