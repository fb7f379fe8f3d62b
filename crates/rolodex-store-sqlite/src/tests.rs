//! Integration tests for `SqliteStore` against an in-memory database.

use rolodex_core::{
  contact::{Contact, ContactDetails, ContactPatch},
  store::ContactStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory("tests")
    .await
    .expect("in-memory store")
}

fn contact(name: &str, address: Option<&str>) -> Contact {
  Contact {
    name:    name.to_owned(),
    details: ContactDetails {
      address: address.map(str::to_owned),
      ..Default::default()
    },
  }
}

fn names(contacts: Vec<Contact>) -> Vec<String> {
  contacts.into_iter().map(|c| c.name).collect()
}

// ─── Documents ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn index_then_get_round_trips_the_document() {
  let s = store().await;
  let c = Contact {
    name:    "john baker".into(),
    details: ContactDetails {
      mobile_phone: Some("1234567890".into()),
      ..Default::default()
    },
  };

  assert!(!s.exists("john baker").await.unwrap());
  s.index(&c).await.unwrap();
  assert!(s.exists("john baker").await.unwrap());
  assert_eq!(s.get("john baker").await.unwrap(), Some(c));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert_eq!(s.get("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn index_replaces_existing_document() {
  let s = store().await;
  s.index(&contact("a", Some("old"))).await.unwrap();
  s.index(&contact("a", None)).await.unwrap();
  assert_eq!(s.get("a").await.unwrap(), Some(contact("a", None)));
}

#[tokio::test]
async fn update_merges_patch_fields() {
  let s = store().await;
  s.index(&contact("john baker", Some("123 Cherry Rd"))).await.unwrap();

  let patch = ContactPatch {
    name:    None,
    details: ContactDetails {
      notes: Some("funny guy".into()),
      ..Default::default()
    },
  };
  s.update("john baker", &patch).await.unwrap();

  let got = s.get("john baker").await.unwrap().unwrap();
  assert_eq!(got.details.address.as_deref(), Some("123 Cherry Rd"));
  assert_eq!(got.details.notes.as_deref(), Some("funny guy"));
}

#[tokio::test]
async fn update_missing_is_a_no_op() {
  let s = store().await;
  s.update("ghost", &ContactPatch::default()).await.unwrap();
  assert!(!s.exists("ghost").await.unwrap());
}

#[tokio::test]
async fn delete_removes_document() {
  let s = store().await;
  s.index(&contact("a", None)).await.unwrap();
  s.delete("a").await.unwrap();
  assert!(!s.exists("a").await.unwrap());
  // Deleting again is fine at the store level.
  s.delete("a").await.unwrap();
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn collections_are_isolated() {
  let dir = std::env::temp_dir().join(format!(
    "rolodex-collections-{}.sqlite",
    std::process::id()
  ));
  let _ = std::fs::remove_file(&dir);

  let prod = SqliteStore::open(&dir, "contacts").await.unwrap();
  let test = SqliteStore::open(&dir, "tests").await.unwrap();
  prod.index(&contact("a", None)).await.unwrap();

  assert!(prod.exists("a").await.unwrap());
  assert!(!test.exists("a").await.unwrap());
  assert!(test.search(None, None).await.unwrap().is_empty());

  drop((prod, test));
  let _ = std::fs::remove_file(&dir);
}

// ─── Search ──────────────────────────────────────────────────────────────────

async fn seeded() -> SqliteStore {
  let s = store().await;
  for (name, address) in [
    ("david jeffers", "1234 Cherry Lane"),
    ("david heller", "1234 Berry Lane"),
    ("david ross", "4321 Cherry Lane"),
    ("david frank", "100 Candy Lane"),
  ] {
    s.index(&contact(name, Some(address))).await.unwrap();
  }
  s
}

#[tokio::test]
async fn search_without_query_orders_by_id() {
  let s = seeded().await;
  let all = s.search(None, None).await.unwrap();
  assert_eq!(
    names(all),
    ["david frank", "david heller", "david jeffers", "david ross"]
  );
}

#[tokio::test]
async fn search_respects_limit() {
  let s = seeded().await;
  let two = s.search(None, Some(2)).await.unwrap();
  assert_eq!(names(two), ["david frank", "david heller"]);
}

#[tokio::test]
async fn search_matches_field_values_case_insensitively() {
  let s = seeded().await;
  let hits = s.search(Some("cherry"), None).await.unwrap();
  assert_eq!(names(hits), ["david jeffers", "david ross"]);
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
  let s = store().await;
  s.index(&contact("emile zola", Some("Rue de l'Église"))).await.unwrap();
  s.index(&contact("anna", Some("Ålesund"))).await.unwrap();

  let hits = s.search(Some("ÉGLISE"), None).await.unwrap();
  assert_eq!(names(hits), ["emile zola"]);
  let hits = s.search(Some("åLESUND"), None).await.unwrap();
  assert_eq!(names(hits), ["anna"]);
}

#[tokio::test]
async fn search_terms_are_alternatives() {
  let s = seeded().await;
  let hits = s.search(Some("Candy Berry"), None).await.unwrap();
  assert_eq!(names(hits), ["david frank", "david heller"]);
}

#[tokio::test]
async fn search_does_not_match_field_names() {
  let s = seeded().await;
  assert!(s.search(Some("address"), None).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = seeded().await;
  assert!(s.search(Some("%"), None).await.unwrap().is_empty());
}
