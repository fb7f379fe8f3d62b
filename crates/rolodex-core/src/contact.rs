//! Contact types: the only record kind in the Rolodex contact book.
//!
//! A contact is identified by its lowercased `name`. Every other attribute is
//! an optional string. Request bodies are decoded into a [`ContactPatch`],
//! which is checked against the allowed field set before any typed
//! deserialisation happens.

use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// The eleven field names a contact record may carry. The serialised names
/// match the JSON keys accepted on the wire.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ContactField {
  Name,
  FirstName,
  MiddleName,
  LastName,
  EmailAddress,
  Website,
  HomePhone,
  WorkPhone,
  MobilePhone,
  Address,
  Notes,
}

impl ContactField {
  /// Maximum length of the field's value, in characters.
  pub fn max_len(self) -> usize {
    match self {
      Self::Name => 122,
      Self::FirstName | Self::MiddleName | Self::LastName => 40,
      Self::EmailAddress => 200,
      Self::Website | Self::Address | Self::Notes => 255,
      Self::HomePhone | Self::WorkPhone | Self::MobilePhone => 30,
    }
  }

  pub fn as_str(self) -> &'static str { self.into() }

  /// The allowed field names, space separated, for error messages.
  pub fn allowed_list() -> String {
    Self::iter().map(Self::as_str).collect::<Vec<_>>().join(" ")
  }
}

/// Structural email check: `x@y.z` with no further `@`, matched from the
/// start of the value.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("valid email regex")
});

/// Check a single value against its field's length and format rules.
/// Empty values are treated as unset and always pass.
fn check_field(field: ContactField, value: &str) -> Result<()> {
  if value.is_empty() {
    return Ok(());
  }
  let limit = field.max_len();
  if value.chars().count() > limit {
    return Err(Error::TooLong { field, limit });
  }
  if field == ContactField::EmailAddress && !EMAIL.is_match(value) {
    return Err(Error::InvalidEmail);
  }
  Ok(())
}

/// Contact names are case-insensitive; the lowercase form is the id.
pub fn normalize_name(name: &str) -> String { name.to_lowercase() }

// ─── Details ─────────────────────────────────────────────────────────────────

/// Every optional attribute of a contact. Unset attributes are omitted from
/// the serialised form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub middle_name:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email_address: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub website:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub home_phone:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub work_phone:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mobile_phone:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:         Option<String>,
}

impl ContactDetails {
  /// Each attribute paired with its field tag, in declaration order.
  pub fn fields(&self) -> [(ContactField, Option<&str>); 10] {
    [
      (ContactField::FirstName, self.first_name.as_deref()),
      (ContactField::MiddleName, self.middle_name.as_deref()),
      (ContactField::LastName, self.last_name.as_deref()),
      (ContactField::EmailAddress, self.email_address.as_deref()),
      (ContactField::Website, self.website.as_deref()),
      (ContactField::HomePhone, self.home_phone.as_deref()),
      (ContactField::WorkPhone, self.work_phone.as_deref()),
      (ContactField::MobilePhone, self.mobile_phone.as_deref()),
      (ContactField::Address, self.address.as_deref()),
      (ContactField::Notes, self.notes.as_deref()),
    ]
  }

  /// Apply length and format rules; the first violation wins.
  pub fn validate(&self) -> Result<()> {
    for (field, value) in self.fields() {
      if let Some(value) = value {
        check_field(field, value)?;
      }
    }
    Ok(())
  }

  /// Overwrite every attribute that is set in `patch`; leave the rest alone.
  pub fn merge(&mut self, patch: ContactDetails) {
    fn take(dst: &mut Option<String>, src: Option<String>) {
      if src.is_some() {
        *dst = src;
      }
    }

    take(&mut self.first_name, patch.first_name);
    take(&mut self.middle_name, patch.middle_name);
    take(&mut self.last_name, patch.last_name);
    take(&mut self.email_address, patch.email_address);
    take(&mut self.website, patch.website);
    take(&mut self.home_phone, patch.home_phone);
    take(&mut self.work_phone, patch.work_phone);
    take(&mut self.mobile_phone, patch.mobile_phone);
    take(&mut self.address, patch.address);
    take(&mut self.notes, patch.notes);
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact. Serialises flat: `{"name": ..., "mobile_phone": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  /// Lowercased; doubles as the document id.
  pub name:    String,
  #[serde(flatten)]
  pub details: ContactDetails,
}

impl Contact {
  /// A contact with only a name. The name is normalised.
  pub fn named(name: &str) -> Self {
    Self {
      name:    normalize_name(name),
      details: ContactDetails::default(),
    }
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A decoded request body: the payload of a create or a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:    Option<String>,
  #[serde(flatten)]
  pub details: ContactDetails,
}

impl ContactPatch {
  /// Decode a raw request body. Bytes must be a JSON object.
  pub fn from_slice(bytes: &[u8]) -> Result<Self> {
    let value: Value = serde_json::from_slice(bytes)
      .map_err(|e| Error::Malformed(e.to_string()))?;
    Self::from_json(value)
  }

  /// Decode a JSON value, rejecting any key outside the allowed field set
  /// before the typed conversion.
  pub fn from_json(value: Value) -> Result<Self> {
    let Value::Object(map) = value else {
      return Err(Error::Malformed(
        "request body must be a JSON object".to_owned(),
      ));
    };
    check_allowed(&map)?;
    serde_json::from_value(Value::Object(map))
      .map_err(|e| Error::Malformed(e.to_string()))
  }

  /// Apply length and format rules to every supplied field.
  pub fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name {
      check_field(ContactField::Name, name)?;
    }
    self.details.validate()
  }

  /// Turn a create payload into a full contact: `name` must be present and
  /// non-empty, and is lowercased.
  pub fn into_contact(self) -> Result<Contact> {
    self.validate()?;
    let name = match self.name.as_deref() {
      Some(name) if !name.is_empty() => normalize_name(name),
      _ => return Err(Error::MissingName),
    };
    Ok(Contact { name, details: self.details })
  }
}

fn check_allowed(map: &Map<String, Value>) -> Result<()> {
  match map.keys().find(|k| ContactField::from_str(k).is_err()) {
    Some(key) => Err(Error::FieldNotAllowed(key.clone())),
    None => Ok(()),
  }
}
