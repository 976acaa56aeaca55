//! Submission types: one registration for one person or household.
//!
//! A submission is keyed by its normalised e-mail address. Re-submitting with
//! a known address replaces the stored record wholesale; only the `id`
//! survives.
//!
//! Field defaults live here and nowhere else: an omitted optional field and
//! its default value are indistinguishable once a [`NewSubmission`] has been
//! deserialised.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};
use thiserror::Error;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Whether the registrant intends to come.
///
/// Older data files use the German form values (`ja`, `vielleicht`, `nein`);
/// those parse to the same variants.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
  #[strum(to_string = "confirmed", serialize = "ja")]
  Confirmed,
  #[strum(to_string = "maybe", serialize = "vielleicht")]
  Maybe,
  #[strum(to_string = "declined", serialize = "nein")]
  Declined,
}

impl AttendanceStatus {
  /// Confirmed and maybe count towards popularity statistics.
  pub fn is_eligible(self) -> bool {
    matches!(self, Self::Confirmed | Self::Maybe)
  }
}

/// Car-pooling preference.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum RideshareIntent {
  #[default]
  #[strum(to_string = "none")]
  None,
  #[strum(to_string = "offering", serialize = "biete")]
  Offering,
  #[strum(to_string = "seeking", serialize = "suche")]
  Seeking,
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// A required field of a [`NewSubmission`] is missing or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("name is required")]
  MissingName,
  #[error("email is required")]
  MissingEmail,
}

/// The key used for upsert-by-email: the address lower-cased.
pub fn normalize_email(email: &str) -> String { email.to_lowercase() }

// ─── NewSubmission ───────────────────────────────────────────────────────────

/// Input to [`crate::registry::Registry::create_or_replace`].
/// `id` and `timestamp` are always set by the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
  #[serde(default, deserialize_with = "null_as_default")]
  pub name:                   String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub email:                  String,
  #[serde(
    default,
    alias = "teilnahmeStatus",
    deserialize_with = "blank_as_none"
  )]
  pub attendance_status:      Option<AttendanceStatus>,
  #[serde(
    default = "default_party_size",
    alias = "anzahlPersonen",
    deserialize_with = "party_size"
  )]
  pub party_size:             u32,
  #[serde(
    default,
    alias = "mitFahrgelegenheit",
    deserialize_with = "blank_as_default"
  )]
  pub rideshare_intent:       RideshareIntent,
  #[serde(
    default,
    alias = "ausgewaehlteSpiele",
    deserialize_with = "null_as_default"
  )]
  pub selected_catalog_items: Vec<u32>,
  #[serde(
    default,
    alias = "spieleWunschliste",
    deserialize_with = "null_as_default"
  )]
  pub wishlist_items:         Vec<String>,
  #[serde(default, alias = "alsHelfer", deserialize_with = "null_as_default")]
  pub volunteering:           bool,
  #[serde(default, alias = "helferArt", deserialize_with = "null_as_default")]
  pub volunteer_roles:        Vec<String>,
  #[serde(default, alias = "kommentar", deserialize_with = "null_as_default")]
  pub comment:                String,
  #[serde(
    default,
    alias = "keepEmailForFuture",
    deserialize_with = "null_as_default"
  )]
  pub retain_email_opt_in:    bool,
}

impl NewSubmission {
  /// Convenience constructor with every optional field at its default.
  pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      name:                   name.into(),
      email:                  email.into(),
      attendance_status:      None,
      party_size:             default_party_size(),
      rideshare_intent:       RideshareIntent::default(),
      selected_catalog_items: Vec::new(),
      wishlist_items:         Vec::new(),
      volunteering:           false,
      volunteer_roles:        Vec::new(),
      comment:                String::new(),
      retain_email_opt_in:    false,
    }
  }

  /// Name and e-mail must be present and non-empty. Nothing else is checked.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.name.is_empty() {
      return Err(ValidationError::MissingName);
    }
    if self.email.is_empty() {
      return Err(ValidationError::MissingEmail);
    }
    Ok(())
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// A stored registration. The JSON form is the wire format of the API and
/// the on-disk format of the submissions file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
  pub id:                     u64,
  pub name:                   String,
  pub email:                  String,
  /// Server-assigned; refreshed on every replace.
  pub timestamp:              DateTime<Utc>,
  #[serde(
    default,
    alias = "teilnahmeStatus",
    deserialize_with = "blank_as_none"
  )]
  pub attendance_status:      Option<AttendanceStatus>,
  #[serde(
    default = "default_party_size",
    alias = "anzahlPersonen",
    deserialize_with = "party_size"
  )]
  pub party_size:             u32,
  #[serde(
    default,
    alias = "mitFahrgelegenheit",
    deserialize_with = "blank_as_default"
  )]
  pub rideshare_intent:       RideshareIntent,
  #[serde(
    default,
    alias = "ausgewaehlteSpiele",
    deserialize_with = "null_as_default"
  )]
  pub selected_catalog_items: Vec<u32>,
  #[serde(
    default,
    alias = "spieleWunschliste",
    deserialize_with = "null_as_default"
  )]
  pub wishlist_items:         Vec<String>,
  #[serde(default, alias = "alsHelfer", deserialize_with = "null_as_default")]
  pub volunteering:           bool,
  #[serde(default, alias = "helferArt", deserialize_with = "null_as_default")]
  pub volunteer_roles:        Vec<String>,
  #[serde(default, alias = "kommentar", deserialize_with = "null_as_default")]
  pub comment:                String,
  #[serde(
    default,
    alias = "keepEmailForFuture",
    deserialize_with = "null_as_default"
  )]
  pub retain_email_opt_in:    bool,
}

impl Submission {
  /// Build a stored record from validated input.
  pub fn from_new(
    id: u64,
    timestamp: DateTime<Utc>,
    input: NewSubmission,
  ) -> Self {
    Self {
      id,
      timestamp,
      name: input.name,
      email: input.email,
      attendance_status: input.attendance_status,
      party_size: input.party_size,
      rideshare_intent: input.rideshare_intent,
      selected_catalog_items: input.selected_catalog_items,
      wishlist_items: input.wishlist_items,
      volunteering: input.volunteering,
      volunteer_roles: input.volunteer_roles,
      comment: input.comment,
      retain_email_opt_in: input.retain_email_opt_in,
    }
  }

  pub fn email_key(&self) -> String { normalize_email(&self.email) }

  /// Whether this submission counts towards popularity statistics.
  pub fn is_eligible(&self) -> bool {
    self.attendance_status.is_some_and(AttendanceStatus::is_eligible)
  }
}

// ─── Serde helpers ───────────────────────────────────────────────────────────

fn default_party_size() -> u32 { 1 }

/// A value of the expected type, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
  Expected(T),
  Other(IgnoredAny),
}

impl<T> Lenient<T> {
  fn expected(self) -> Option<T> {
    match self {
      Self::Expected(value) => Some(value),
      Self::Other(_) => None,
    }
  }
}

/// Anything but a positive whole number means a party of one.
fn party_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(
    Option::<Lenient<i64>>::deserialize(deserializer)?
      .and_then(Lenient::expected)
      .and_then(|n| u32::try_from(n).ok())
      .filter(|n| *n > 0)
      .unwrap_or_else(default_party_size),
  )
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a string enum. `null`, blank strings, unknown values and non-string
/// values all read as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr,
{
  let raw = Option::<Lenient<String>>::deserialize(deserializer)?
    .and_then(Lenient::expected);
  Ok(raw.and_then(|s| s.trim().parse().ok()))
}

fn blank_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr + Default,
{
  Ok(blank_as_none(deserializer)?.unwrap_or_default())
}
