//! Tests for `JsonFileStore` against temporary directories.

use chrono::Utc;
use spieletreff_core::{
  registry::Registry,
  stats::{self, ItemStat, PopularityStats},
  store::RegistrationBackend,
  submission::{AttendanceStatus, NewSubmission, Submission},
};
use tempfile::TempDir;

use crate::{Error, JsonFileStore, STATS_FILE, SUBMISSIONS_FILE};

async fn store() -> (TempDir, JsonFileStore) {
  let dir = tempfile::tempdir().expect("temp dir");
  let store = JsonFileStore::open_dir(dir.path()).await.expect("store");
  (dir, store)
}

fn confirmed(id: u64, email: &str, items: &[u32]) -> Submission {
  let mut input = NewSubmission::new("Guest", email);
  input.attendance_status = Some(AttendanceStatus::Confirmed);
  input.selected_catalog_items = items.to_vec();
  Submission::from_new(id, Utc::now(), input)
}

// ─── Layout ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_dir_creates_missing_directories() {
  let dir = tempfile::tempdir().unwrap();
  let data = dir.path().join("nested").join("data");

  let store = JsonFileStore::open_dir(&data).await.unwrap();
  assert!(data.is_dir());
  assert_eq!(store.submissions_path(), data.join(SUBMISSIONS_FILE));
  assert_eq!(store.stats_path(), data.join(STATS_FILE));
}

#[tokio::test]
async fn missing_files_read_as_none() {
  let (_dir, s) = store().await;
  assert!(s.load_submissions().await.unwrap().is_none());
  assert!(s.load_stats().await.unwrap().is_none());
}

// ─── Submissions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn saved_submissions_read_back() {
  let (_dir, s) = store().await;
  let list = vec![confirmed(1, "a@x.com", &[2]), confirmed(2, "b@x.com", &[])];

  s.save_submissions(&list).await.unwrap();
  assert_eq!(s.load_submissions().await.unwrap(), Some(list));
}

#[tokio::test]
async fn save_overwrites_previous_content() {
  let (_dir, s) = store().await;
  s.save_submissions(&[confirmed(1, "a@x.com", &[]), confirmed(2, "b@x.com", &[])])
    .await
    .unwrap();
  s.save_submissions(&[confirmed(1, "a@x.com", &[])]).await.unwrap();

  assert_eq!(s.load_submissions().await.unwrap().unwrap().len(), 1);
}

#[tokio::test]
async fn corrupt_submissions_file_is_an_error() {
  let (_dir, s) = store().await;
  std::fs::write(s.submissions_path(), "[{ not json").unwrap();

  let err = s.load_submissions().await.unwrap_err();
  assert!(matches!(err, Error::Json { .. }));
}

#[tokio::test]
async fn legacy_file_loads() {
  let (_dir, s) = store().await;
  std::fs::write(
    s.submissions_path(),
    r#"[
  {
    "id": 1,
    "name": "Alice",
    "email": "alice@example.com",
    "timestamp": "2025-04-02T17:05:11.000Z",
    "teilnahmeStatus": "ja",
    "anzahlPersonen": 2,
    "mitFahrgelegenheit": "",
    "ausgewaehlteSpiele": [2, 4],
    "spieleWunschliste": [],
    "alsHelfer": false,
    "helferArt": [],
    "kommentar": ""
  }
]"#,
  )
  .unwrap();

  let list = s.load_submissions().await.unwrap().unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].attendance_status, Some(AttendanceStatus::Confirmed));
  assert_eq!(list[0].selected_catalog_items, vec![2, 4]);
  assert!(!list[0].retain_email_opt_in);
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_file_uses_flat_wire_shape() {
  let (_dir, s) = store().await;
  let stats = stats::recompute(&[
    confirmed(1, "a@x.com", &[5]),
    confirmed(2, "b@x.com", &[5, 7]),
  ]);
  s.save_stats(&stats).await.unwrap();

  let raw: serde_json::Value =
    serde_json::from_slice(&std::fs::read(s.stats_path()).unwrap()).unwrap();
  assert_eq!(raw["totalSubmissions"], 2);
  assert_eq!(raw["5"]["count"], 2);
  assert_eq!(raw["7"]["percentage"], 50);

  assert_eq!(s.load_stats().await.unwrap(), Some(stats));
}

#[tokio::test]
async fn unwritable_location_is_an_io_error() {
  let dir = tempfile::tempdir().unwrap();
  // A directory where the stats file should be makes the write fail.
  let stats_path = dir.path().join("stats");
  std::fs::create_dir(&stats_path).unwrap();
  let s = JsonFileStore::open(dir.path().join("subs.json"), &stats_path)
    .await
    .unwrap();

  let err = s.save_stats(&PopularityStats::default()).await.unwrap_err();
  assert!(matches!(err, Error::Io { .. }));
}

// ─── With the registry ───────────────────────────────────────────────────────

#[tokio::test]
async fn registry_state_survives_restart() {
  let (dir, s) = store().await;
  let registry = Registry::open(s).await;
  let mut input = NewSubmission::new("Alice", "alice@example.com");
  input.attendance_status = Some(AttendanceStatus::Maybe);
  input.selected_catalog_items = vec![3];
  registry.create_or_replace(input).await.unwrap();
  drop(registry);

  let reopened = Registry::open(JsonFileStore::open_dir(dir.path()).await.unwrap()).await;
  let list = reopened.list_submissions().await;
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].id, 1);
  assert_eq!(
    reopened.load_stats().await.items[&3],
    ItemStat { count: 1, percentage: 100 }
  );
}

#[tokio::test]
async fn registry_fails_open_on_corrupt_file() {
  let (dir, s) = store().await;
  std::fs::write(s.submissions_path(), "garbage").unwrap();

  let registry = Registry::open(s).await;
  assert!(registry.list_submissions().await.is_empty());

  // The stats file was still refreshed from the empty list.
  let reopened = JsonFileStore::open_dir(dir.path()).await.unwrap();
  assert_eq!(
    reopened.load_stats().await.unwrap(),
    Some(PopularityStats::default())
  );
}
