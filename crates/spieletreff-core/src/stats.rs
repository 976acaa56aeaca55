//! Derived views over the submission list.
//!
//! Nothing here is stored authoritatively: every type can be rebuilt from the
//! current submissions at any time, and [`PopularityStats`] is rebuilt after
//! every write.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::submission::{AttendanceStatus, Submission};

// ─── Popularity ──────────────────────────────────────────────────────────────

/// Selection count and share for one catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStat {
  pub count:      u32,
  /// Share of eligible submissions that picked the item, in whole percent.
  pub percentage: u32,
}

/// Game popularity among eligible (confirmed or maybe) submissions.
///
/// On the wire the item map is flattened next to the total:
/// `{"5": {"count": 3, "percentage": 75}, "totalSubmissions": 4}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireStats", into = "WireStats")]
pub struct PopularityStats {
  pub total_eligible: u32,
  /// Only items selected at least once are present.
  pub items:          BTreeMap<u32, ItemStat>,
}

/// One row of [`PopularityStats::ranked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
  pub catalog_item_id: u32,
  pub count:           u32,
  pub percentage:      u32,
}

impl PopularityStats {
  /// Items ordered by percentage, then count (both descending), then id.
  pub fn ranked(&self) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = self
      .items
      .iter()
      .map(|(&catalog_item_id, stat)| RankedItem {
        catalog_item_id,
        count: stat.count,
        percentage: stat.percentage,
      })
      .collect();
    ranked.sort_by(|a, b| {
      b.percentage
        .cmp(&a.percentage)
        .then(b.count.cmp(&a.count))
        .then(a.catalog_item_id.cmp(&b.catalog_item_id))
    });
    ranked
  }

  /// The `n` most popular items.
  pub fn top(&self, n: usize) -> Vec<RankedItem> {
    let mut ranked = self.ranked();
    ranked.truncate(n);
    ranked
  }
}

/// Rebuild popularity statistics from the full submission list.
///
/// Selections are a set per submission: a catalog id listed twice by the
/// same submission counts once, so no percentage exceeds 100.
pub fn recompute(submissions: &[Submission]) -> PopularityStats {
  let eligible: Vec<&Submission> =
    submissions.iter().filter(|s| s.is_eligible()).collect();
  let total_eligible = eligible.len() as u32;

  let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
  for submission in &eligible {
    let picked: BTreeSet<u32> =
      submission.selected_catalog_items.iter().copied().collect();
    for id in picked {
      *counts.entry(id).or_default() += 1;
    }
  }

  if total_eligible == 0 {
    return PopularityStats::default();
  }

  let items = counts
    .into_iter()
    .map(|(id, count)| {
      (id, ItemStat { count, percentage: percentage(count, total_eligible) })
    })
    .collect();

  PopularityStats { total_eligible, items }
}

/// Nearest whole percent; exact halves round away from zero.
fn percentage(count: u32, total: u32) -> u32 {
  let (count, total) = (u64::from(count), u64::from(total));
  ((count * 200 + total) / (total * 2)) as u32
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct WireStats {
  #[serde(flatten)]
  items:             BTreeMap<String, ItemStat>,
  #[serde(rename = "totalSubmissions", default)]
  total_submissions: u32,
}

#[derive(Debug, Error)]
#[error("invalid catalog item id {0:?}")]
pub struct InvalidItemId(String);

impl TryFrom<WireStats> for PopularityStats {
  type Error = InvalidItemId;

  fn try_from(wire: WireStats) -> Result<Self, Self::Error> {
    let items = wire
      .items
      .into_iter()
      .map(|(key, stat)| match key.parse::<u32>() {
        Ok(id) => Ok((id, stat)),
        Err(_) => Err(InvalidItemId(key)),
      })
      .collect::<Result<_, _>>()?;
    Ok(Self { total_eligible: wire.total_submissions, items })
  }
}

impl From<PopularityStats> for WireStats {
  fn from(stats: PopularityStats) -> Self {
    Self {
      items:             stats
        .items
        .into_iter()
        .map(|(id, stat)| (id.to_string(), stat))
        .collect(),
      total_submissions: stats.total_eligible,
    }
  }
}

// ─── Wish list ───────────────────────────────────────────────────────────────

/// A free-text game wish and how often it was named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
  /// Trimmed, lower-cased form of the wish.
  pub name:  String,
  pub count: u32,
}

/// Tally wish-list entries across all submissions, most wished first.
pub fn wishlist_tally(submissions: &[Submission]) -> Vec<WishlistEntry> {
  let mut counts: HashMap<String, u32> = HashMap::new();
  for wish in submissions.iter().flat_map(|s| &s.wishlist_items) {
    let name = wish.trim().to_lowercase();
    if !name.is_empty() {
      *counts.entry(name).or_default() += 1;
    }
  }

  let mut tally: Vec<WishlistEntry> = counts
    .into_iter()
    .map(|(name, count)| WishlistEntry { name, count })
    .collect();
  tally.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
  tally
}

// ─── Attendance ──────────────────────────────────────────────────────────────

/// Head counts for the organisers' overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
  pub total:           u32,
  pub confirmed:       u32,
  pub maybe:           u32,
  pub declined:        u32,
  /// Submissions without an attendance status.
  pub undecided:       u32,
  pub volunteers:      u32,
  /// Sum of party sizes over confirmed submissions.
  pub expected_guests: u32,
}

impl AttendanceSummary {
  pub fn from_submissions(submissions: &[Submission]) -> Self {
    let mut summary = Self::default();
    for s in submissions {
      summary.total += 1;
      match s.attendance_status {
        Some(AttendanceStatus::Confirmed) => {
          summary.confirmed += 1;
          summary.expected_guests += s.party_size;
        }
        Some(AttendanceStatus::Maybe) => summary.maybe += 1,
        Some(AttendanceStatus::Declined) => summary.declined += 1,
        None => summary.undecided += 1,
      }
      if s.volunteering {
        summary.volunteers += 1;
      }
    }
    summary
  }
}
