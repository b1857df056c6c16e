//! [`Tracker`] — the add / update / list operations over a [`TableStore`].
//!
//! Every operation loads its own copy of each table, mutates the copy and
//! writes it back whole. The two tables are read concurrently, and the two
//! writes of a mutation are dispatched concurrently; both are joined before
//! the operation returns. Nothing is shared between calls, so two processes
//! running against the same files can still race (last writer wins).

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
  date::today,
  level::ResetLevel,
  record::{RevisionTable, SeenRecord, SeenTable},
  schedule::build_schedule,
  store::TableStore,
  topic::Topic,
};

// ─── Results ─────────────────────────────────────────────────────────────────

/// Outcome of [`Tracker::add_topic`].
#[derive(Debug, Clone, Serialize)]
pub struct Added {
  pub record:    SeenRecord,
  /// The review dates generated for the new topic.
  pub scheduled: Vec<NaiveDate>,
}

/// Outcome of [`Tracker::update_entry`].
#[derive(Debug, Clone, Serialize)]
pub struct Updated {
  pub record:    SeenRecord,
  /// Revisions rows removed from the cutoff date onwards.
  pub purged:    usize,
  /// The regenerated review dates.
  pub scheduled: Vec<NaiveDate>,
}

/// A topic due for review, joined with its Seen row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueEntry {
  pub topic:          Topic,
  pub first_reviewed: NaiveDate,
  pub reset_level:    ResetLevel,
  pub url:            Option<String>,
}

/// Outcome of [`Tracker::list_due`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueList {
  pub date:    NaiveDate,
  pub entries: Vec<DueEntry>,
  /// Topics scheduled on `date` that have no Seen row.
  pub orphans: Vec<Topic>,
}

impl DueList {
  /// True when nothing at all is scheduled on the date.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty() && self.orphans.is_empty()
  }
}

// ─── Tracker ─────────────────────────────────────────────────────────────────

/// Spaced-repetition operations backed by a [`TableStore`].
pub struct Tracker<S> {
  store: S,
}

impl<S: TableStore> Tracker<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  async fn load_tables(&self) -> Result<(SeenTable, RevisionTable), S::Error> {
    let (seen, revisions) =
      tokio::try_join!(self.store.load_seen(), self.store.load_revisions())?;
    debug!(seen = seen.len(), revisions = revisions.len(), "loaded tables");
    Ok((seen, revisions))
  }

  async fn save_tables(
    &self,
    seen: &SeenTable,
    revisions: &RevisionTable,
  ) -> Result<(), S::Error> {
    tokio::try_join!(
      self.store.save_seen(seen),
      self.store.save_revisions(revisions)
    )?;
    debug!(seen = seen.len(), revisions = revisions.len(), "saved tables");
    Ok(())
  }

  /// Record a newly studied topic and schedule its reviews from level 0.
  ///
  /// `date` defaults to today. A blank `url` is stored as no URL. Fails with
  /// [`Error::DuplicateTopic`](crate::Error::DuplicateTopic) if the topic is
  /// already in the Seen table, in which case nothing is written.
  pub async fn add_topic(
    &self,
    topic: &str,
    date: Option<NaiveDate>,
    url: Option<String>,
  ) -> Result<Added, S::Error> {
    let topic = Topic::new(topic)?;
    let date = date.unwrap_or_else(today);
    let url = url
      .map(|u| u.trim().to_owned())
      .filter(|u| !u.is_empty());

    let (mut seen, revisions) = self.load_tables().await?;

    let record = SeenRecord {
      topic: topic.clone(),
      first_reviewed: date,
      reset_level: ResetLevel::MIN,
      url,
    };
    seen.insert(record.clone())?;

    let (revisions, scheduled) =
      build_schedule(revisions, &topic, date, ResetLevel::MIN.into())?;

    self.save_tables(&seen, &revisions).await?;

    info!(%topic, %date, reviews = scheduled.len(), "added topic");
    Ok(Added { record, scheduled })
  }

  /// Restart an existing topic's schedule from `cutoff` at `reset_level`.
  ///
  /// The Seen row takes the new date and level, every Revisions row for the
  /// topic dated on or after `cutoff` is dropped, and a fresh schedule is
  /// merged in. `cutoff` defaults to today. All validation happens before
  /// anything is written.
  pub async fn update_entry(
    &self,
    topic: &str,
    cutoff: Option<NaiveDate>,
    reset_level: i64,
  ) -> Result<Updated, S::Error> {
    let level = ResetLevel::try_from(reset_level)?;
    let topic = Topic::new(topic)?;
    let cutoff = cutoff.unwrap_or_else(today);

    let (mut seen, mut revisions) = self.load_tables().await?;

    let record = seen.reset(&topic, cutoff, level)?.clone();

    let purged = revisions.purge_from(&topic, cutoff);
    let (revisions, scheduled) =
      build_schedule(revisions, &topic, cutoff, level.into())?;

    self.save_tables(&seen, &revisions).await?;

    info!(%topic, %cutoff, %level, purged, "updated topic");
    Ok(Updated { record, purged, scheduled })
  }

  /// Topics due on `date` (default today), joined with their Seen rows.
  ///
  /// A scheduled topic missing from the Seen table is reported in
  /// [`DueList::orphans`] and logged, and the rest of the listing carries on.
  pub async fn list_due(&self, date: Option<NaiveDate>) -> Result<DueList, S::Error> {
    let date = date.unwrap_or_else(today);
    let (seen, revisions) = self.load_tables().await?;

    let mut entries = Vec::new();
    let mut orphans = Vec::new();
    for topic in revisions.due_on(date) {
      match seen.get(topic) {
        Some(row) => entries.push(DueEntry {
          topic:          row.topic.clone(),
          first_reviewed: row.first_reviewed,
          reset_level:    row.reset_level,
          url:            row.url.clone(),
        }),
        None => {
          warn!(%topic, %date, "topic is scheduled for revision but has no seen record");
          orphans.push(topic.clone());
        }
      }
    }

    Ok(DueList { date, entries, orphans })
  }

  /// The remaining review dates for `topic` on or after `from` (default
  /// today).
  pub async fn upcoming(
    &self,
    topic: &str,
    from: Option<NaiveDate>,
  ) -> Result<Vec<NaiveDate>, S::Error> {
    let topic = Topic::new(topic)?;
    let from = from.unwrap_or_else(today);
    let (seen, revisions) = self.load_tables().await?;

    if !seen.contains(&topic) {
      return Err(crate::Error::TopicNotFound(topic).into());
    }

    Ok(revisions.dates_for(&topic).filter(|d| *d >= from).collect())
  }
}
