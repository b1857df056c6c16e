//! The two persisted tables and their row types.
//!
//! Both tables are loaded whole, mutated in memory and written back whole.
//! Topic uniqueness in [`SeenTable`] and `(date, topic)` uniqueness in
//! [`RevisionTable`] are enforced here, not by the storage backend.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, level::ResetLevel, topic::Topic};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One studied topic: when it was (last re)started and from which level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenRecord {
  pub topic:          Topic,
  pub first_reviewed: NaiveDate,
  pub reset_level:    ResetLevel,
  pub url:            Option<String>,
}

/// "`topic` is due on `date`". Field order gives the table its
/// date-then-topic ordering.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RevisionRecord {
  pub date:  NaiveDate,
  pub topic: Topic,
}

// ─── Seen ────────────────────────────────────────────────────────────────────

/// The Seen table: one row per topic, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenTable {
  rows: Vec<SeenRecord>,
}

impl SeenTable {
  pub fn new() -> Self { Self::default() }

  /// Build a table from loaded rows, rejecting repeated topics.
  pub fn from_rows(rows: impl IntoIterator<Item = SeenRecord>) -> Result<Self> {
    let mut table = Self::new();
    for row in rows {
      table.insert(row)?;
    }
    Ok(table)
  }

  pub fn get(&self, topic: &Topic) -> Option<&SeenRecord> {
    self.rows.iter().find(|r| &r.topic == topic)
  }

  pub fn contains(&self, topic: &Topic) -> bool { self.get(topic).is_some() }

  /// Append a new row. Fails with [`Error::DuplicateTopic`] if the topic is
  /// already present; the table is unchanged in that case.
  pub fn insert(&mut self, record: SeenRecord) -> Result<()> {
    if self.contains(&record.topic) {
      return Err(Error::DuplicateTopic(record.topic));
    }
    self.rows.push(record);
    Ok(())
  }

  /// Restart an existing topic from `date` at `level`.
  pub fn reset(
    &mut self,
    topic: &Topic,
    date: NaiveDate,
    level: ResetLevel,
  ) -> Result<&SeenRecord> {
    let row = self
      .rows
      .iter_mut()
      .find(|r| &r.topic == topic)
      .ok_or_else(|| Error::TopicNotFound(topic.clone()))?;
    row.first_reviewed = date;
    row.reset_level = level;
    Ok(&*row)
  }

  pub fn iter(&self) -> impl Iterator<Item = &SeenRecord> { self.rows.iter() }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

impl<'a> IntoIterator for &'a SeenTable {
  type Item = &'a SeenRecord;
  type IntoIter = std::slice::Iter<'a, SeenRecord>;

  fn into_iter(self) -> Self::IntoIter { self.rows.iter() }
}

// ─── Revisions ───────────────────────────────────────────────────────────────

/// The Revisions table: a set of `(date, topic)` pairs, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionTable {
  rows: BTreeSet<RevisionRecord>,
}

impl RevisionTable {
  pub fn new() -> Self { Self::default() }

  /// Add a row. Returns `false` if the pair was already present.
  pub fn insert(&mut self, record: RevisionRecord) -> bool {
    self.rows.insert(record)
  }

  pub fn contains(&self, date: NaiveDate, topic: &Topic) -> bool {
    self.rows.contains(&RevisionRecord { date, topic: topic.clone() })
  }

  /// Topics due on `date`, in topic order.
  pub fn due_on(&self, date: NaiveDate) -> impl Iterator<Item = &Topic> {
    let first = RevisionRecord { date, topic: Topic::lowest() };
    self
      .rows
      .range(first..)
      .take_while(move |r| r.date == date)
      .map(|r| &r.topic)
  }

  /// Every date `topic` is scheduled on, ascending.
  pub fn dates_for<'a>(
    &'a self,
    topic: &'a Topic,
  ) -> impl Iterator<Item = NaiveDate> + 'a {
    self
      .rows
      .iter()
      .filter(move |r| &r.topic == topic)
      .map(|r| r.date)
  }

  /// Drop every row for `topic` dated on or after `cutoff`. Returns how many
  /// rows were removed. Rows before the cutoff are history and are kept.
  pub fn purge_from(&mut self, topic: &Topic, cutoff: NaiveDate) -> usize {
    let before = self.rows.len();
    self.rows.retain(|r| !(&r.topic == topic && r.date >= cutoff));
    before - self.rows.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &RevisionRecord> {
    self.rows.iter()
  }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

impl Extend<RevisionRecord> for RevisionTable {
  fn extend<I: IntoIterator<Item = RevisionRecord>>(&mut self, iter: I) {
    self.rows.extend(iter);
  }
}

impl FromIterator<RevisionRecord> for RevisionTable {
  fn from_iter<I: IntoIterator<Item = RevisionRecord>>(iter: I) -> Self {
    Self { rows: iter.into_iter().collect() }
  }
}

impl<'a> IntoIterator for &'a RevisionTable {
  type Item = &'a RevisionRecord;
  type IntoIter = std::collections::btree_set::Iter<'a, RevisionRecord>;

  fn into_iter(self) -> Self::IntoIter { self.rows.iter() }
}
