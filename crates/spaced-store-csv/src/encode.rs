//! Encoding and decoding between domain records and the plain-text rows
//! stored in the CSV files.
//!
//! Dates are `YYYY-MM-DD`, reset levels are bare integers and a missing URL is
//! an empty cell.

use serde::{Deserialize, Serialize};
use spaced_core::{
  ResetLevel, RevisionRecord, SeenRecord, Topic, date::format_date, parse_date,
};

pub const SEEN_HEADER: [&str; 4] = ["topic", "date", "reset_level", "url"];

pub const REVISIONS_HEADER: [&str; 2] = ["date", "topic"];

// ─── Seen ────────────────────────────────────────────────────────────────────

/// Raw cells of one `seen.csv` row. Field order matches [`SEEN_HEADER`].
#[derive(Debug, Serialize, Deserialize)]
pub struct RawSeenRow {
  pub topic:       String,
  pub date:        String,
  pub reset_level: i64,
  #[serde(default)]
  pub url:         String,
}

impl RawSeenRow {
  pub fn from_record(record: &SeenRecord) -> Self {
    Self {
      topic:       record.topic.to_string(),
      date:        format_date(record.first_reviewed),
      reset_level: record.reset_level.into(),
      url:         record.url.clone().unwrap_or_default(),
    }
  }

  pub fn into_record(self) -> spaced_core::Result<SeenRecord> {
    let url = self.url.trim();
    Ok(SeenRecord {
      topic:          Topic::new(&self.topic)?,
      first_reviewed: parse_date(&self.date)?,
      reset_level:    ResetLevel::try_from(self.reset_level)?,
      url:            (!url.is_empty()).then(|| url.to_owned()),
    })
  }
}

// ─── Revisions ───────────────────────────────────────────────────────────────

/// Raw cells of one `revisions.csv` row. Field order matches
/// [`REVISIONS_HEADER`].
#[derive(Debug, Serialize, Deserialize)]
pub struct RawRevisionRow {
  pub date:  String,
  pub topic: String,
}

impl RawRevisionRow {
  pub fn from_record(record: &RevisionRecord) -> Self {
    Self {
      date:  format_date(record.date),
      topic: record.topic.to_string(),
    }
  }

  pub fn into_record(self) -> spaced_core::Result<RevisionRecord> {
    Ok(RevisionRecord {
      date:  parse_date(&self.date)?,
      topic: Topic::new(&self.topic)?,
    })
  }
}
