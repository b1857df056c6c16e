//! The schedule generator.
//!
//! A topic started on date `D` at reset level `r` is due on `D + 2^i` days
//! for every `i` in `r..=8`: at most nine reviews, the last one 256 days out.

use chrono::{Days, NaiveDate};

use crate::{
  Error, Result,
  level::ResetLevel,
  record::{RevisionRecord, RevisionTable},
  topic::Topic,
};

/// The review dates for a schedule starting at `start` from `level`,
/// ascending.
pub fn schedule_dates(start: NaiveDate, level: ResetLevel) -> Result<Vec<NaiveDate>> {
  level
    .and_above()
    .map(|l| {
      let days = l.offset_days();
      start
        .checked_add_days(Days::new(days))
        .ok_or(Error::DateOutOfRange { start, days })
    })
    .collect()
}

/// Merge the schedule for `topic` starting at `start` into `table`, returning
/// the merged table and the dates that were scheduled.
///
/// `reset_level` is clamped into `0..=8`. Pairs already present are not
/// duplicated, so merging the same schedule twice leaves the table as it was
/// after the first merge.
pub fn build_schedule(
  mut table: RevisionTable,
  topic: &Topic,
  start: NaiveDate,
  reset_level: i64,
) -> Result<(RevisionTable, Vec<NaiveDate>)> {
  let level = ResetLevel::clamped(reset_level);
  let dates = schedule_dates(start, level)?;
  table.extend(dates.iter().map(|&date| RevisionRecord {
    date,
    topic: topic.clone(),
  }));
  Ok((table, dates))
}
