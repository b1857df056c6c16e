//! Core types and operations for the `spaced` revision tracker.
//!
//! This crate is free of file-format dependencies. Storage backends implement
//! [`TableStore`]; the [`Tracker`] composes the add / update / list
//! operations over any of them.

// Native `async fn` in traits, as in the store trait below. Suppress the
// advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod date;
pub mod error;
pub mod level;
pub mod memory;
pub mod record;
pub mod schedule;
pub mod store;
pub mod topic;
pub mod tracker;

pub use date::{parse_date, today};
pub use error::{Error, Result};
pub use level::ResetLevel;
pub use record::{RevisionRecord, RevisionTable, SeenRecord, SeenTable};
pub use schedule::{build_schedule, schedule_dates};
pub use store::TableStore;
pub use topic::Topic;
pub use tracker::{Added, DueEntry, DueList, Tracker, Updated};

#[cfg(test)]
mod tests;
