//! The `TableStore` trait.
//!
//! Implemented by storage backends (e.g. `spaced-store-csv`, or the
//! in-process [`MemoryStore`](crate::memory::MemoryStore)). Each call reads or
//! writes one whole table; there is no partial update and no indexing.

use std::future::Future;

use crate::record::{RevisionTable, SeenTable};

/// Whole-table persistence for the Seen and Revisions tables.
///
/// The two tables are independent: a backend must allow a Seen call and a
/// Revisions call to be in flight at the same time. All methods return `Send`
/// futures so the tracker can drive them from a multi-threaded runtime.
pub trait TableStore: Send + Sync {
  /// Backend error. Must absorb core validation errors so the tracker can
  /// report everything through one type.
  type Error: std::error::Error + From<crate::Error> + Send + Sync + 'static;

  /// Read the full Seen table.
  fn load_seen(
    &self,
  ) -> impl Future<Output = Result<SeenTable, Self::Error>> + Send + '_;

  /// Read the full Revisions table.
  fn load_revisions(
    &self,
  ) -> impl Future<Output = Result<RevisionTable, Self::Error>> + Send + '_;

  /// Replace the persisted Seen table with `table`.
  fn save_seen<'a>(
    &'a self,
    table: &'a SeenTable,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Replace the persisted Revisions table with `table`.
  fn save_revisions<'a>(
    &'a self,
    table: &'a RevisionTable,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
