//! [`MemoryStore`] — an in-process [`TableStore`] for tests and dry runs.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
  Error,
  record::{RevisionTable, SeenTable},
  store::TableStore,
};

#[derive(Debug, Default)]
struct Tables {
  seen:      SeenTable,
  revisions: RevisionTable,
  writes:    usize,
}

/// Both tables held in memory behind a mutex.
///
/// Loads hand out clones, so the tracker works on its own snapshot exactly as
/// it would with a file-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: Mutex<Tables>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Start from pre-populated tables.
  pub fn with_tables(seen: SeenTable, revisions: RevisionTable) -> Self {
    Self {
      inner: Mutex::new(Tables { seen, revisions, writes: 0 }),
    }
  }

  /// Clones of the current tables.
  pub fn snapshot(&self) -> (SeenTable, RevisionTable) {
    let inner = self.lock();
    (inner.seen.clone(), inner.revisions.clone())
  }

  /// Number of table writes performed so far.
  pub fn writes(&self) -> usize { self.lock().writes }

  fn lock(&self) -> MutexGuard<'_, Tables> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl TableStore for MemoryStore {
  type Error = Error;

  async fn load_seen(&self) -> Result<SeenTable, Error> {
    Ok(self.lock().seen.clone())
  }

  async fn load_revisions(&self) -> Result<RevisionTable, Error> {
    Ok(self.lock().revisions.clone())
  }

  async fn save_seen(&self, table: &SeenTable) -> Result<(), Error> {
    let mut inner = self.lock();
    inner.seen = table.clone();
    inner.writes += 1;
    Ok(())
  }

  async fn save_revisions(&self, table: &RevisionTable) -> Result<(), Error> {
    let mut inner = self.lock();
    inner.revisions = table.clone();
    inner.writes += 1;
    Ok(())
  }
}
