//! Table locations, layered from defaults, a TOML file, the environment and
//! command-line flags (later sources win).

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;
use spaced_store_csv::TablePaths;

const ENV_PREFIX: &str = "SPACED";

/// Shape of the optional `spaced.toml`.
#[derive(Debug, Deserialize)]
pub struct Settings {
  pub seen_path:      PathBuf,
  pub revisions_path: PathBuf,
}

impl Settings {
  /// Load settings from `file` (if it exists) and `SPACED_*` variables.
  pub fn load(file: &Path) -> Result<Self> {
    let defaults = TablePaths::default();

    config::Config::builder()
      .set_default("seen_path", defaults.seen.to_string_lossy().into_owned())?
      .set_default(
        "revisions_path",
        defaults.revisions.to_string_lossy().into_owned(),
      )?
      .add_source(
        config::File::from(file)
          .format(config::FileFormat::Toml)
          .required(false),
      )
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// Resolve the final table paths, letting explicit flags override.
  pub fn table_paths(
    self,
    seen: Option<PathBuf>,
    revisions: Option<PathBuf>,
  ) -> TablePaths {
    TablePaths {
      seen:      expand_tilde(&seen.unwrap_or(self.seen_path)),
      revisions: expand_tilde(&revisions.unwrap_or(self.revisions_path)),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
