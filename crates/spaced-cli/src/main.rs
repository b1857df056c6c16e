//! `spaced` — a personal spaced-repetition tracker.
//!
//! # Usage
//!
//! ```text
//! spaced init
//! spaced add "two sum" --url https://leetcode.com/problems/two-sum/
//! spaced update "two sum" --from 2025-07-01 --reset 2
//! spaced due --date 2025-06-30
//! ```

mod render;
mod settings;

use std::{
  io::{self, Write as _},
  path::PathBuf,
};

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use settings::Settings;
use spaced_core::{Tracker, parse_date};
use spaced_store_csv::CsvStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Schedule topic reviews on a doubling interval")]
struct Cli {
  /// Path to a TOML config file (seen_path, revisions_path).
  #[arg(short, long, value_name = "FILE", default_value = "spaced.toml")]
  config: PathBuf,

  /// Seen table location; overrides the config file and SPACED_SEEN_PATH.
  #[arg(long, value_name = "PATH")]
  seen: Option<PathBuf>,

  /// Revisions table location; overrides the config file and
  /// SPACED_REVISIONS_PATH.
  #[arg(long, value_name = "PATH")]
  revisions: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create empty tables if they do not exist yet.
  Init,

  /// Record a newly studied topic and schedule its reviews.
  Add {
    topic: String,

    /// Date the topic was studied (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Link or notes for the topic.
    #[arg(long)]
    url: Option<String>,
  },

  /// Restart a topic's schedule from a date at a reset level.
  Update {
    topic: String,

    /// Drop reviews from this date onwards and reschedule from it
    /// (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Backoff step to restart from, 0 (one day out) to 8 (256 days out).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    reset: i64,
  },

  /// List topics due for review.
  Due {
    /// Day to list (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Print the listing as JSON.
    #[arg(long)]
    json: bool,
  },

  /// Show the remaining review dates for a topic.
  Upcoming {
    topic: String,

    /// Only show reviews on or after this date; defaults to today.
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr; stdout carries the listing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let paths = Settings::load(&cli.config)?.table_paths(cli.seen, cli.revisions);
  tracing::debug!(
    seen = %paths.seen.display(),
    revisions = %paths.revisions.display(),
    "resolved table paths"
  );
  let store = CsvStore::new(paths);

  let mut out = io::stdout().lock();

  match cli.command {
    Command::Init => {
      let created = store.init().await.context("failed to create tables")?;
      if created.is_empty() {
        writeln!(out, "tables already exist")?;
      }
      for path in created {
        writeln!(out, "created {}", path.display())?;
      }
    }
    Command::Add { topic, date, url } => {
      let added = Tracker::new(store)
        .add_topic(&topic, date, url)
        .await
        .with_context(|| format!("failed to add topic {topic:?}"))?;
      render::added(&mut out, &added)?;
    }
    Command::Update { topic, from, reset } => {
      let updated = Tracker::new(store)
        .update_entry(&topic, from, reset)
        .await
        .with_context(|| format!("failed to update topic {topic:?}"))?;
      render::updated(&mut out, &updated)?;
    }
    Command::Due { date, json } => {
      let due = Tracker::new(store)
        .list_due(date)
        .await
        .context("failed to list due topics")?;
      if json {
        serde_json::to_writer_pretty(&mut out, &due)
          .context("serialising due list")?;
        writeln!(out)?;
      } else {
        render::due(&mut out, &due)?;
      }
    }
    Command::Upcoming { topic, from } => {
      let dates = Tracker::new(store)
        .upcoming(&topic, from)
        .await
        .with_context(|| format!("failed to list reviews for {topic:?}"))?;
      render::upcoming(&mut out, &topic, &dates)?;
    }
  }

  Ok(())
}
