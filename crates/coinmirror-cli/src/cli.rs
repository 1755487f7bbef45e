//! CLI argument definitions for coinmirror.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sync` | Run one full mirror pass (records, spreadsheet, charts) |
//! | `plan` | Compute and print the reconcile plan without applying it |
//!
//! Credentials and external identifiers come from the environment
//! (`COINMIRROR_*` variables, see the `config` module); flags cover the
//! per-run knobs.
//!
//! # Examples
//!
//! ```bash
//! # One mirror pass with the default knobs
//! coinmirror sync
//!
//! # Mirror the top 100, refreshing every coin's charts
//! coinmirror sync --entity-count 100 --full-charts
//!
//! # See what a run would change, without touching anything
//! coinmirror plan
//! ```

use clap::{Args, Parser, Subcommand};

/// Mirror a ranked coin list into a CMS collection, a spreadsheet, and
/// per-coin chart files.
#[derive(Debug, Parser)]
#[command(
    name = "coinmirror",
    author,
    version,
    about = "Market snapshot mirror for a headless CMS"
)]
pub struct Cli {
    /// Enable debug-level logging for coinmirror crates.
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one full mirror pass.
    ///
    /// Fetches the ranked snapshot, reconciles it against the collection,
    /// applies record updates, mirrors the spreadsheet if configured, and
    /// refreshes the scheduled chart batch.
    Sync(RunArgs),

    /// Compute the reconcile plan without applying anything.
    ///
    /// Prints which coins would be created, updated, and dropped. Makes
    /// read-only calls to the provider and the collection.
    Plan(RunArgs),
}

/// Per-run knobs shared by `sync` and `plan`. Defaults mirror the
/// production schedule: top 50 coins, 7-coin chart batches rotating every
/// 2 hours.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Size of the ranked window to mirror.
    #[arg(long, default_value_t = 50)]
    pub entity_count: usize,

    /// Quote currency for prices and series.
    #[arg(long, default_value = "usd")]
    pub currency: String,

    /// Coins per chart rotation batch.
    #[arg(long, default_value_t = 7)]
    pub batch_size: usize,

    /// Hours each rotation batch stays selected (1-24).
    #[arg(long, default_value_t = 2)]
    pub rotation_period_hours: u32,

    /// Provider lookback for historical series, in days.
    #[arg(long, default_value_t = 365)]
    pub lookback_days: u32,

    /// Page size when listing prior collection records.
    #[arg(long, default_value_t = 100)]
    pub page_size: usize,

    /// Fixed delay between per-item external calls, in milliseconds.
    #[arg(long, default_value_t = 250)]
    pub courtesy_delay_ms: u64,

    /// Directory the per-coin chart JSON files are written to.
    #[arg(long, default_value = "charts")]
    pub chart_dir: String,

    /// Delete dropped coins' records instead of archiving them.
    #[arg(long, default_value_t = false)]
    pub delete_dropped: bool,

    /// Refresh every tracked coin's charts instead of one rotation batch.
    #[arg(long, default_value_t = false)]
    pub full_charts: bool,
}
