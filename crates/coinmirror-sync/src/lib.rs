//! # coinmirror-sync
//!
//! Collaborators and orchestration for the coinmirror market mirror.
//!
//! The crate defines the seams the engine in `coinmirror-core` talks
//! through: a market-data provider, a record collection, a chart store, and
//! an optional spreadsheet mirror. Production adapters (CoinGecko, Webflow,
//! the filesystem, Google Sheets) live next to the traits; tests substitute
//! their own.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`http`] | Transport abstraction over HTTP collaborators |
//! | [`provider`] | Ranked snapshot and historical series source |
//! | [`collection`] | Headless CMS record collection |
//! | [`chart_store`] | Per-coin chart JSON files on disk |
//! | [`spreadsheet`] | Flat tabular mirror of the snapshot |
//! | [`retry`] | Bounded retry with backoff for transient failures |
//! | [`budget`] | Request budget for the provider |
//! | [`runner`] | The sync orchestrator |
//! | [`error`] | Collaborator and run error types |

pub mod budget;
pub mod chart_store;
pub mod collection;
pub mod error;
pub mod http;
pub mod provider;
pub mod retry;
pub mod runner;
pub mod spreadsheet;

pub use budget::RequestBudget;
pub use chart_store::{ChartStore, FsChartStore};
pub use collection::{RecordCollection, WebflowCollection};
pub use error::{CollectionError, ProviderError, SpreadsheetError, StorageError, SyncError};
pub use http::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use provider::{GeckoProvider, MarketDataProvider};
pub use retry::{retry_with, Backoff, RetryConfig};
pub use runner::SyncRunner;
pub use spreadsheet::{entity_rows, SheetsSpreadsheet, Spreadsheet};
