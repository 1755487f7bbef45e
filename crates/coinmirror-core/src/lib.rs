//! # coinmirror-core
//!
//! Domain contracts and the sync engine for the coinmirror market mirror.
//!
//! This crate is pure: it owns the data model (entities, records, series,
//! chart buckets), the reconciliation/downsampling engine, and the explicit
//! run configuration. All I/O lives behind the collaborator traits in
//! `coinmirror-sync`.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Entities, persisted records, time series, timestamps |
//! | [`engine`] | Downsampler, normalizer, window selector, reconciler |
//! | [`chart`] | Horizon definitions and chart bucket assembly |
//! | [`fields`] | Configurable attribute → external slug mapping |
//! | [`config`] | Run configuration and validation |
//! | [`report`] | Per-run outcome tally |
//! | [`error`] | Core error types |

pub mod chart;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fields;
pub mod report;

pub use chart::{ChartBucket, ChartSet, Horizon};
pub use config::{ChartRefresh, DropPolicy, SyncConfig};
pub use domain::{
    validate_currency_code, CoinId, MarketEntity, PercentPoint, PersistedRecord, RecordId,
    SeriesBundle, TimePoint, UtcDateTime,
};
pub use engine::{downsample, normalize, percent_change, reconcile, select_batch, Anchor, ReconcilePlan};
pub use error::{CoreError, ValidationError};
pub use fields::{Attribute, FieldMap};
pub use report::SyncReport;
