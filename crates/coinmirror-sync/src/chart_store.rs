//! Chart file store contract and the filesystem adapter.

use std::collections::BTreeSet;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::pin::Pin;

use coinmirror_core::{ChartSet, CoinId};

use crate::error::StorageError;

/// Narrow interface over chart persistence. One chart set per coin.
pub trait ChartStore: Send + Sync {
    fn write<'a>(
        &'a self,
        chart: &'a ChartSet,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;

    /// Deleting an absent chart is a no-op, so drop cleanup stays idempotent.
    fn delete<'a>(
        &'a self,
        id: &'a CoinId,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;

    fn list_ids<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<BTreeSet<CoinId>, StorageError>> + Send + 'a>>;
}

/// One pretty-printed JSON file per coin under a flat directory.
pub struct FsChartStore {
    dir: PathBuf,
}

impl FsChartStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &CoinId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl ChartStore for FsChartStore {
    fn write<'a>(
        &'a self,
        chart: &'a ChartSet,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
        Box::pin(async move {
            std::fs::create_dir_all(&self.dir)?;
            let payload = serde_json::to_vec_pretty(chart)?;
            std::fs::write(self.path_for(&chart.coin_id), payload)?;
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        id: &'a CoinId,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
        Box::pin(async move {
            match std::fs::remove_file(self.path_for(id)) {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
                Err(error) => Err(StorageError::Io(error)),
            }
        })
    }

    fn list_ids<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<BTreeSet<CoinId>, StorageError>> + Send + 'a>> {
        Box::pin(async move {
            let mut ids = BTreeSet::new();
            let entries = match std::fs::read_dir(&self.dir) {
                Ok(entries) => entries,
                Err(error) if error.kind() == ErrorKind::NotFound => return Ok(ids),
                Err(error) => return Err(StorageError::Io(error)),
            };

            for entry in entries {
                let path = entry?.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                // Foreign files in the chart directory are not ours to manage.
                if let Ok(id) = CoinId::parse(stem) {
                    ids.insert(id);
                }
            }

            Ok(ids)
        })
    }
}
