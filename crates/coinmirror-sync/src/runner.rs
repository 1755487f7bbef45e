//! The sync orchestrator.
//!
//! One run is fully sequential: fetch snapshot, fetch prior records,
//! reconcile, apply, mirror the spreadsheet, refresh the chart batch, clean
//! orphans, report. Per-item failures are tallied and logged; only setup
//! failures (snapshot or prior-record fetch) abort the run.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use coinmirror_core::{
    reconcile, select_batch, ChartRefresh, ChartSet, DropPolicy, MarketEntity, PersistedRecord,
    ReconcilePlan, SyncConfig, SyncReport, UtcDateTime,
};

use crate::chart_store::ChartStore;
use crate::collection::RecordCollection;
use crate::error::{CollectionError, ProviderError, SyncError};
use crate::provider::MarketDataProvider;
use crate::retry::{retry_with, RetryConfig};
use crate::spreadsheet::{entity_rows, Spreadsheet};

pub struct SyncRunner {
    config: SyncConfig,
    provider: Arc<dyn MarketDataProvider>,
    collection: Arc<dyn RecordCollection>,
    charts: Arc<dyn ChartStore>,
    spreadsheet: Option<Arc<dyn Spreadsheet>>,
    retry: RetryConfig,
}

impl SyncRunner {
    pub fn new(
        config: SyncConfig,
        provider: Arc<dyn MarketDataProvider>,
        collection: Arc<dyn RecordCollection>,
        charts: Arc<dyn ChartStore>,
    ) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            collection,
            charts,
            spreadsheet: None,
            retry: RetryConfig::default(),
        })
    }

    pub fn with_spreadsheet(mut self, spreadsheet: Arc<dyn Spreadsheet>) -> Self {
        self.spreadsheet = Some(spreadsheet);
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Compute the action plan without applying anything.
    pub async fn plan(&self) -> Result<ReconcilePlan, SyncError> {
        let (current, prior) = self.fetch_state().await?;
        Ok(reconcile(&current, &prior))
    }

    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        self.run_at(UtcDateTime::now()).await
    }

    /// Run one sync pass with an explicit clock, so rotation is testable.
    pub async fn run_at(&self, now: UtcDateTime) -> Result<SyncReport, SyncError> {
        let (current, prior) = self.fetch_state().await?;
        let plan = reconcile(&current, &prior);
        for id in &plan.duplicate_prior_ids {
            tracing::warn!(coin = %id, "duplicate external identity among prior records; last record wins");
        }
        tracing::info!(
            updates = plan.to_update.len(),
            creates = plan.to_create.len(),
            archives = plan.to_archive.len(),
            "reconcile plan computed"
        );

        let mut report = SyncReport::default();
        self.apply_plan(&plan, &mut report).await;
        self.mirror_spreadsheet(&current, &mut report).await;
        self.refresh_charts(now, &current, &mut report).await;
        self.remove_orphan_charts(&current, &prior, &mut report).await;

        tracing::info!(%report, "sync run complete");
        Ok(report)
    }

    async fn fetch_state(
        &self,
    ) -> Result<(Vec<MarketEntity>, Vec<PersistedRecord>), SyncError> {
        let current = self
            .provider
            .ranked_entities(self.config.entity_count, &self.config.currency)
            .await
            .map_err(SyncError::Snapshot)?;
        let prior = self
            .collection
            .list(self.config.page_size)
            .await
            .map_err(SyncError::PriorRecords)?;
        Ok((current, prior))
    }

    async fn apply_plan(&self, plan: &ReconcilePlan, report: &mut SyncReport) {
        for (entity, record) in &plan.to_update {
            let fields = self.config.field_map.project(entity);
            let outcome = retry_with(&self.retry, |e: &CollectionError| e.retryable(), || {
                self.collection.update(&record.record_id, &fields)
            })
            .await;

            match outcome {
                Ok(()) => report.updated += 1,
                Err(error) => {
                    tracing::error!(coin = %entity.id, record = %record.record_id, %error, "record update failed");
                    report.failed += 1;
                }
            }
            self.pause().await;
        }

        for entity in &plan.to_create {
            let fields = self.config.field_map.project(entity);
            // Create is not idempotent; a retried create after an ambiguous
            // failure risks a duplicate record, so it gets exactly one shot.
            match self.collection.create(&fields).await {
                Ok(()) => report.created += 1,
                Err(error) => {
                    tracing::error!(coin = %entity.id, %error, "record create failed");
                    report.failed += 1;
                }
            }
            self.pause().await;
        }

        for record in &plan.to_archive {
            let outcome = match self.config.drop_policy {
                DropPolicy::Archive => {
                    retry_with(&self.retry, |e: &CollectionError| e.retryable(), || {
                        self.collection.archive(&record.record_id)
                    })
                    .await
                }
                DropPolicy::Delete => {
                    retry_with(&self.retry, |e: &CollectionError| e.retryable(), || {
                        self.collection.delete(&record.record_id)
                    })
                    .await
                }
            };

            match outcome {
                Ok(()) => {
                    report.archived += 1;
                    if let Err(error) = self.charts.delete(&record.coin_id).await {
                        tracing::warn!(coin = %record.coin_id, %error, "dropped coin's chart file removal failed");
                    }
                }
                Err(error) => {
                    tracing::error!(coin = %record.coin_id, record = %record.record_id, %error, "record drop failed");
                    report.failed += 1;
                }
            }
            self.pause().await;
        }
    }

    async fn mirror_spreadsheet(&self, current: &[MarketEntity], report: &mut SyncReport) {
        let Some(spreadsheet) = &self.spreadsheet else {
            return;
        };

        let (header, rows) = entity_rows(current, &self.config.field_map);
        match spreadsheet.replace_rows(&header, &rows).await {
            Ok(()) => report.spreadsheet_synced = true,
            Err(error) => {
                tracing::warn!(%error, "spreadsheet mirror failed; continuing");
            }
        }
    }

    async fn refresh_charts(
        &self,
        now: UtcDateTime,
        current: &[MarketEntity],
        report: &mut SyncReport,
    ) {
        let batch: &[MarketEntity] = match self.config.chart_refresh {
            ChartRefresh::Full => current,
            ChartRefresh::RotatingBatch => {
                let (index, slice) = select_batch(
                    now,
                    current,
                    self.config.rotation_period_hours,
                    self.config.batch_size,
                );
                tracing::info!(batch = index, size = slice.len(), "chart rotation batch selected");
                slice
            }
        };

        for entity in batch {
            let fetched = retry_with(&self.retry, |e: &ProviderError| e.retryable(), || {
                self.provider.historical_series(
                    &entity.id,
                    self.config.lookback_days,
                    &self.config.currency,
                )
            })
            .await;

            match fetched {
                Ok(bundle) => {
                    let chart = ChartSet::build(entity.id.clone(), &bundle, now);
                    match self.charts.write(&chart).await {
                        Ok(()) => report.charts_written += 1,
                        Err(error) => {
                            tracing::error!(coin = %entity.id, %error, "chart file write failed");
                            report.charts_failed += 1;
                        }
                    }
                }
                Err(error) => {
                    tracing::error!(coin = %entity.id, %error, "historical series fetch failed; skipping chart");
                    report.charts_failed += 1;
                }
            }
            self.pause().await;
        }
    }

    async fn remove_orphan_charts(
        &self,
        current: &[MarketEntity],
        prior: &[PersistedRecord],
        report: &mut SyncReport,
    ) {
        let stored = match self.charts.list_ids().await {
            Ok(ids) => ids,
            Err(error) => {
                tracing::warn!(%error, "chart directory listing failed; skipping orphan cleanup");
                return;
            }
        };

        // Prior-record ids stay tracked too: a coin whose drop failed this
        // run keeps its chart until the drop actually lands.
        let tracked: BTreeSet<_> = current
            .iter()
            .map(|entity| &entity.id)
            .chain(prior.iter().map(|record| &record.coin_id))
            .collect();
        for id in stored {
            if tracked.contains(&id) {
                continue;
            }
            match self.charts.delete(&id).await {
                Ok(()) => {
                    tracing::info!(coin = %id, "orphan chart file removed");
                    report.orphan_charts_removed += 1;
                }
                Err(error) => {
                    tracing::warn!(coin = %id, %error, "orphan chart file removal failed");
                }
            }
        }
    }

    async fn pause(&self) {
        if self.config.courtesy_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.courtesy_delay_ms)).await;
        }
    }
}
