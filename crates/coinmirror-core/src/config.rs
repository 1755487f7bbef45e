//! Explicit run configuration, constructed once and passed into the
//! orchestrator. Core logic never reads the environment.

use serde::{Deserialize, Serialize};

use crate::{validate_currency_code, FieldMap, ValidationError};

/// What happens to a collection record when its coin drops out of the
/// ranked window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicy {
    /// Flag the record archived; history stays queryable in the collection.
    #[default]
    Archive,
    /// Remove the record outright.
    Delete,
}

/// Which coins get their historical series refreshed per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartRefresh {
    /// Every tracked coin, every run. Only viable with a generous rate budget.
    Full,
    /// One time-of-day rotation batch per run.
    #[default]
    RotatingBatch,
}

/// All knobs for one sync run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// External collection the records live in.
    pub collection_id: String,
    /// Quote currency for prices and series.
    pub currency: String,
    /// Size of the ranked window to mirror.
    pub entity_count: usize,
    /// Hours each rotation batch stays selected.
    pub rotation_period_hours: u32,
    /// Coins per rotation batch.
    pub batch_size: usize,
    /// Provider lookback for historical series.
    pub lookback_days: u32,
    /// Page size when listing prior records.
    pub page_size: usize,
    /// Fixed delay between per-item external calls.
    pub courtesy_delay_ms: u64,
    pub drop_policy: DropPolicy,
    pub chart_refresh: ChartRefresh,
    pub field_map: FieldMap,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            collection_id: String::new(),
            currency: String::from("usd"),
            entity_count: 50,
            rotation_period_hours: 2,
            batch_size: 7,
            lookback_days: 365,
            page_size: 100,
            courtesy_delay_ms: 250,
            drop_policy: DropPolicy::default(),
            chart_refresh: ChartRefresh::default(),
            field_map: FieldMap::default(),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.collection_id.trim().is_empty() {
            return Err(ValidationError::EmptyCollectionId);
        }
        // The currency travels verbatim into provider URLs, so it must
        // already be in its normalized lowercase form here.
        let normalized = validate_currency_code(&self.currency)?;
        if normalized != self.currency {
            return Err(ValidationError::InvalidCurrency {
                value: self.currency.clone(),
            });
        }
        if self.entity_count == 0 {
            return Err(ValidationError::ZeroEntityCount);
        }
        if self.batch_size == 0 {
            return Err(ValidationError::ZeroBatchSize);
        }
        if self.page_size == 0 {
            return Err(ValidationError::ZeroPageSize);
        }
        if self.lookback_days == 0 {
            return Err(ValidationError::ZeroLookbackDays);
        }
        if !(1..=24).contains(&self.rotation_period_hours) {
            return Err(ValidationError::InvalidRotationPeriod {
                value: self.rotation_period_hours,
            });
        }
        Ok(())
    }
}
