//! Snapshot-to-collection diffing.

use std::collections::{BTreeMap, BTreeSet};

use crate::{CoinId, MarketEntity, PersistedRecord};

/// Action set produced by one reconcile pass.
///
/// Every current entity appears in exactly one of `to_update`/`to_create`,
/// in snapshot order. `to_archive` holds prior records whose identity fell
/// out of the ranked window, in prior order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    pub to_update: Vec<(MarketEntity, PersistedRecord)>,
    pub to_create: Vec<MarketEntity>,
    pub to_archive: Vec<PersistedRecord>,
    /// External identities that appeared on more than one prior record.
    /// Last record wins; the orchestrator logs these as data-quality
    /// warnings rather than failing the run.
    pub duplicate_prior_ids: Vec<CoinId>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_update.is_empty() && self.to_create.is_empty() && self.to_archive.is_empty()
    }
}

/// Diff the freshly fetched snapshot against the previously persisted set.
pub fn reconcile(current: &[MarketEntity], prior: &[PersistedRecord]) -> ReconcilePlan {
    let mut index: BTreeMap<&CoinId, &PersistedRecord> = BTreeMap::new();
    let mut duplicate_prior_ids = Vec::new();
    for record in prior {
        if index.insert(&record.coin_id, record).is_some() {
            duplicate_prior_ids.push(record.coin_id.clone());
        }
    }

    let mut to_update = Vec::new();
    let mut to_create = Vec::new();
    for entity in current {
        match index.get(&entity.id) {
            Some(record) => to_update.push((entity.clone(), (*record).clone())),
            None => to_create.push(entity.clone()),
        }
    }

    let current_ids: BTreeSet<&CoinId> = current.iter().map(|entity| &entity.id).collect();
    let to_archive = prior
        .iter()
        .filter(|record| !current_ids.contains(&record.coin_id))
        .cloned()
        .collect();

    ReconcilePlan {
        to_update,
        to_create,
        to_archive,
        duplicate_prior_ids,
    }
}
