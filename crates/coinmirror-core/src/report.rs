use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Per-run outcome tally. Derived, emitted once, then discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub archived: usize,
    pub failed: usize,
    pub charts_written: usize,
    pub charts_failed: usize,
    pub orphan_charts_removed: usize,
    pub spreadsheet_synced: bool,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.charts_failed > 0
    }
}

impl Display for SyncReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "created={} updated={} archived={} failed={} charts_written={} charts_failed={} orphans_removed={} spreadsheet={}",
            self.created,
            self.updated,
            self.archived,
            self.failed,
            self.charts_written,
            self.charts_failed,
            self.orphan_charts_removed,
            if self.spreadsheet_synced { "synced" } else { "skipped" },
        )
    }
}
