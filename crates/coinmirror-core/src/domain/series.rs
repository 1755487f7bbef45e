use serde::{Deserialize, Serialize};

use crate::UtcDateTime;

/// One sample in a historical series, ordered ascending by timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub ts: UtcDateTime,
    pub value: f64,
}

impl TimePoint {
    pub fn new(ts: UtcDateTime, value: f64) -> Self {
        Self { ts, value }
    }
}

/// One sample of a percentage-change series, baselined on the first point of
/// its source series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub ts: UtcDateTime,
    pub percent: f64,
}

/// Raw historical series for one coin, as returned by a single provider fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesBundle {
    pub prices: Vec<TimePoint>,
    pub market_caps: Vec<TimePoint>,
    pub volumes: Vec<TimePoint>,
}

impl SeriesBundle {
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty() && self.market_caps.is_empty() && self.volumes.is_empty()
    }
}
