//! Chart horizon definitions and bucket assembly.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::engine::{downsample, normalize, percent_change, Anchor};
use crate::{CoinId, PercentPoint, SeriesBundle, TimePoint, UtcDateTime};

/// Named chart time window with its own cardinality and axis anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Week,
    Month,
    Year,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Week, Horizon::Month, Horizon::Year];

    /// Fixed cardinality of every non-degenerate series in this horizon.
    pub const fn target_points(self) -> usize {
        match self {
            Self::Week => 168,
            Self::Month => 720,
            Self::Year => 365,
        }
    }

    /// Nominal spacing label carried in the chart payload.
    pub const fn interval_label(self) -> &'static str {
        match self {
            Self::Week | Self::Month => "1h",
            Self::Year => "1d",
        }
    }

    pub const fn anchor(self) -> Anchor {
        match self {
            Self::Week | Self::Month => Anchor::Hourly,
            Self::Year => Anchor::Yearly,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl Display for Horizon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One horizon's downsampled, timestamp-normalized chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBucket {
    pub horizon: Horizon,
    pub interval: String,
    pub target_points: usize,
    pub prices: Vec<TimePoint>,
    pub market_caps: Vec<TimePoint>,
    pub volumes: Vec<TimePoint>,
    pub price_changes: Vec<PercentPoint>,
    pub market_cap_changes: Vec<PercentPoint>,
    pub volume_changes: Vec<PercentPoint>,
}

impl ChartBucket {
    /// Reduce a raw series bundle to this horizon's fixed-cardinality,
    /// even-axis series plus their percent-change companions.
    pub fn build(horizon: Horizon, bundle: &SeriesBundle, now: UtcDateTime) -> Self {
        let (prices, price_changes) = reduce(&bundle.prices, horizon, now);
        let (market_caps, market_cap_changes) = reduce(&bundle.market_caps, horizon, now);
        let (volumes, volume_changes) = reduce(&bundle.volumes, horizon, now);

        Self {
            horizon,
            interval: horizon.interval_label().to_owned(),
            target_points: horizon.target_points(),
            prices,
            market_caps,
            volumes,
            price_changes,
            market_cap_changes,
            volume_changes,
        }
    }
}

/// Everything one chart file holds for a single coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub coin_id: CoinId,
    pub generated_at: UtcDateTime,
    pub buckets: Vec<ChartBucket>,
}

impl ChartSet {
    /// Assemble all standard horizons from one historical fetch.
    pub fn build(coin_id: CoinId, bundle: &SeriesBundle, now: UtcDateTime) -> Self {
        let buckets = Horizon::ALL
            .into_iter()
            .map(|horizon| ChartBucket::build(horizon, bundle, now))
            .collect();

        Self {
            coin_id,
            generated_at: now,
            buckets,
        }
    }
}

fn reduce(
    raw: &[TimePoint],
    horizon: Horizon,
    now: UtcDateTime,
) -> (Vec<TimePoint>, Vec<PercentPoint>) {
    let sampled = downsample(raw, horizon.target_points());
    let aligned = normalize(&sampled, horizon.target_points(), now, horizon.anchor());
    let changes = percent_change(&aligned);
    (aligned, changes)
}
