//! Market-data provider contract and the CoinGecko-shaped adapter.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use coinmirror_core::{CoinId, MarketEntity, SeriesBundle, TimePoint, UtcDateTime};

use crate::budget::RequestBudget;
use crate::error::ProviderError;
use crate::http::{HttpAuth, HttpClient, HttpRequest};

/// Narrow interface the orchestrator consumes for market data.
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the ranked snapshot. Position in the result is rank.
    fn ranked_entities<'a>(
        &'a self,
        count: usize,
        currency: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<MarketEntity>, ProviderError>> + Send + 'a>>;

    /// Fetch raw historical series for one coin over the lookback window.
    fn historical_series<'a>(
        &'a self,
        id: &'a CoinId,
        lookback_days: u32,
        currency: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<SeriesBundle, ProviderError>> + Send + 'a>>;
}

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// CoinGecko-shaped REST adapter.
pub struct GeckoProvider {
    http: Arc<dyn HttpClient>,
    auth: HttpAuth,
    base_url: String,
    budget: RequestBudget,
}

impl GeckoProvider {
    pub fn new(http: Arc<dyn HttpClient>, api_key: Option<String>) -> Self {
        let auth = match api_key {
            Some(value) => HttpAuth::Header {
                name: String::from(API_KEY_HEADER),
                value,
            },
            None => HttpAuth::None,
        };

        Self {
            http,
            auth,
            base_url: String::from(DEFAULT_BASE_URL),
            budget: RequestBudget::provider_default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_budget(mut self, budget: RequestBudget) -> Self {
        self.budget = budget;
        self
    }

    async fn fetch_json(&self, url: String) -> Result<String, ProviderError> {
        if let Err(wait) = self.budget.acquire() {
            return Err(ProviderError::RateLimited {
                wait_secs: wait.as_secs_f64(),
            });
        }

        let request = HttpRequest::get(url).with_auth(&self.auth);
        let response = self.http.execute(request).await?;
        if !response.is_success() {
            return Err(ProviderError::Status {
                status: response.status,
            });
        }

        Ok(response.body)
    }
}

impl MarketDataProvider for GeckoProvider {
    fn ranked_entities<'a>(
        &'a self,
        count: usize,
        currency: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<MarketEntity>, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!(
                "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&price_change_percentage={}",
                self.base_url,
                urlencoding::encode(currency),
                count,
                urlencoding::encode("7d,30d,1y"),
            );

            let body = self.fetch_json(url).await?;
            let payloads: Vec<MarketPayload> = serde_json::from_str(&body)?;

            let mut entities = Vec::with_capacity(payloads.len());
            for (index, payload) in payloads.into_iter().enumerate() {
                let entity = payload.into_entity(index + 1)?;
                entity.validate()?;
                entities.push(entity);
            }
            Ok(entities)
        })
    }

    fn historical_series<'a>(
        &'a self,
        id: &'a CoinId,
        lookback_days: u32,
        currency: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<SeriesBundle, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!(
                "{}/coins/{}/market_chart?vs_currency={}&days={}",
                self.base_url,
                id,
                urlencoding::encode(currency),
                lookback_days,
            );

            let body = self.fetch_json(url).await?;
            let payload: ChartPayload = serde_json::from_str(&body)?;

            Ok(SeriesBundle {
                prices: into_points(payload.prices)?,
                market_caps: into_points(payload.market_caps)?,
                volumes: into_points(payload.total_volumes)?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
struct MarketPayload {
    id: String,
    name: String,
    symbol: String,
    image: Option<String>,
    current_price: Option<f64>,
    market_cap: Option<f64>,
    total_volume: Option<f64>,
    circulating_supply: Option<f64>,
    total_supply: Option<f64>,
    ath: Option<f64>,
    atl: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    #[serde(rename = "price_change_percentage_7d_in_currency")]
    change_7d: Option<f64>,
    #[serde(rename = "price_change_percentage_30d_in_currency")]
    change_30d: Option<f64>,
    #[serde(rename = "price_change_percentage_1y_in_currency")]
    change_1y: Option<f64>,
}

impl MarketPayload {
    fn into_entity(self, rank: usize) -> Result<MarketEntity, ProviderError> {
        Ok(MarketEntity {
            id: CoinId::parse(&self.id)?,
            name: self.name,
            symbol: self.symbol,
            image: self.image,
            rank,
            // Stale listings occasionally carry a null price; treat as zero
            // rather than dropping the entity and churning the collection.
            price: self.current_price.unwrap_or(0.0),
            change_24h: self.price_change_percentage_24h,
            change_7d: self.change_7d,
            change_30d: self.change_30d,
            change_1y: self.change_1y,
            market_cap: self.market_cap,
            volume: self.total_volume,
            circulating_supply: self.circulating_supply,
            total_supply: self.total_supply,
            ath: self.ath,
            atl: self.atl,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChartPayload {
    #[serde(default)]
    prices: Vec<(f64, f64)>,
    #[serde(default)]
    market_caps: Vec<(f64, f64)>,
    #[serde(default)]
    total_volumes: Vec<(f64, f64)>,
}

fn into_points(raw: Vec<(f64, f64)>) -> Result<Vec<TimePoint>, ProviderError> {
    raw.into_iter()
        .map(|(millis, value)| {
            let ts = UtcDateTime::from_unix_ms(millis as i64)?;
            Ok(TimePoint::new(ts, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_payload_tolerates_missing_series() {
        let payload: ChartPayload =
            serde_json::from_str(r#"{"prices": [[1704067200000, 42000.5]]}"#).expect("must parse");

        assert_eq!(payload.prices.len(), 1);
        assert!(payload.market_caps.is_empty());
        assert!(payload.total_volumes.is_empty());
    }

    #[test]
    fn wire_millis_become_utc_points() {
        let points = into_points(vec![(1_704_067_200_000.0, 42_000.5)]).expect("in range");
        assert_eq!(points[0].ts.format_rfc3339(), "2024-01-01T00:00:00Z");
        assert_eq!(points[0].value, 42_000.5);
    }
}
