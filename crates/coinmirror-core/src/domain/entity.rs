use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_COIN_ID_LEN: usize = 64;

/// Stable external identity of a tracked coin.
///
/// The provider issues lowercase slug ids (`bitcoin`, `staked-ether`); every
/// cross-system lookup is keyed on this value, so it is validated once at the
/// adapter boundary and treated as opaque afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoinId(String);

impl CoinId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCoinId);
        }
        if trimmed.len() > MAX_COIN_ID_LEN {
            return Err(ValidationError::CoinIdTooLong {
                len: trimmed.len(),
                max: MAX_COIN_ID_LEN,
            });
        }
        for (index, ch) in trimmed.char_indices() {
            let valid = ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_';
            if !valid {
                return Err(ValidationError::CoinIdInvalidChar { ch, index });
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CoinId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CoinId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CoinId> for String {
    fn from(value: CoinId) -> Self {
        value.0
    }
}

/// One ranked market entry from a snapshot fetch.
///
/// Immutable once fetched; `rank` is the 1-based position in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntity {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub image: Option<String>,
    pub rank: usize,
    pub price: f64,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
    pub change_30d: Option<f64>,
    pub change_1y: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub ath: Option<f64>,
    pub atl: Option<f64>,
}

impl MarketEntity {
    /// Checks numeric sanity after adapter decode. Percent changes may be
    /// negative; prices, caps, volumes, and supplies may not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("price", self.price)?;
        validate_optional_finite("change_24h", self.change_24h)?;
        validate_optional_finite("change_7d", self.change_7d)?;
        validate_optional_finite("change_30d", self.change_30d)?;
        validate_optional_finite("change_1y", self.change_1y)?;
        validate_optional_non_negative("market_cap", self.market_cap)?;
        validate_optional_non_negative("volume", self.volume)?;
        validate_optional_non_negative("circulating_supply", self.circulating_supply)?;
        validate_optional_non_negative("total_supply", self.total_supply)?;
        validate_optional_non_negative("ath", self.ath)?;
        validate_optional_non_negative("atl", self.atl)?;
        Ok(())
    }
}

/// Validate and normalize a quote currency to a lowercase alphabetic code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_lowercase();
    let is_valid = (2..=5).contains(&normalized.len())
        && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_non_negative(field, value)?;
    }
    Ok(())
}

fn validate_optional_finite(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str) -> MarketEntity {
        MarketEntity {
            id: CoinId::parse(id).expect("valid id"),
            name: String::from("Bitcoin"),
            symbol: String::from("btc"),
            image: None,
            rank: 1,
            price: 64_000.0,
            change_24h: Some(-1.2),
            change_7d: Some(3.4),
            change_30d: None,
            change_1y: Some(120.5),
            market_cap: Some(1.2e12),
            volume: Some(3.1e10),
            circulating_supply: Some(19_600_000.0),
            total_supply: Some(21_000_000.0),
            ath: Some(73_000.0),
            atl: Some(67.81),
        }
    }

    #[test]
    fn parses_slug_ids() {
        assert_eq!(
            CoinId::parse("staked-ether").expect("valid").as_str(),
            "staked-ether"
        );
        assert!(matches!(
            CoinId::parse(""),
            Err(ValidationError::EmptyCoinId)
        ));
        assert!(matches!(
            CoinId::parse("Bitcoin"),
            Err(ValidationError::CoinIdInvalidChar { ch: 'B', index: 0 })
        ));
    }

    #[test]
    fn negative_percent_changes_are_legal() {
        assert!(entity("bitcoin").validate().is_ok());
    }

    #[test]
    fn rejects_negative_price() {
        let mut bad = entity("bitcoin");
        bad.price = -1.0;
        assert!(matches!(
            bad.validate(),
            Err(ValidationError::NegativeValue { field: "price" })
        ));
    }

    #[test]
    fn normalizes_currency() {
        assert_eq!(validate_currency_code(" USD ").expect("valid"), "usd");
        assert!(validate_currency_code("us1").is_err());
    }
}
