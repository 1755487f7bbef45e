//! Declarative attribute-to-slug mapping for the external collection schema.
//!
//! External schemas vary across deployments, so the mapping is configuration,
//! not inlined literals. The default table uses uniform kebab-case slugs;
//! any entry can be overridden per deployment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::MarketEntity;

/// Every market-entity attribute that projects into the external schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    CoinId,
    Name,
    Symbol,
    Image,
    Rank,
    Price,
    Change24h,
    Change7d,
    Change30d,
    Change1y,
    MarketCap,
    Volume,
    CirculatingSupply,
    TotalSupply,
    AllTimeHigh,
    AllTimeLow,
}

impl Attribute {
    /// Stable projection order for record fields and spreadsheet columns.
    pub const ALL: [Attribute; 16] = [
        Attribute::CoinId,
        Attribute::Name,
        Attribute::Symbol,
        Attribute::Image,
        Attribute::Rank,
        Attribute::Price,
        Attribute::Change24h,
        Attribute::Change7d,
        Attribute::Change30d,
        Attribute::Change1y,
        Attribute::MarketCap,
        Attribute::Volume,
        Attribute::CirculatingSupply,
        Attribute::TotalSupply,
        Attribute::AllTimeHigh,
        Attribute::AllTimeLow,
    ];

    const fn default_slug(self) -> &'static str {
        match self {
            Self::CoinId => "coin-id",
            Self::Name => "name",
            Self::Symbol => "symbol",
            Self::Image => "image",
            Self::Rank => "rank",
            Self::Price => "price",
            Self::Change24h => "change-24h",
            Self::Change7d => "change-7d",
            Self::Change30d => "change-30d",
            Self::Change1y => "change-1y",
            Self::MarketCap => "market-cap",
            Self::Volume => "volume",
            Self::CirculatingSupply => "circulating-supply",
            Self::TotalSupply => "total-supply",
            Self::AllTimeHigh => "all-time-high",
            Self::AllTimeLow => "all-time-low",
        }
    }
}

/// Configurable attribute → external slug table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    slugs: BTreeMap<Attribute, String>,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            slugs: Attribute::ALL
                .into_iter()
                .map(|attribute| (attribute, attribute.default_slug().to_owned()))
                .collect(),
        }
    }
}

impl FieldMap {
    pub fn slug(&self, attribute: Attribute) -> &str {
        self.slugs
            .get(&attribute)
            .map(String::as_str)
            .unwrap_or_else(|| attribute.default_slug())
    }

    /// Override one slug; used when a deployment's schema predates the
    /// uniform naming.
    pub fn with_slug(mut self, attribute: Attribute, slug: impl Into<String>) -> Self {
        self.slugs.insert(attribute, slug.into());
        self
    }

    /// Project an entity into the external field schema.
    pub fn project(&self, entity: &MarketEntity) -> BTreeMap<String, Value> {
        Attribute::ALL
            .into_iter()
            .map(|attribute| {
                (
                    self.slug(attribute).to_owned(),
                    attribute_value(attribute, entity),
                )
            })
            .collect()
    }

    /// Header row for the spreadsheet mirror, in projection order.
    pub fn header_row(&self) -> Vec<String> {
        Attribute::ALL
            .into_iter()
            .map(|attribute| self.slug(attribute).to_owned())
            .collect()
    }

    /// One spreadsheet row for an entity, aligned with [`FieldMap::header_row`].
    pub fn value_row(&self, entity: &MarketEntity) -> Vec<Value> {
        Attribute::ALL
            .into_iter()
            .map(|attribute| attribute_value(attribute, entity))
            .collect()
    }
}

fn attribute_value(attribute: Attribute, entity: &MarketEntity) -> Value {
    match attribute {
        Attribute::CoinId => Value::String(entity.id.as_str().to_owned()),
        Attribute::Name => Value::String(entity.name.clone()),
        Attribute::Symbol => Value::String(entity.symbol.clone()),
        Attribute::Image => entity
            .image
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Attribute::Rank => Value::from(entity.rank as u64),
        Attribute::Price => Value::from(entity.price),
        Attribute::Change24h => optional_number(entity.change_24h),
        Attribute::Change7d => optional_number(entity.change_7d),
        Attribute::Change30d => optional_number(entity.change_30d),
        Attribute::Change1y => optional_number(entity.change_1y),
        Attribute::MarketCap => optional_number(entity.market_cap),
        Attribute::Volume => optional_number(entity.volume),
        Attribute::CirculatingSupply => optional_number(entity.circulating_supply),
        Attribute::TotalSupply => optional_number(entity.total_supply),
        Attribute::AllTimeHigh => optional_number(entity.ath),
        Attribute::AllTimeLow => optional_number(entity.atl),
    }
}

fn optional_number(value: Option<f64>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoinId;

    fn entity() -> MarketEntity {
        MarketEntity {
            id: CoinId::parse("bitcoin").expect("valid"),
            name: String::from("Bitcoin"),
            symbol: String::from("btc"),
            image: None,
            rank: 1,
            price: 64_000.0,
            change_24h: Some(-1.2),
            change_7d: None,
            change_30d: None,
            change_1y: None,
            market_cap: Some(1.2e12),
            volume: None,
            circulating_supply: None,
            total_supply: None,
            ath: None,
            atl: None,
        }
    }

    #[test]
    fn default_slugs_are_uniform_kebab_case() {
        let map = FieldMap::default();
        assert_eq!(map.slug(Attribute::CoinId), "coin-id");
        assert_eq!(map.slug(Attribute::Change24h), "change-24h");
        assert_eq!(map.slug(Attribute::MarketCap), "market-cap");
    }

    #[test]
    fn slug_overrides_apply_to_projection() {
        let map = FieldMap::default().with_slug(Attribute::MarketCap, "marketcap-2");
        let fields = map.project(&entity());

        assert!(fields.contains_key("marketcap-2"));
        assert!(!fields.contains_key("market-cap"));
    }

    #[test]
    fn missing_numerics_project_as_null() {
        let fields = FieldMap::default().project(&entity());
        assert_eq!(fields.get("volume"), Some(&Value::Null));
        assert_eq!(fields.get("coin-id"), Some(&Value::from("bitcoin")));
    }

    #[test]
    fn rows_align_with_header() {
        let map = FieldMap::default();
        let header = map.header_row();
        let row = map.value_row(&entity());
        assert_eq!(header.len(), row.len());
        assert_eq!(header[0], "coin-id");
        assert_eq!(row[0], Value::from("bitcoin"));
    }
}
