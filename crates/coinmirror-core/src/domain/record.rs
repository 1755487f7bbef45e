use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{CoinId, ValidationError};

/// Opaque identity assigned by the external collection to one of its records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRecordId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Projection of a market entity previously written into the external
/// collection. Lives across runs; keyed by `coin_id` for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub record_id: RecordId,
    pub coin_id: CoinId,
    pub archived: bool,
}

impl PersistedRecord {
    pub fn new(record_id: RecordId, coin_id: CoinId) -> Self {
        Self {
            record_id,
            coin_id,
            archived: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_rejects_blank_input() {
        assert!(matches!(
            RecordId::parse("   "),
            Err(ValidationError::EmptyRecordId)
        ));
        assert_eq!(RecordId::parse(" r1 ").expect("valid").as_str(), "r1");
    }
}
