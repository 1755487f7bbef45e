mod entity;
mod record;
mod series;
mod timestamp;

pub use entity::{validate_currency_code, CoinId, MarketEntity};
pub use record::{PersistedRecord, RecordId};
pub use series::{PercentPoint, SeriesBundle, TimePoint};
pub use timestamp::UtcDateTime;
