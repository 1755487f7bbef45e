//! Optional spreadsheet mirror contract and the Sheets-shaped adapter.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{json, Value};

use coinmirror_core::{FieldMap, MarketEntity};

use crate::error::SpreadsheetError;
use crate::http::{HttpAuth, HttpClient, HttpRequest};

/// Narrow interface over the spreadsheet mirror. The whole collaborator is
/// optional; a run without one simply skips the step.
pub trait Spreadsheet: Send + Sync {
    /// Replace the sheet contents with a header row plus one row per entity.
    fn replace_rows<'a>(
        &'a self,
        header: &'a [String],
        rows: &'a [Vec<Value>],
    ) -> Pin<Box<dyn Future<Output = Result<(), SpreadsheetError>> + Send + 'a>>;
}

/// Header and value rows for the current snapshot, in field-map order.
pub fn entity_rows(entities: &[MarketEntity], field_map: &FieldMap) -> (Vec<String>, Vec<Vec<Value>>) {
    let header = field_map.header_row();
    let rows = entities
        .iter()
        .map(|entity| field_map.value_row(entity))
        .collect();
    (header, rows)
}

/// Google-Sheets-shaped values adapter.
pub struct SheetsSpreadsheet {
    http: Arc<dyn HttpClient>,
    auth: HttpAuth,
    base_url: String,
    sheet_id: String,
    range: String,
}

impl SheetsSpreadsheet {
    pub fn new(
        http: Arc<dyn HttpClient>,
        token: impl Into<String>,
        sheet_id: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self {
            http,
            auth: HttpAuth::BearerToken(token.into()),
            base_url: String::from("https://sheets.googleapis.com"),
            sheet_id: sheet_id.into(),
            range: range.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Spreadsheet for SheetsSpreadsheet {
    fn replace_rows<'a>(
        &'a self,
        header: &'a [String],
        rows: &'a [Vec<Value>],
    ) -> Pin<Box<dyn Future<Output = Result<(), SpreadsheetError>> + Send + 'a>> {
        Box::pin(async move {
            let mut values: Vec<Vec<Value>> =
                vec![header.iter().cloned().map(Value::String).collect()];
            values.extend(rows.iter().cloned());

            let url = format!(
                "{}/v4/spreadsheets/{}/values/{}?valueInputOption=RAW",
                self.base_url,
                self.sheet_id,
                urlencoding::encode(&self.range),
            );
            let body = serde_json::to_string(&json!({
                "range": self.range,
                "majorDimension": "ROWS",
                "values": values,
            }))?;

            let response = self
                .http
                .execute(HttpRequest::put(url).with_json_body(body).with_auth(&self.auth))
                .await?;
            if !response.is_success() {
                return Err(SpreadsheetError::Status {
                    status: response.status,
                });
            }

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinmirror_core::CoinId;

    #[test]
    fn rows_follow_snapshot_order() {
        let entities = vec![
            entity("bitcoin", 1),
            entity("ethereum", 2),
        ];
        let (header, rows) = entity_rows(&entities, &FieldMap::default());

        assert_eq!(header.first().map(String::as_str), Some("coin-id"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Value::from("bitcoin"));
        assert_eq!(rows[1][0], Value::from("ethereum"));
    }

    fn entity(id: &str, rank: usize) -> MarketEntity {
        MarketEntity {
            id: CoinId::parse(id).expect("valid"),
            name: id.to_owned(),
            symbol: id[..3].to_owned(),
            image: None,
            rank,
            price: 1.0,
            change_24h: None,
            change_7d: None,
            change_30d: None,
            change_1y: None,
            market_cap: None,
            volume: None,
            circulating_supply: None,
            total_supply: None,
            ath: None,
            atl: None,
        }
    }
}
