//! Environment wiring for the CLI.
//!
//! Credentials and external identifiers never travel as flags; they come
//! from `COINMIRROR_*` environment variables. Flags only carry per-run
//! knobs.
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `COINMIRROR_COLLECTION_ID` | yes | CMS collection to mirror into |
//! | `COINMIRROR_CMS_TOKEN` | yes | CMS API bearer token |
//! | `COINMIRROR_PROVIDER_API_KEY` | no | Market data provider API key |
//! | `COINMIRROR_SHEET_ID` | no | Spreadsheet to mirror; skipped if unset |
//! | `COINMIRROR_SHEET_TOKEN` | with sheet | Spreadsheet API bearer token |
//! | `COINMIRROR_SHEET_RANGE` | no | Target range, default `Sheet1!A1` |
//! | `COINMIRROR_PROVIDER_BASE_URL` | no | Provider base URL override |
//! | `COINMIRROR_CMS_BASE_URL` | no | CMS base URL override |
//! | `COINMIRROR_SHEETS_BASE_URL` | no | Spreadsheet base URL override |

use std::env;
use std::sync::Arc;

use coinmirror_core::{validate_currency_code, Attribute, ChartRefresh, DropPolicy, SyncConfig};
use coinmirror_sync::{
    FsChartStore, GeckoProvider, ReqwestHttpClient, SheetsSpreadsheet, SyncRunner,
    WebflowCollection,
};

use crate::cli::RunArgs;
use crate::error::CliError;

const COLLECTION_ID: &str = "COINMIRROR_COLLECTION_ID";
const CMS_TOKEN: &str = "COINMIRROR_CMS_TOKEN";
const PROVIDER_API_KEY: &str = "COINMIRROR_PROVIDER_API_KEY";
const SHEET_ID: &str = "COINMIRROR_SHEET_ID";
const SHEET_TOKEN: &str = "COINMIRROR_SHEET_TOKEN";
const SHEET_RANGE: &str = "COINMIRROR_SHEET_RANGE";
const PROVIDER_BASE_URL: &str = "COINMIRROR_PROVIDER_BASE_URL";
const CMS_BASE_URL: &str = "COINMIRROR_CMS_BASE_URL";
const SHEETS_BASE_URL: &str = "COINMIRROR_SHEETS_BASE_URL";

/// Everything needed to wire one runner: run knobs plus environment
/// credentials.
pub struct Settings {
    pub config: SyncConfig,
    pub chart_dir: String,
    collection_id: String,
    cms_token: String,
    provider_api_key: Option<String>,
    sheet: Option<SheetSettings>,
    provider_base_url: Option<String>,
    cms_base_url: Option<String>,
    sheets_base_url: Option<String>,
}

struct SheetSettings {
    sheet_id: String,
    token: String,
    range: String,
}

impl Settings {
    pub fn from_env(args: &RunArgs) -> Result<Self, CliError> {
        let collection_id = required(COLLECTION_ID)?;
        let cms_token = required(CMS_TOKEN)?;

        let sheet = match optional(SHEET_ID) {
            Some(sheet_id) => Some(SheetSettings {
                sheet_id,
                token: optional(SHEET_TOKEN).ok_or(CliError::MissingEnv { name: SHEET_TOKEN })?,
                range: optional(SHEET_RANGE).unwrap_or_else(|| String::from("Sheet1!A1")),
            }),
            None => None,
        };

        let config = SyncConfig {
            collection_id: collection_id.clone(),
            currency: validate_currency_code(&args.currency)?,
            entity_count: args.entity_count,
            rotation_period_hours: args.rotation_period_hours,
            batch_size: args.batch_size,
            lookback_days: args.lookback_days,
            page_size: args.page_size,
            courtesy_delay_ms: args.courtesy_delay_ms,
            drop_policy: if args.delete_dropped {
                DropPolicy::Delete
            } else {
                DropPolicy::Archive
            },
            chart_refresh: if args.full_charts {
                ChartRefresh::Full
            } else {
                ChartRefresh::RotatingBatch
            },
            field_map: coinmirror_core::FieldMap::default(),
        };
        config.validate()?;

        Ok(Self {
            config,
            chart_dir: args.chart_dir.clone(),
            collection_id,
            cms_token,
            provider_api_key: optional(PROVIDER_API_KEY),
            sheet,
            provider_base_url: optional(PROVIDER_BASE_URL),
            cms_base_url: optional(CMS_BASE_URL),
            sheets_base_url: optional(SHEETS_BASE_URL),
        })
    }

    pub fn build_runner(&self) -> Result<SyncRunner, CliError> {
        let http = Arc::new(ReqwestHttpClient::new());

        let mut provider = GeckoProvider::new(http.clone(), self.provider_api_key.clone());
        if let Some(base_url) = &self.provider_base_url {
            provider = provider.with_base_url(base_url.clone());
        }

        let id_slug = self.config.field_map.slug(Attribute::CoinId).to_string();
        let mut collection =
            WebflowCollection::new(http.clone(), &self.cms_token, &self.collection_id, id_slug);
        if let Some(base_url) = &self.cms_base_url {
            collection = collection.with_base_url(base_url.clone());
        }

        let charts = FsChartStore::new(&self.chart_dir);

        let mut runner = SyncRunner::new(
            self.config.clone(),
            Arc::new(provider),
            Arc::new(collection),
            Arc::new(charts),
        )?;

        if let Some(sheet) = &self.sheet {
            let mut spreadsheet =
                SheetsSpreadsheet::new(http, &sheet.token, &sheet.sheet_id, &sheet.range);
            if let Some(base_url) = &self.sheets_base_url {
                spreadsheet = spreadsheet.with_base_url(base_url.clone());
            }
            runner = runner.with_spreadsheet(Arc::new(spreadsheet));
        }

        Ok(runner)
    }
}

fn required(name: &'static str) -> Result<String, CliError> {
    optional(name).ok_or(CliError::MissingEnv { name })
}

fn optional(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
