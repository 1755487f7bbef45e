//! The `plan` command: print the reconcile plan without applying it.

use std::process::ExitCode;

use serde_json::json;

use crate::config::Settings;
use crate::error::CliError;

pub async fn run(settings: &Settings, pretty: bool) -> Result<ExitCode, CliError> {
    let runner = settings.build_runner()?;
    let plan = runner.plan().await?;

    let summary = json!({
        "update": plan
            .to_update
            .iter()
            .map(|(entity, record)| json!({
                "coin": entity.id.as_str(),
                "record": record.record_id.as_str(),
            }))
            .collect::<Vec<_>>(),
        "create": plan
            .to_create
            .iter()
            .map(|entity| entity.id.as_str())
            .collect::<Vec<_>>(),
        "drop": plan
            .to_archive
            .iter()
            .map(|record| json!({
                "coin": record.coin_id.as_str(),
                "record": record.record_id.as_str(),
            }))
            .collect::<Vec<_>>(),
        "duplicate_prior_ids": plan
            .duplicate_prior_ids
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>(),
    });

    let rendered = if pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{rendered}");

    Ok(ExitCode::SUCCESS)
}
