//! The `sync` command: one full mirror pass.

use std::process::ExitCode;

use crate::config::Settings;
use crate::error::CliError;

pub async fn run(settings: &Settings, pretty: bool) -> Result<ExitCode, CliError> {
    tracing::info!(collection = %settings.config.collection_id, "starting mirror run");
    let runner = settings.build_runner()?;
    let report = runner.run().await?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");

    // Partial failures are tallied, not fatal; surface them in the exit code
    // so schedulers can alert.
    if report.has_failures() {
        return Ok(ExitCode::from(3));
    }
    Ok(ExitCode::SUCCESS)
}
