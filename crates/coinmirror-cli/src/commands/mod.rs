mod plan;
mod sync;

use std::process::ExitCode;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    match &cli.command {
        Command::Sync(args) => {
            let settings = Settings::from_env(args)?;
            sync::run(&settings, cli.pretty).await
        }
        Command::Plan(args) => {
            let settings = Settings::from_env(args)?;
            plan::run(&settings, cli.pretty).await
        }
    }
}
