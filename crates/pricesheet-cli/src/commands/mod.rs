mod export;
mod fetch;

use std::io::Read;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command leaves behind for the strict-mode check.
#[derive(Debug, Default)]
pub struct CommandReport {
    pub warnings: Vec<String>,
}

impl CommandReport {
    pub fn with_warnings(warnings: Vec<String>) -> Self {
        Self { warnings }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandReport, CliError> {
    match &cli.command {
        Command::Fetch(args) => fetch::run(args, cli.format, cli.pretty).await,
        Command::Export(args) => export::run(args),
    }
}

/// Read a whole file, or stdin when `path` is `-`.
fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(std::fs::read_to_string(path)?)
}
