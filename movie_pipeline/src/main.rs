use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use movie_pipeline::cli::Cli;
use movie_pipeline::logging::{self, LogLevel};
use movie_pipeline::{Pipeline, Settings};

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())
        .context("Failed to load settings")?
        .with_overrides(cli.log_level.map(|level| level.to_string()), cli.data_dir);
    settings.validate()?;

    let level: LogLevel = settings.log_level.parse().map_err(anyhow::Error::msg)?;
    logging::init(level, settings.log_file.as_deref())?;

    Pipeline::new(settings)
        .run(cli.stage)
        .with_context(|| format!("{} stage failed", cli.stage))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
