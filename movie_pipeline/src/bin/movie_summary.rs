use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use movie_pipeline::Settings;
use movie_pipeline::cli::SummaryCli;
use movie_pipeline::io::DataRepository;
use movie_pipeline::summary::{DatasetOverview, GoldSnapshot};

fn main() -> Result<ExitCode> {
    let cli = SummaryCli::parse();
    let settings = Settings::load(cli.config.as_deref())
        .context("Failed to load settings")?
        .with_overrides(None, cli.data_dir);

    let gold_dir = settings.gold_dir();
    let snapshot = GoldSnapshot::load(&DataRepository::new(&gold_dir))
        .with_context(|| format!("Failed to read analytics tables from {}", gold_dir.display()))?;

    if snapshot.is_empty() {
        eprintln!(
            "No analytics tables found in {}. Run `movie-pipeline --stage all` first.",
            gold_dir.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    let overview = DatasetOverview::from_snapshot(&snapshot);
    println!("{}", serde_json::to_string_pretty(&overview)?);
    Ok(ExitCode::SUCCESS)
}
