//! Stage orchestration.
//!
//! Stages run strictly in order and only talk to each other through the
//! files they persist, so any single stage can be re-run against the output
//! of an earlier run.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use clap::ValueEnum;
use tracing::{error, info};

use crate::config::Settings;
use crate::errors::PipelineError;
use crate::ingestion::{Ingestor, LocalDirectorySource, RawSource};
use crate::io::DataRepository;
use crate::load::AnalyticsLoader;
use crate::report::StageReport;
use crate::transform::Transformer;

const BANNER_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    Ingestion,
    Transformation,
    Loading,
    All,
}

impl Stage {
    fn title(&self) -> &'static str {
        match self {
            Self::Ingestion => "Ingestion",
            Self::Transformation => "Transformation",
            Self::Loading => "Loading",
            Self::All => "Full pipeline",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Reports of a complete run, one per stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub bronze_dir: PathBuf,
    pub transformation: StageReport,
    pub loading: StageReport,
}

pub struct Pipeline {
    settings: Settings,
}

fn banner(title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    info!("{rule}");
    info!("{title}");
    info!("{rule}");
}

/// Logs the outcome of one stage and passes the result through.
fn outcome<T>(stage: Stage, result: Result<T, PipelineError>) -> Result<T, PipelineError> {
    match &result {
        Ok(_) => info!("✓ {stage} completed"),
        Err(err) => error!("✗ {stage} failed: {err}"),
    }
    result
}

impl Pipeline {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn run_ingestion(&self) -> Result<PathBuf, PipelineError> {
        banner("STAGE 1: INGESTION");
        let source = self
            .settings
            .raw_source_dir
            .as_ref()
            .map(|dir| Box::new(LocalDirectorySource::new(dir)) as Box<dyn RawSource>);
        let result = Ingestor::new(self.settings.bronze_dir(), source)
            .execute()
            .map_err(PipelineError::from);
        outcome(Stage::Ingestion, result)
    }

    pub fn run_transformation(&self) -> Result<StageReport, PipelineError> {
        banner("STAGE 2: TRANSFORMATION");
        let transformer = Transformer::new(
            DataRepository::new(self.settings.bronze_dir()),
            DataRepository::new(self.settings.silver_dir()),
            self.settings.cast_limit,
        );
        outcome(
            Stage::Transformation,
            transformer.execute().map_err(PipelineError::from),
        )
    }

    pub fn run_loading(&self) -> Result<StageReport, PipelineError> {
        banner("STAGE 3: LOADING");
        let loader = AnalyticsLoader::new(
            DataRepository::new(self.settings.silver_dir()),
            DataRepository::new(self.settings.gold_dir()),
            self.settings.analytics_options(),
        );
        outcome(Stage::Loading, loader.execute().map_err(PipelineError::from))
    }

    /// Runs every stage, stopping at the first failure.
    pub fn run_full(&self) -> Result<RunSummary, PipelineError> {
        let started = Instant::now();
        banner("MOVIE ANALYTICS PIPELINE");

        let bronze_dir = self.run_ingestion()?;
        let transformation = self.run_transformation()?;
        let loading = self.run_loading()?;

        banner("PIPELINE COMPLETED");
        let elapsed = started.elapsed().as_secs_f64();
        info!(elapsed_secs = elapsed, "Pipeline finished in {elapsed:.2}s");
        Ok(RunSummary {
            bronze_dir,
            transformation,
            loading,
        })
    }

    /// Runs the selected stage after making sure the data directories exist.
    pub fn run(&self, stage: Stage) -> Result<(), PipelineError> {
        info!(
            environment = %self.settings.environment,
            data_dir = %self.settings.data_dir.display(),
            %stage,
            "Starting pipeline"
        );
        self.settings.ensure_directories()?;

        match stage {
            Stage::Ingestion => self.run_ingestion().map(|_| ()),
            Stage::Transformation => self.run_transformation().map(|_| ()),
            Stage::Loading => self.run_loading().map(|_| ()),
            Stage::All => self.run_full().map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_without_silver_tables_fails() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default().with_overrides(None, Some(dir.path().to_path_buf()));
        let err = Pipeline::new(settings).run(Stage::Loading).unwrap_err();
        assert!(matches!(err, PipelineError::Loading(_)));
    }

    #[test]
    fn ingestion_without_raw_files_fails() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default().with_overrides(None, Some(dir.path().to_path_buf()));
        let err = Pipeline::new(settings).run(Stage::All).unwrap_err();
        assert!(matches!(err, PipelineError::Ingestion(_)));
    }
}
