use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogLevel;
use crate::pipeline::Stage;

#[derive(Debug, Parser)]
#[command(author, version, about = "Movie analytics pipeline (bronze → silver → gold)")]
pub struct Cli {
    /// Stage to run
    #[arg(long, value_enum, default_value_t = Stage::All)]
    pub stage: Stage,

    /// Log level: DEBUG, INFO, WARNING or ERROR (overrides the settings)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Path to a TOML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root data directory (overrides the settings)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Print an overview of the analytics tables as JSON")]
pub struct SummaryCli {
    /// Path to a TOML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root data directory (overrides the settings)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definitions_are_consistent() {
        Cli::command().debug_assert();
        SummaryCli::command().debug_assert();
    }

    #[test]
    fn stage_defaults_to_all() {
        let cli = Cli::try_parse_from(["movie-pipeline"]).unwrap();
        assert_eq!(cli.stage, Stage::All);
        assert_eq!(cli.log_level, None);
    }

    #[test]
    fn parses_stage_and_level() {
        let cli = Cli::try_parse_from([
            "movie-pipeline",
            "--stage",
            "transformation",
            "--log-level",
            "WARNING",
            "--data-dir",
            "/tmp/movies",
        ])
        .unwrap();
        assert_eq!(cli.stage, Stage::Transformation);
        assert_eq!(cli.log_level, Some(LogLevel::Warning));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/movies")));
    }

    #[test]
    fn rejects_unknown_stage() {
        assert!(Cli::try_parse_from(["movie-pipeline", "--stage", "publish"]).is_err());
    }
}
