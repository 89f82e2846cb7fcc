//! Pipeline settings.
//!
//! Settings are layered, each layer overriding the previous one:
//! built-in defaults, an optional TOML file, a `.env` file in the working
//! directory, process environment variables, and finally CLI flags
//! (see [`Settings::with_overrides`]).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared_utils::env::{EnvError, get_optional_env_var, parse_optional_env_var};
use thiserror::Error;

use crate::load::AnalyticsOptions;
use crate::logging::LogLevel;

pub const RAW_DIR: &str = "raw";
pub const PROCESSED_DIR: &str = "processed";
pub const REFINED_DIR: &str = "refined";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: Box<toml::de::Error>,
    },

    #[error("Failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Invalid setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },

    #[error("Failed to create data directory {}: {source}", path.display())]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub environment: String,
    pub log_level: String,
    /// Root of the three layer directories.
    pub data_dir: PathBuf,
    /// Also write logs to this file when set.
    pub log_file: Option<PathBuf>,
    /// Local directory the ingestion stage copies raw CSV files from.
    pub raw_source_dir: Option<PathBuf>,
    pub top_n: usize,
    pub min_rating_votes: i64,
    pub min_director_movies: i64,
    pub min_year: i32,
    pub cast_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let analytics = AnalyticsOptions::default();
        Self {
            environment: "development".to_string(),
            log_level: "INFO".to_string(),
            data_dir: PathBuf::from("./data"),
            log_file: None,
            raw_source_dir: None,
            top_n: analytics.top_n,
            min_rating_votes: analytics.min_rating_votes,
            min_director_movies: analytics.min_director_movies,
            min_year: analytics.min_year,
            cast_limit: 10,
        }
    }
}

impl Settings {
    /// Loads settings from every layer except the CLI.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }
        settings.apply_env()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    fn apply_env(&mut self) -> Result<(), EnvError> {
        if let Some(environment) = get_optional_env_var("ENVIRONMENT") {
            self.environment = environment;
        }
        if let Some(level) = get_optional_env_var("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(dir) = get_optional_env_var("DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = get_optional_env_var("LOG_FILE") {
            self.log_file = Some(PathBuf::from(file));
        }
        if let Some(dir) = get_optional_env_var("RAW_SOURCE_DIR") {
            self.raw_source_dir = Some(PathBuf::from(dir));
        }
        if let Some(top_n) = parse_optional_env_var("TOP_N")? {
            self.top_n = top_n;
        }
        if let Some(votes) = parse_optional_env_var("MIN_RATING_VOTES")? {
            self.min_rating_votes = votes;
        }
        if let Some(movies) = parse_optional_env_var("MIN_DIRECTOR_MOVIES")? {
            self.min_director_movies = movies;
        }
        if let Some(year) = parse_optional_env_var("MIN_YEAR")? {
            self.min_year = year;
        }
        if let Some(limit) = parse_optional_env_var("CAST_LIMIT")? {
            self.cast_limit = limit;
        }
        Ok(())
    }

    /// Applies CLI flags on top of the loaded settings.
    pub fn with_overrides(mut self, log_level: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level
            .parse::<LogLevel>()
            .map_err(|message| ConfigError::Invalid {
                field: "log_level",
                message,
            })?;
        if self.top_n == 0 {
            return Err(invalid("top_n", "must be at least 1"));
        }
        if self.cast_limit == 0 {
            return Err(invalid("cast_limit", "must be at least 1"));
        }
        if self.min_director_movies < 1 {
            return Err(invalid("min_director_movies", "must be at least 1"));
        }
        if self.min_rating_votes < 0 {
            return Err(invalid("min_rating_votes", "must not be negative"));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(invalid("data_dir", "must not be empty"));
        }
        Ok(())
    }

    pub fn bronze_dir(&self) -> PathBuf {
        self.data_dir.join(RAW_DIR)
    }

    pub fn silver_dir(&self) -> PathBuf {
        self.data_dir.join(PROCESSED_DIR)
    }

    pub fn gold_dir(&self) -> PathBuf {
        self.data_dir.join(REFINED_DIR)
    }

    /// Creates the three layer directories.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        for dir in [self.bronze_dir(), self.silver_dir(), self.gold_dir()] {
            fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir { path: dir, source })?;
        }
        Ok(())
    }

    pub fn analytics_options(&self) -> AnalyticsOptions {
        AnalyticsOptions {
            top_n: self.top_n,
            min_rating_votes: self.min_rating_votes,
            min_director_movies: self.min_director_movies,
            min_year: self.min_year,
        }
    }
}

fn invalid(field: &'static str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.to_string(),
    }
}
