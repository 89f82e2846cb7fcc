//! Raw-data ingestion (into bronze).
//!
//! This module defines the [`RawSource`] trait, the interface for anything
//! that can deliver the raw catalog CSV files into the bronze directory.
//! [`LocalDirectorySource`] copies them from a local directory; remote
//! catalog downloads are not handled here.
//!
//! [`Ingestor`] runs the stage: it fetches from a source when one is
//! configured and then checks that the required files are present.

use std::fs;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, ensure};
use tracing::{info, warn};

use crate::errors::{
    CopyFileSnafu, IngestionError, ListRawSnafu, ListSourceSnafu, MissingRawFileSnafu,
    PrepareDirSnafu,
};
use crate::io::DataRepository;
use crate::io::repository::CSV_EXTENSION;

/// Raw files the transformation stage cannot run without.
pub const REQUIRED_RAW_FILES: [&str; 3] = ["movies_metadata.csv", "credits.csv", "keywords.csv"];

pub trait RawSource {
    /// Delivers raw files into `target` and returns the paths written.
    fn fetch(&self, target: &Path) -> Result<Vec<PathBuf>, IngestionError>;
}

/// Copies every `.csv` file of a directory, overwriting existing copies.
#[derive(Debug, Clone)]
pub struct LocalDirectorySource {
    dir: PathBuf,
}

impl LocalDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn csv_files(&self) -> Result<Vec<PathBuf>, IngestionError> {
        let entries = fs::read_dir(&self.dir).context(ListSourceSnafu { path: &self.dir })?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.context(ListSourceSnafu { path: &self.dir })?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == CSV_EXTENSION) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl RawSource for LocalDirectorySource {
    fn fetch(&self, target: &Path) -> Result<Vec<PathBuf>, IngestionError> {
        let mut written = Vec::new();
        for from in self.csv_files()? {
            let Some(name) = from.file_name() else {
                continue;
            };
            let to = target.join(name);
            fs::copy(&from, &to).context(CopyFileSnafu {
                from: &from,
                to: &to,
            })?;
            info!(file = %to.display(), "Copied raw file");
            written.push(to);
        }
        Ok(written)
    }
}

/// Runs the ingestion stage for one bronze directory.
pub struct Ingestor {
    bronze_dir: PathBuf,
    source: Option<Box<dyn RawSource>>,
}

impl Ingestor {
    pub fn new(bronze_dir: impl Into<PathBuf>, source: Option<Box<dyn RawSource>>) -> Self {
        Self {
            bronze_dir: bronze_dir.into(),
            source,
        }
    }

    /// Makes the raw files available and returns the bronze directory.
    pub fn execute(&self) -> Result<PathBuf, IngestionError> {
        fs::create_dir_all(&self.bronze_dir).context(PrepareDirSnafu {
            path: &self.bronze_dir,
        })?;

        match &self.source {
            Some(source) => {
                let fetched = source.fetch(&self.bronze_dir)?;
                info!(files = fetched.len(), "Fetched raw files");
            }
            None => warn!(
                dir = %self.bronze_dir.display(),
                "No raw source configured, using files already in the raw directory"
            ),
        }

        for path in self.raw_files()? {
            info!(file = %path.display(), "Raw file listed");
        }

        for name in REQUIRED_RAW_FILES {
            let path = self.bronze_dir.join(name);
            ensure!(path.is_file(), MissingRawFileSnafu { path });
            info!(file = name, "Raw file present");
        }
        Ok(self.bronze_dir.clone())
    }

    /// The CSV files currently in the bronze directory, sorted by path.
    pub fn raw_files(&self) -> Result<Vec<PathBuf>, IngestionError> {
        DataRepository::new(&self.bronze_dir)
            .list_files(CSV_EXTENSION)
            .context(ListRawSnafu {
                path: &self.bronze_dir,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_required(dir: &Path) {
        for name in REQUIRED_RAW_FILES {
            fs::write(dir.join(name), "id\n1\n").unwrap();
        }
    }

    #[test]
    fn local_source_copies_only_csv_files() {
        let source_dir = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write_required(source_dir.path());
        fs::write(source_dir.path().join("README.txt"), "notes").unwrap();

        let written = LocalDirectorySource::new(source_dir.path())
            .fetch(target.path())
            .unwrap();
        assert_eq!(written.len(), 3);
        assert!(!target.path().join("README.txt").exists());
    }

    #[test]
    fn ingestion_verifies_required_files() {
        let source_dir = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        write_required(source_dir.path());
        let bronze = data.path().join("raw");

        let ingestor = Ingestor::new(
            &bronze,
            Some(Box::new(LocalDirectorySource::new(source_dir.path()))),
        );
        assert_eq!(ingestor.execute().unwrap(), bronze);
    }

    #[test]
    fn raw_files_lists_only_csv_in_the_bronze_directory() {
        let data = tempfile::tempdir().unwrap();
        write_required(data.path());
        fs::write(data.path().join("ratings_small.csv"), "userId\n").unwrap();
        fs::write(data.path().join("notes.txt"), "x").unwrap();

        let ingestor = Ingestor::new(data.path(), None);
        let names: Vec<String> = ingestor
            .raw_files()
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(
            names,
            vec!["credits.csv", "keywords.csv", "movies_metadata.csv", "ratings_small.csv"]
        );
    }

    #[test]
    fn missing_required_file_is_an_ingestion_error() {
        let data = tempfile::tempdir().unwrap();
        fs::write(data.path().join("credits.csv"), "id\n").unwrap();

        let err = Ingestor::new(data.path(), None).execute().unwrap_err();
        assert!(matches!(err, IngestionError::MissingRawFile { .. }));
    }

    #[test]
    fn unreadable_source_directory_fails() {
        let data = tempfile::tempdir().unwrap();
        let source = LocalDirectorySource::new(data.path().join("absent"));
        assert!(matches!(
            source.fetch(data.path()),
            Err(IngestionError::ListSource { .. })
        ));
    }
}
