//! Storage access for one layer directory (bronze, silver or gold).
//!
//! Tables are stored as Snappy-compressed Parquet files named `<name>.parquet`.
//! CSV is supported as a plain-text interchange format and is how raw source
//! files are read.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use polars_io::{SerReader, SerWriter};
use snafu::{ResultExt, ensure};
use tracing::{debug, info, warn};

use crate::errors::{
    CreateDirSnafu, DecodeSnafu, EncodeSnafu, ListDirSnafu, LoadError, OpenFileSnafu,
    ReadTableSnafu, RenameSnafu, TableNotFoundSnafu, WriteTableSnafu,
};
use crate::io::frame::flatten_lists;
use crate::io::table::Table;
use crate::report::TableShape;

pub const PARQUET_EXTENSION: &str = "parquet";
pub const CSV_EXTENSION: &str = "csv";
const STAGING_SUFFIX: &str = ".tmp";

/// Reads and writes named tables inside a single directory.
#[derive(Debug, Clone)]
pub struct DataRepository {
    base_path: PathBuf,
}

impl DataRepository {
    /// Creates a repository rooted at `base_path`. The directory is created
    /// lazily on the first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Resolves `name` to a file path, appending `extension` unless the name
    /// already carries it.
    pub fn path_for(&self, name: &str, extension: &str) -> PathBuf {
        let has_extension = Path::new(name)
            .extension()
            .is_some_and(|ext| ext == extension);
        if has_extension {
            self.base_path.join(name)
        } else {
            self.base_path.join(format!("{name}.{extension}"))
        }
    }

    /// True if a Parquet table called `name` exists.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name, PARQUET_EXTENSION).is_file()
    }

    /// True if a CSV file called `name` exists.
    pub fn exists_csv(&self, name: &str) -> bool {
        self.path_for(name, CSV_EXTENSION).is_file()
    }

    fn ensure_base_dir(&self) -> Result<(), LoadError> {
        fs::create_dir_all(&self.base_path).context(CreateDirSnafu {
            path: self.base_path.clone(),
        })
    }

    fn open(&self, path: &Path) -> Result<File, LoadError> {
        ensure!(path.is_file(), TableNotFoundSnafu { path });
        File::open(path).context(OpenFileSnafu { path })
    }

    fn staging_path(&self, name: &str) -> PathBuf {
        let mut path = self.path_for(name, PARQUET_EXTENSION).into_os_string();
        path.push(STAGING_SUFFIX);
        PathBuf::from(path)
    }

    fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<(), LoadError> {
        debug!(path = %path.display(), rows = df.height(), columns = df.width(), "Writing Parquet file");
        let file = File::create(path).context(OpenFileSnafu { path })?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(df)
            .context(WriteTableSnafu { path })?;
        Ok(())
    }

    /// Writes `df` to `<name>.parquet`, replacing any previous version.
    pub fn save_parquet(&self, df: &mut DataFrame, name: &str) -> Result<PathBuf, LoadError> {
        self.ensure_base_dir()?;
        let path = self.path_for(name, PARQUET_EXTENSION);
        Self::write_parquet(df, &path)?;
        info!(path = %path.display(), "Saved Parquet file");
        Ok(path)
    }

    /// Writes a set of tables so that either all of them replace their
    /// previous versions or none does.
    ///
    /// Every frame is first written to a staging file next to its target;
    /// the staging files are renamed into place only after all writes
    /// succeeded. On a write failure the staging files are removed and the
    /// existing tables are left untouched.
    pub fn save_parquet_set(
        &self,
        frames: &mut [(&str, DataFrame)],
    ) -> Result<Vec<PathBuf>, LoadError> {
        self.ensure_base_dir()?;

        let mut staged = Vec::with_capacity(frames.len());
        for (name, df) in frames.iter_mut() {
            let staging = self.staging_path(*name);
            let written = Self::write_parquet(df, &staging);
            staged.push(staging);
            if let Err(err) = written {
                self.discard(&staged);
                return Err(err);
            }
        }

        let mut saved = Vec::with_capacity(frames.len());
        for ((name, _), staging) in frames.iter().zip(&staged) {
            let path = self.path_for(*name, PARQUET_EXTENSION);
            fs::rename(staging, &path).context(RenameSnafu {
                from: staging,
                to: &path,
            })?;
            info!(path = %path.display(), "Saved Parquet file");
            saved.push(path);
        }
        Ok(saved)
    }

    fn discard(&self, staged: &[PathBuf]) {
        for path in staged {
            if path.is_file() {
                if let Err(err) = fs::remove_file(path) {
                    warn!(path = %path.display(), %err, "Failed to remove staging file");
                }
            }
        }
    }

    /// Reads `<name>.parquet`; `name` may include the extension.
    pub fn read_parquet(&self, name: &str) -> Result<DataFrame, LoadError> {
        let path = self.path_for(name, PARQUET_EXTENSION);
        let file = self.open(&path)?;
        let df = ParquetReader::new(file)
            .finish()
            .context(ReadTableSnafu { path: path.clone() })?;

        debug!(path = %path.display(), rows = df.height(), columns = df.width(), "Loaded Parquet file");
        Ok(df)
    }

    /// Writes `df` as CSV with a header row. List columns are joined with `|`.
    pub fn save_csv(&self, df: &DataFrame, name: &str) -> Result<PathBuf, LoadError> {
        self.ensure_base_dir()?;
        let path = self.path_for(name, CSV_EXTENSION);
        let mut flat = flatten_lists(df).context(EncodeSnafu { table: name })?;

        let mut file = File::create(&path).context(OpenFileSnafu { path: path.clone() })?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut flat)
            .context(WriteTableSnafu { path: path.clone() })?;

        info!(path = %path.display(), "Saved CSV file");
        Ok(path)
    }

    /// Reads a CSV file with every column kept as text.
    ///
    /// No type inference happens here: coercion belongs to the normalizers,
    /// which degrade bad cells field by field. Rows with too many fields are
    /// truncated, short rows are padded with nulls, and invalid UTF-8 is
    /// replaced with U+FFFD instead of failing the whole file.
    pub fn read_csv(&self, name: &str) -> Result<DataFrame, LoadError> {
        let path = self.path_for(name, CSV_EXTENSION);
        ensure!(path.is_file(), TableNotFoundSnafu { path: path.clone() });

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .map_parse_options(|opts| {
                opts.with_truncate_ragged_lines(true)
                    .with_encoding(CsvEncoding::LossyUtf8)
            })
            .try_into_reader_with_file_path(Some(path.clone()))
            .and_then(|reader| reader.finish())
            .context(ReadTableSnafu { path: path.clone() })?;

        debug!(path = %path.display(), rows = df.height(), columns = df.width(), "Loaded CSV file");
        Ok(df)
    }

    /// Encodes `rows` and writes them as the table `T::NAME`.
    pub fn save_table<T: Table>(&self, rows: &[T]) -> Result<TableShape, LoadError> {
        let mut df = T::to_frame(rows).context(EncodeSnafu { table: T::NAME })?;
        self.save_parquet(&mut df, T::NAME)?;
        Ok(TableShape::of(&df))
    }

    /// Reads the table `T::NAME` back into records.
    pub fn read_table<T: Table>(&self) -> Result<Vec<T>, LoadError> {
        let df = self.read_parquet(T::NAME)?;
        T::from_frame(&df).context(DecodeSnafu { table: T::NAME })
    }

    /// Lists files in the directory with the given extension, sorted by path.
    /// A missing directory lists as empty.
    pub fn list_files(&self, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
        if !self.base_path.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.base_path).context(ListDirSnafu {
            path: self.base_path.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.context(ListDirSnafu {
                path: self.base_path.clone(),
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_for_accepts_names_with_or_without_extension() {
        let repo = DataRepository::new("/data/refined");
        assert_eq!(
            repo.path_for("top_movies", PARQUET_EXTENSION),
            PathBuf::from("/data/refined/top_movies.parquet")
        );
        assert_eq!(
            repo.path_for("top_movies.parquet", PARQUET_EXTENSION),
            PathBuf::from("/data/refined/top_movies.parquet")
        );
        assert_eq!(
            repo.path_for("ratings_small", CSV_EXTENSION),
            PathBuf::from("/data/refined/ratings_small.csv")
        );
    }

    #[test]
    fn reading_a_missing_table_is_a_loading_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = DataRepository::new(dir.path());
        assert!(matches!(
            repo.read_parquet("nope"),
            Err(LoadError::TableNotFound { .. })
        ));
        assert!(matches!(
            repo.read_csv("nope"),
            Err(LoadError::TableNotFound { .. })
        ));
    }

    #[test]
    fn corrupt_table_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.parquet"), b"definitely not parquet").unwrap();
        let repo = DataRepository::new(dir.path());
        assert!(matches!(
            repo.read_parquet("broken"),
            Err(LoadError::ReadTable { .. })
        ));
    }

    #[test]
    fn save_creates_nested_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let repo = DataRepository::new(dir.path().join("a").join("b"));

        let mut first = DataFrame::new(vec![Column::new("x".into(), vec![1i64, 2, 3])]).unwrap();
        repo.save_parquet(&mut first, "t").unwrap();
        let mut second = DataFrame::new(vec![Column::new("x".into(), vec![9i64])]).unwrap();
        repo.save_parquet(&mut second, "t").unwrap();

        let back = repo.read_parquet("t").unwrap();
        assert_eq!(back.height(), 1);
    }

    #[test]
    fn csv_reads_every_column_as_text() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("raw.csv"),
            "id,budget,title\n1,100,Alpha\nabc,,Beta\n",
        )
        .unwrap();
        let repo = DataRepository::new(dir.path());

        let df = repo.read_csv("raw").unwrap();
        assert_eq!(df.height(), 2);
        for col in df.get_columns() {
            assert_eq!(col.dtype(), &DataType::String);
        }
    }

    #[test]
    fn list_files_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "x\n1\n").unwrap();
        fs::write(dir.path().join("a.csv"), "x\n1\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        let repo = DataRepository::new(dir.path());

        let files = repo.list_files(CSV_EXTENSION).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }
}
