//! Dataset sources selectable from the command line.

use cvd_data::source::{CsvSource, HttpSource};
use cvd_owid::compression::{decode_body, is_gzip_path};
use cvd_owid::error::{OwidError, Result};
use std::path::PathBuf;

/// Reads a local CSV or `.csv.gz` snapshot.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CsvSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| OwidError::Fetch(format!("{}: {}", self.path.display(), e)))?;
        decode_body(bytes, is_gzip_path(&self.describe()))
    }
}

/// The remote OWID file, or a local snapshot when `--source` is given.
#[derive(Debug, Clone)]
pub enum DataSource {
    Remote(HttpSource),
    Local(FileSource),
}

impl DataSource {
    pub fn from_arg(source: Option<String>) -> Self {
        match source {
            Some(path) => DataSource::Local(FileSource::new(path)),
            None => DataSource::Remote(HttpSource::owid()),
        }
    }
}

impl CsvSource for DataSource {
    fn describe(&self) -> String {
        match self {
            DataSource::Remote(s) => s.describe(),
            DataSource::Local(s) => s.describe(),
        }
    }

    async fn fetch(&self) -> Result<String> {
        match self {
            DataSource::Remote(s) => s.fetch().await,
            DataSource::Local(s) => s.fetch().await,
        }
    }
}
