//! Accident File Loader Module
//! Reads yearly accident files (bzip2-compressed CSV) into Polars DataFrames.

use crate::data::year::{resolve_filename, YearTag};
use bzip2::read::BzDecoder;
use polars::prelude::*;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Rows used for schema inference.
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File '{}' does not exist", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Loads yearly accident files from a data directory.
#[derive(Debug, Clone)]
pub struct DataLoader {
    data_dir: PathBuf,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory the yearly files are looked up in.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the file holding `year`.
    pub fn year_path(&self, year: &YearTag) -> PathBuf {
        self.data_dir.join(resolve_filename(year))
    }

    /// Resolve the file for `year` and load all of its records.
    pub fn load_year(&self, year: &YearTag) -> Result<DataFrame, LoaderError> {
        Self::read_records(self.year_path(year))
    }

    /// Load one accident file, keeping every column and the row order.
    ///
    /// `.bz2` files are decompressed in memory first; anything else is read
    /// as plain CSV.
    pub fn read_records(path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoaderError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = Self::read_bytes(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let options = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS));
        let df = options
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded accident records"
        );
        Ok(df)
    }

    fn read_bytes(path: &Path) -> std::io::Result<Vec<u8>> {
        let file = File::open(path)?;
        let mut bytes = Vec::new();
        if path.extension().is_some_and(|ext| ext == "bz2") {
            BzDecoder::new(file).read_to_end(&mut bytes)?;
        } else {
            let mut file = file;
            file.read_to_end(&mut bytes)?;
        }
        Ok(bytes)
    }
}
