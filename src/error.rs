// src/error.rs
//! Error kinds, one per layer.
//!
//! - `FetchError`: one document could not be retrieved. Isolated to its candidate.
//! - `StoreError`: the dataset file could not be read or written. Fatal to the run.
//! - `ItemError`: why a single candidate produced nothing this run.
//! - `ScrapeError`: why a whole phase/run stopped.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("no document for {url}")]
    NotFound { url: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}:{line}: {cells} cells under {columns} headers", path.display())]
    RowTooLong { path: PathBuf, line: u64, cells: usize, columns: usize },

    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("could not replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The document was fetched but lacked the structure needed to build any record.
    #[error("{0}")]
    Incomplete(String),
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("listing unavailable: {0}")]
    Fetch(#[from] FetchError),

    #[error("could not open HTTP session: {0}")]
    Session(#[source] reqwest::Error),
}
