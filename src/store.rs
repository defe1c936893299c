// src/store.rs
//
// Durable tabular datasets. A dataset is a header row plus string rows, persisted as
// CSV or TSV. Reads are whole-file; writes replace the whole file atomically.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::options::{ExportFormat, Phase, ScrapeOptions};
use crate::error::StoreError;
use crate::file::replace_atomic;
use crate::model::Record;

/// Headers + rows. Every row has exactly `headers.len()` cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Add a column at the end, padding existing rows with "". Returns its index.
    pub fn add_column(&mut self, name: &str) -> usize {
        if let Some(i) = self.column(name) {
            return i;
        }
        self.headers.push(s!(name));
        for row in &mut self.rows {
            row.push(s!());
        }
        self.headers.len() - 1
    }

    /// Append a record; unknown names become new trailing columns.
    pub fn push_record(&mut self, rec: &Record) {
        for name in rec.names() {
            self.add_column(name);
        }
        let mut row = vec![s!(); self.headers.len()];
        for (name, value) in rec.iter() {
            if let Some(i) = self.column(name) {
                row[i] = s!(value);
            }
        }
        self.rows.push(row);
    }

    /// Columns in first-seen order across `records`.
    pub fn from_records(records: &[Record]) -> Self {
        let mut ds = DataSet::default();
        for rec in records {
            ds.push_record(rec);
        }
        ds
    }

    /// Row `i` as a record, empty cells included.
    pub fn record(&self, i: usize) -> Option<Record> {
        let row = self.rows.get(i)?;
        Some(self.headers.iter().zip(row).map(|(h, v)| (h.as_str(), v.as_str())).collect())
    }

    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.rows.len()).filter_map(|i| self.record(i))
    }

    /// Values of one column, in row order.
    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let i = self.column(name)?;
        Some(self.rows.iter().map(move |r| r.get(i).map(String::as_str).unwrap_or("")))
    }
}

/// One dataset file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
    format: ExportFormat,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self { path: path.into(), format }
    }

    /// The dataset a phase reads and writes.
    pub fn for_phase(opts: &ScrapeOptions, phase: Phase) -> Self {
        Self::new(opts.dataset_path(phase), opts.format)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Whole dataset. A zero-length file is an empty dataset.
    /// Short rows are padded; a row with more cells than headers is an error.
    pub fn read_all(&self) -> Result<DataSet, StoreError> {
        let bytes = fs::read(&self.path).map_err(|source| self.io_err(source))?;
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(DataSet::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.format.delim())
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes.as_slice());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| self.csv_err(source))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut ds = DataSet::new(headers);
        for result in reader.records() {
            let rec = result.map_err(|source| self.csv_err(source))?;
            if rec.len() > ds.headers.len() {
                return Err(StoreError::RowTooLong {
                    path: self.path.clone(),
                    line: rec.position().map_or(0, |p| p.line()),
                    cells: rec.len(),
                    columns: ds.headers.len(),
                });
            }
            let mut row: Vec<String> = rec.iter().map(str::to_string).collect();
            row.resize(ds.headers.len(), s!());
            ds.rows.push(row);
        }
        log::debug!("Read {} rows × {} columns from {}", ds.len(), ds.headers.len(), self.path.display());
        Ok(ds)
    }

    /// Replace the file with `ds`, creating the parent directory if needed.
    pub fn write_all(&self, ds: &DataSet) -> Result<(), StoreError> {
        replace_atomic(&self.path, |out| {
            let mut w = csv::WriterBuilder::new()
                .delimiter(self.format.delim())
                .flexible(true)
                .from_writer(out);
            w.write_record(&ds.headers).map_err(|source| self.csv_err(source))?;
            for row in &ds.rows {
                w.write_record(row).map_err(|source| self.csv_err(source))?;
            }
            w.flush().map_err(|source| self.io_err(source))
        })?;
        log::debug!("Wrote {} rows to {}", ds.len(), self.path.display());
        Ok(())
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn csv_err(&self, source: csv::Error) -> StoreError {
        StoreError::Csv { path: self.path.clone(), source }
    }
}
