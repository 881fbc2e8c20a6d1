//! Data source abstraction and metadata.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DatasightError, Result};

/// Tokens read as missing values, matching what common dataframe readers
/// treat as NA by default.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
    "n/a", "nan", "null",
];

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            read_at: Utc::now(),
        }
    }
}

/// Parsed tabular data. Missing cells are stored as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers, in source order.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Option<String>>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new comma-delimited data table.
    ///
    /// Repeated header names are made unique with [`dedupe_headers`].
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            headers: dedupe_headers(headers),
            rows,
            delimiter: b',',
        }
    }

    /// Set the delimiter used when writing the table back out.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|v| v.as_deref()))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Number of missing cells in a column.
    pub fn null_count(&self, index: usize) -> usize {
        self.column_values(index).filter(Option::is_none).count()
    }

    /// Get a specific cell value. `None` for missing or out-of-range cells.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|v| v.as_deref())
    }

    /// Check if a raw field represents a missing value. Fields are compared
    /// as read: `" NA"` and `"   "` are values.
    pub fn is_null_value(value: &str) -> bool {
        NA_TOKENS.contains(&value)
    }

    /// Write the table as delimited text, missing cells as empty fields.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|v| v.as_deref().unwrap_or("")))?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the table to a file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| DatasightError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.write_to(file)
    }
}

/// Rename repeated header names by suffixing `.1`, `.2`, ... to later
/// occurrences. First occurrences keep their name, and suffixes already used
/// by another header are skipped, so `["A", "A", "A.1"]` becomes
/// `["A", "A.2", "A.1"]`.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();

    headers
        .into_iter()
        .map(|name| {
            if seen.insert(name.clone()) {
                return name;
            }
            let count = counts.entry(name.clone()).or_insert(0);
            loop {
                *count += 1;
                let candidate = format!("{}.{}", name, count);
                if taken.insert(candidate.clone()) {
                    seen.insert(candidate.clone());
                    return candidate;
                }
            }
        })
        .collect()
}
