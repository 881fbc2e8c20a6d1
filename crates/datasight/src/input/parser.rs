//! CSV/TSV parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{DatasightError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    ///
    /// A file with a header but no data rows parses into an empty table;
    /// rejecting it is up to the caller.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| DatasightError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| DatasightError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse delimited bytes with a known delimiter.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result.map_err(|e| DatasightError::Parse {
                row: row_idx + 1,
                message: e.to_string(),
            })?;
            records.push(record);
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(str::to_string).collect()
        } else {
            let width = records.first().map(|r| r.len()).unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(DatasightError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let rows = records
            .iter()
            .map(|record| {
                let mut row: Vec<Option<String>> = record
                    .iter()
                    .map(|field| {
                        if DataTable::is_null_value(field) {
                            None
                        } else {
                            Some(field.to_string())
                        }
                    })
                    .collect();
                // Short rows are padded with missing cells, long rows truncated.
                row.resize(expected_cols, None);
                row
            })
            .collect();

        Ok(DataTable::new(headers, rows).with_delimiter(delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(DatasightError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs rarely occur inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_single_column() {
        let data = b"name\nAlice\nBob";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_empty() {
        assert!(matches!(
            detect_delimiter(b"\n\n"),
            Err(DatasightError::EmptyData(_))
        ));
    }

    #[test]
    fn test_parse_csv_with_missing() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,,LA\nNA,25,";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.get(0, 0), Some("Alice"));
        assert_eq!(table.get(1, 1), None);
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(2, 2), None);
    }

    #[test]
    fn test_parse_keeps_whitespace() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b" name,age\n   , NA\n", b',').unwrap();

        assert_eq!(table.headers, vec![" name", "age"]);
        assert_eq!(table.get(0, 0), Some("   "));
        assert_eq!(table.get(0, 1), Some(" NA"));
        assert_eq!(table.null_count(0) + table.null_count(1), 0);
    }

    #[test]
    fn test_parse_duplicate_headers() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"A,A\n1,\n,2\n,3\n", b',').unwrap();

        assert_eq!(table.headers, vec!["A", "A.1"]);
        assert_eq!(table.null_count(0), 2);
        assert_eq!(table.null_count(1), 1);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,b,c\n1,2\n1,2,3,4", b',').unwrap();

        assert_eq!(table.rows[0], vec![Some("1".into()), Some("2".into()), None]);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn test_parse_header_only() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,b\n", b',').unwrap();

        assert_eq!(table.column_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_without_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..Default::default()
        });
        let table = parser.parse_bytes(b"1,2\n3,4", b',').unwrap();

        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..Default::default()
        });
        let table = parser.parse_bytes(b"a\n1\n2\n3", b',').unwrap();
        assert_eq!(table.row_count(), 1);
    }
}
