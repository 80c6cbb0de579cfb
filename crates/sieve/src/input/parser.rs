//! Plain delimited-text parser.
//!
//! Lines are split on the delimiter with quoting disabled: a delimiter inside
//! quoted text mis-aligns the row. Whitespace-only lines are skipped.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{RecordSet, SourceMetadata};
use crate::error::{Result, SieveError};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Maximum data rows to read per call (None = all).
    pub max_rows: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_rows: None,
        }
    }
}

impl ParserConfig {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Parses delimited text into records.
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

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse delimited text whose first non-empty line is the header.
    pub fn parse_str(&self, text: &str) -> Result<RecordSet> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = non_blank_lines(text);
        let header_line = lines.next().ok_or_else(SieveError::empty_input)?;
        let headers = normalize_headers(self.split_line(header_line)?);

        let body = lines.collect::<Vec<_>>().join("\n");
        let rows = self.read_rows(&body, headers.len())?;

        let set = RecordSet::from_rows(headers, [rows]);
        debug!(
            rows = set.row_count(),
            columns = set.column_count(),
            batch = set.batch(),
            "parsed delimited text"
        );
        Ok(set)
    }

    /// Parse a header-less chunk of data lines into positional rows.
    ///
    /// Hosts that split very large inputs must cut on line boundaries and
    /// hand the chunks to [`RecordSet::from_rows`] in their original order.
    pub fn parse_rows(&self, chunk: &str, width: usize) -> Result<Vec<Vec<Option<String>>>> {
        let body = non_blank_lines(chunk).collect::<Vec<_>>().join("\n");
        self.read_rows(&body, width)
    }

    /// Parse a file and return the records and source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RecordSet, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| SieveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| SieveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let text = String::from_utf8_lossy(&contents);
        let set = self.parse_str(&text)?;

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            self.config.delimiter,
            set.row_count(),
            set.column_count(),
        );

        Ok((set, metadata))
    }

    fn reader<'a>(&self, bytes: &'a [u8]) -> csv::Reader<&'a [u8]> {
        csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .quoting(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes)
    }

    fn split_line(&self, line: &str) -> Result<Vec<String>> {
        let mut reader = self.reader(line.as_bytes());
        match reader.records().next() {
            Some(record) => Ok(record?.iter().map(|s| s.to_string()).collect()),
            None => Err(SieveError::empty_input()),
        }
    }

    fn read_rows(&self, body: &str, width: usize) -> Result<Vec<Vec<Option<String>>>> {
        let mut reader = self.reader(body.as_bytes());
        let mut rows = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<Option<String>> = record
                .iter()
                .take(width)
                .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
                .collect();
            row.resize(width, None);
            rows.push(row);
        }

        Ok(rows)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|l| !l.trim().is_empty())
}

/// Make header names non-empty and unique.
///
/// Blank headers become `column_N` (1-based position); repeats get a `_2`,
/// `_3`, ... suffix so every name can key a record field.
fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (i, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("column_{}", i + 1)
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut n = 2;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        headers.push(candidate);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_example() {
        let parser = Parser::new();
        let set = parser.parse_str("a,b\n1,2\n1,2\n3,\n").unwrap();

        assert_eq!(set.headers, vec!["a", "b"]);
        assert_eq!(set.row_count(), 3);
        assert_eq!(set.records[0].get("a"), Some("1"));
        assert_eq!(set.records[0].get("b"), Some("2"));
        assert_eq!(set.records[2].get("a"), Some("3"));
        assert_eq!(set.records[2].fields().get("b"), Some(&None));
    }

    #[test]
    fn test_empty_input() {
        let parser = Parser::new();
        for text in ["", "\n\n", "   \n\t\n"] {
            match parser.parse_str(text) {
                Err(SieveError::Parse { kind }) => {
                    assert_eq!(kind, crate::error::ParseErrorKind::EmptyInput)
                }
                other => panic!("expected EmptyInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_header_only_has_no_records() {
        let set = Parser::new().parse_str("a,b\n").unwrap();
        assert_eq!(set.headers, vec!["a", "b"]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_skips_whitespace_lines_and_trims_headers() {
        let text = "\n   \n name , age \n\nAlice,30\n  \nBob,25\n";
        let set = Parser::new().parse_str(text).unwrap();

        assert_eq!(set.headers, vec!["name", "age"]);
        assert_eq!(set.row_count(), 2);
        assert_eq!(set.records[1].get("name"), Some("Bob"));
    }

    #[test]
    fn test_short_and_long_rows() {
        let set = Parser::new().parse_str("a,b,c\n1\n1,2,3,4,5\n").unwrap();

        assert_eq!(set.records[0].get("a"), Some("1"));
        assert!(set.records[0].is_missing("b"));
        assert!(set.records[0].is_missing("c"));
        assert_eq!(set.records[1].fields().len(), 3);
        assert_eq!(set.records[1].get("c"), Some("3"));
    }

    #[test]
    fn test_quotes_are_not_special() {
        let set = Parser::new().parse_str("a,b\n\"x,y\",z\n").unwrap();

        assert_eq!(set.records[0].get("a"), Some("\"x"));
        assert_eq!(set.records[0].get("b"), Some("y\""));
    }

    #[test]
    fn test_custom_delimiter_and_crlf() {
        let parser = Parser::with_config(ParserConfig::default().with_delimiter(b';'));
        let set = parser.parse_str("a;b\r\n1;2\r\n").unwrap();

        assert_eq!(set.headers, vec!["a", "b"]);
        assert_eq!(set.records[0].get("b"), Some("2"));
    }

    #[test]
    fn test_lone_carriage_return_stays_in_field() {
        let set = Parser::new().parse_str("a,b\n1\r2,3\n").unwrap();

        assert_eq!(set.row_count(), 1);
        assert_eq!(set.records[0].get("a"), Some("1\r2"));
        assert_eq!(set.records[0].get("b"), Some("3"));
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let set = Parser::new().parse_str("\u{feff}\na,b\n1,2\n").unwrap();
        assert_eq!(set.headers, vec!["a", "b"]);
        assert_eq!(set.row_count(), 1);

        let set = Parser::new().parse_str("\u{feff}a,b\n1,2\n").unwrap();
        assert_eq!(set.headers, vec!["a", "b"]);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig::default().with_max_rows(2));
        let set = parser.parse_str("a\n1\n2\n3\n").unwrap();
        assert_eq!(set.row_count(), 2);
    }

    #[test]
    fn test_normalize_headers() {
        let headers = normalize_headers(vec![
            "id".to_string(),
            String::new(),
            "id".to_string(),
            "id".to_string(),
        ]);
        assert_eq!(headers, vec!["id", "column_2", "id_2", "id_3"]);
    }

    #[test]
    fn test_chunked_parse_matches_single_parse() {
        let parser = Parser::new();
        let whole = parser.parse_str("a,b\n1,2\n3,4\n5,6\n").unwrap();

        let headers = vec!["a".to_string(), "b".to_string()];
        let first = parser.parse_rows("1,2\n3,4\n", 2).unwrap();
        let second = parser.parse_rows("\n5,6\n", 2).unwrap();
        let chunked = RecordSet::from_rows(headers, vec![first, second]);

        let keys = |s: &RecordSet| -> Vec<String> {
            s.records.iter().map(|r| r.canonical_key()).collect()
        };
        assert_eq!(keys(&whole), keys(&chunked));
        assert_eq!(chunked.records[2].id().slot, 2);
    }
}
