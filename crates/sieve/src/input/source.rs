//! Parsed records, record identity, and source metadata.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Generation counter for parse events.
static NEXT_BATCH: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a record within one parse event.
///
/// `slot` is the record's position in the parsed sequence. `batch` tags the
/// parse event itself, so ids from two different parses never compare equal
/// even when their slots do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId {
    pub batch: u64,
    pub slot: usize,
}

/// One parsed data row keyed by original column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    fields: IndexMap<String, Option<String>>,
}

impl Record {
    /// Create a record from an ordered field map.
    pub fn new(id: RecordId, fields: IndexMap<String, Option<String>>) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Ordered field map, in header order.
    pub fn fields(&self) -> &IndexMap<String, Option<String>> {
        &self.fields
    }

    /// Get a non-null field value.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(|v| v.as_deref())
    }

    /// Whether the named field is null, empty, or absent from this record.
    pub fn is_missing(&self, column: &str) -> bool {
        match self.fields.get(column) {
            Some(Some(value)) => value.is_empty(),
            _ => true,
        }
    }

    /// Whether any field in `scope` is null, empty, or absent.
    pub fn has_missing(&self, scope: &FieldScope) -> bool {
        match scope {
            FieldScope::All => self.fields.keys().any(|k| self.is_missing(k)),
            FieldScope::Columns(columns) => columns.iter().any(|c| self.is_missing(c)),
        }
    }

    /// Non-null values of the fields in `scope`, in field order.
    pub fn values<'a>(&'a self, scope: &'a FieldScope) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(k, _)| scope.includes(k))
            .filter_map(|(_, v)| v.as_deref())
    }

    /// Deterministic string form used for duplicate comparison.
    ///
    /// Covers every field in parse order, independent of any schema edits.
    /// Null and empty-string fields serialize differently.
    pub fn canonical_key(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{:?}:{:?}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Which fields of a record an operation looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldScope {
    /// Every field the record carries.
    #[default]
    All,
    /// Only the named columns (typically the visible ones of a schema).
    Columns(Vec<String>),
}

impl FieldScope {
    pub fn includes(&self, column: &str) -> bool {
        match self {
            FieldScope::All => true,
            FieldScope::Columns(columns) => columns.iter().any(|c| c == column),
        }
    }
}

/// The output of one parse event: headers plus records.
#[derive(Debug, Clone)]
pub struct RecordSet {
    /// Column headers in file order.
    pub headers: Vec<String>,
    /// Records in file order.
    pub records: Vec<Record>,
    batch: u64,
}

impl RecordSet {
    /// Build a record set from positional rows, assigning a fresh batch.
    ///
    /// Rows are consumed chunk by chunk in iteration order, so a host that
    /// parsed line-aligned chunks separately gets the same slots it would
    /// have from a single parse.
    pub fn from_rows<I>(headers: Vec<String>, chunks: I) -> Self
    where
        I: IntoIterator<Item = Vec<Vec<Option<String>>>>,
    {
        let batch = NEXT_BATCH.fetch_add(1, Ordering::Relaxed);
        let mut records = Vec::new();

        for row in chunks.into_iter().flatten() {
            let id = RecordId {
                batch,
                slot: records.len(),
            };
            let mut values = row.into_iter();
            let fields = headers
                .iter()
                .map(|h| (h.clone(), values.next().flatten()))
                .collect();
            records.push(Record::new(id, fields));
        }

        Self {
            headers,
            records,
            batch,
        }
    }

    /// The parse-event tag shared by every record in this set.
    pub fn batch(&self) -> u64 {
        self.batch
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        if id.batch != self.batch {
            return None;
        }
        self.records.get(id.slot)
    }
}

/// Metadata about a source data file.
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
    /// Field delimiter used.
    pub delimiter: char,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was parsed.
    pub parsed_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        delimiter: u8,
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
            delimiter: delimiter as char,
            row_count,
            column_count,
            parsed_at: Utc::now(),
        }
    }
}
