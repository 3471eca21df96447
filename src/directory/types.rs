//! Directory Data Types
//!
//! Defines the records produced by the loader, the column-mapping structures
//! built during schema detection, the diagnostics captured alongside the
//! cached table, and the load error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single retained practice entry.
///
/// `name` is always non-empty (nameless rows are dropped during load);
/// `address` may be empty but is never absent. `id` is the organisation code
/// when the dataset carries one, falling back to the name otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub id: String,
    pub name: String,
    pub address: String,
}

/// Logical field to column index mapping, built once per load.
///
/// `None` means the dataset has no column for that field. Absent columns
/// serialize as `null` in diagnostics output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub code: Option<usize>,
    pub name: Option<usize>,
    pub address_lines: [Option<usize>; 5],
    pub postcode: Option<usize>,
    pub status: Option<usize>,
    pub prescribing_setting: Option<usize>,
}

impl ColumnMap {
    /// The positional 27-column epraccur layout used when no header row is
    /// present.
    pub fn fixed_layout() -> Self {
        Self {
            code: Some(0),
            name: Some(1),
            address_lines: [Some(4), Some(5), Some(6), Some(7), Some(8)],
            postcode: Some(9),
            status: Some(12),
            prescribing_setting: Some(25),
        }
    }
}

/// Outcome of the header heuristic applied to row 0 of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDetection {
    /// Row 0 is a descriptive header; data starts at row 1.
    Headered(ColumnMap),
    /// No header row; the fixed epraccur positions apply from row 0.
    FixedLayout,
}

/// Introspection data captured while the table was built.
///
/// Returned verbatim to clients that pass `debug` on the search endpoint, so
/// a misdetected schema can be diagnosed without shell access to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadDiagnostics {
    pub header_cells: Vec<String>,
    pub normalized_header: Vec<String>,
    pub column_map: ColumnMap,
    pub detection_mode: String,
    pub headerless: bool,
    pub sample_records: Vec<DirectoryRecord>,
    pub record_count: usize,
}

/// The cached unit of state: every retained record in file order, plus the
/// diagnostics from the load that produced them. Read-only once built.
#[derive(Debug, Clone)]
pub struct DirectoryTable {
    pub records: Vec<DirectoryRecord>,
    pub diagnostics: LoadDiagnostics,
}

/// Load failures surfaced to the HTTP layer.
///
/// Malformed rows are not an error: rows with a wrong cell count or a missing
/// name are silently skipped in favour of partial availability. `Clone` is
/// required because a failed load is cached for the rest of the process
/// lifetime (no in-process retry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("no practice dataset found; looked for {candidates:?}")]
    DatasetMissing { candidates: Vec<String> },

    #[error("practice dataset parsed to only {rows} row(s)")]
    DatasetEmpty { rows: usize },

    #[error("failed to read practice dataset {path}: {message}")]
    Unreadable { path: String, message: String },
}
