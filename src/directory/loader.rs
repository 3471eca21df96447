//! Dataset loading: schema detection, column mapping, row filtering, and the
//! process-wide cached store.
//!
//! The extract ships in two variants. The headered variant carries a
//! descriptive first row whose cell names vary between publications, so each
//! logical field is resolved through an ordered synonym list. The headerless
//! variant is the raw 27-column epraccur file, recognisable because its first
//! cell is an organisation code (one letter, five digits) and none of its
//! row-0 cells normalize to a known field name.

use super::csv;
use super::types::{
    ColumnMap, DirectoryRecord, DirectoryTable, LoadDiagnostics, LoadError, SchemaDetection,
};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Status code marking a practice as currently active in the extract.
pub const ACTIVE_STATUS_CODE: &str = "A";
/// Prescribing-setting code identifying a GP practice (as opposed to e.g. an
/// out-of-hours service or a prison healthcare unit).
pub const GP_PRESCRIBING_SETTING: &str = "4";

/// Candidate dataset locations, relative to the working directory. The first
/// existing path wins.
pub const DATASET_CANDIDATES: [&str; 2] = ["data/epraccur.csv", "epraccur.csv"];

const DELIMITER: char = ',';
const SAMPLE_LIMIT: usize = 3;

const CODE_SYNONYMS: [&str; 4] = ["ORGCODE", "ORGANISATIONCODE", "CODE", "PRACTICECODE"];
const NAME_SYNONYMS: [&str; 4] = ["NAME", "ORGNAME", "ORGANISATIONNAME", "ORGANISATION"];
const POSTCODE_SYNONYMS: [&str; 3] = ["POSTCODE", "POSTALCODE", "PCODE"];
const STATUS_SYNONYMS: [&str; 2] = ["STATUS", "STATUSCODE"];
const SETTING_SYNONYMS: [&str; 4] = ["PRESCRIBINGSETTING", "PRESCSETTING", "PRESC", "SETTING"];

// Tokens that only matter for header detection, not for mapping.
const EXTRA_HEADER_TOKENS: [&str; 3] = ["ADDRESS", "TOWN", "COUNTY"];

static ORG_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][0-9]{5}$").expect("org code pattern"));

/// Uppercases a header cell and strips every character outside `A-Z0-9`, so
/// `"Organisation Name"`, `organisation_name` and `ORGANISATIONNAME` all
/// normalize to the same token.
pub fn normalize_header_cell(cell: &str) -> String {
    cell.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn address_synonyms(line: usize) -> [String; 3] {
    [
        format!("ADDRESS{line}"),
        format!("ADDR{line}"),
        format!("ADDRESSLINE{line}"),
    ]
}

fn is_known_header_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    CODE_SYNONYMS.contains(&token)
        || NAME_SYNONYMS.contains(&token)
        || POSTCODE_SYNONYMS.contains(&token)
        || EXTRA_HEADER_TOKENS.contains(&token)
        || (1..=5).any(|line| address_synonyms(line).iter().any(|syn| syn == token))
}

/// First synonym in list order wins when several are present in the header.
fn find_column(normalized_header: &[String], synonyms: &[&str]) -> Option<usize> {
    synonyms
        .iter()
        .find_map(|syn| normalized_header.iter().position(|token| token == syn))
}

/// Builds the column map for a headered dataset from its normalized row-0
/// tokens. Fields with no matching synonym map to `None`.
pub fn map_columns(normalized_header: &[String]) -> ColumnMap {
    let address_lines = [1, 2, 3, 4, 5].map(|line| {
        let synonyms = address_synonyms(line);
        let synonyms: Vec<&str> = synonyms.iter().map(String::as_str).collect();
        find_column(normalized_header, &synonyms)
    });

    ColumnMap {
        code: find_column(normalized_header, &CODE_SYNONYMS),
        name: find_column(normalized_header, &NAME_SYNONYMS),
        address_lines,
        postcode: find_column(normalized_header, &POSTCODE_SYNONYMS),
        status: find_column(normalized_header, &STATUS_SYNONYMS),
        prescribing_setting: find_column(normalized_header, &SETTING_SYNONYMS),
    }
}

/// Pure header heuristic over row 0.
///
/// The dataset is treated as headerless only when both conditions hold: no
/// normalized row-0 token is a known field name, and the first cell has the
/// organisation-code shape. Everything else is taken as a real header, even
/// if no field ends up mapped.
pub fn detect_schema(first_row: &[String]) -> SchemaDetection {
    let normalized: Vec<String> = first_row
        .iter()
        .map(|cell| normalize_header_cell(cell))
        .collect();

    let any_known = normalized
        .iter()
        .any(|token| is_known_header_token(token));
    let code_shaped = first_row
        .first()
        .is_some_and(|cell| ORG_CODE_RE.is_match(cell));

    if !any_known && code_shaped {
        SchemaDetection::FixedLayout
    } else {
        SchemaDetection::Headered(map_columns(&normalized))
    }
}

fn cell<'a>(row: &'a [String], index: Option<usize>) -> &'a str {
    index
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Maps one data row to a record, or `None` when the row is filtered out:
/// empty name, inactive status, or a non-GP prescribing setting. Missing
/// cells read as empty, so short rows degrade instead of failing the load.
fn map_row(row: &[String], columns: &ColumnMap) -> Option<DirectoryRecord> {
    let name = cell(row, columns.name).trim();
    if name.is_empty() {
        return None;
    }

    let status = cell(row, columns.status).trim();
    if !status.is_empty() && status != ACTIVE_STATUS_CODE {
        return None;
    }

    let setting = cell(row, columns.prescribing_setting).trim();
    if !setting.is_empty() && setting != GP_PRESCRIBING_SETTING {
        return None;
    }

    let mut parts: Vec<&str> = Vec::new();
    for index in columns.address_lines {
        let part = cell(row, index).trim();
        if !part.is_empty() {
            parts.push(part);
        }
    }
    let postcode = cell(row, columns.postcode).trim();
    if !postcode.is_empty() {
        parts.push(postcode);
    }
    let address = collapse_whitespace(&parts.join(", "));

    let code = cell(row, columns.code).trim();
    let id = if code.is_empty() { name } else { code };

    Some(DirectoryRecord {
        id: id.to_string(),
        name: name.to_string(),
        address,
    })
}

/// Parses raw dataset text into a table.
///
/// Fails with `DatasetEmpty` when fewer than two rows survive parsing;
/// individual bad rows are skipped, never fatal.
pub fn build_table(text: &str) -> Result<DirectoryTable, LoadError> {
    let rows = csv::parse_rows(text, DELIMITER);
    if rows.len() < 2 {
        return Err(LoadError::DatasetEmpty { rows: rows.len() });
    }

    let first_row = rows[0].clone();
    let normalized_header: Vec<String> = first_row
        .iter()
        .map(|cell| normalize_header_cell(cell))
        .collect();

    let (columns, data_start, detection_mode, headerless) = match detect_schema(&first_row) {
        SchemaDetection::Headered(map) => (map, 1, "headered", false),
        SchemaDetection::FixedLayout => (ColumnMap::fixed_layout(), 0, "fixed-layout", true),
    };

    let mut records = Vec::new();
    for row in &rows[data_start..] {
        if let Some(record) = map_row(row, &columns) {
            records.push(record);
        }
    }

    let diagnostics = LoadDiagnostics {
        header_cells: first_row,
        normalized_header,
        column_map: columns,
        detection_mode: detection_mode.to_string(),
        headerless,
        sample_records: records.iter().take(SAMPLE_LIMIT).cloned().collect(),
        record_count: records.len(),
    };

    Ok(DirectoryTable {
        records,
        diagnostics,
    })
}

/// Reads and parses the first candidate path that exists.
pub fn load_from_candidates<P: AsRef<Path>>(candidates: &[P]) -> Result<DirectoryTable, LoadError> {
    for candidate in candidates {
        let path = candidate.as_ref();
        if !path.exists() {
            continue;
        }
        tracing::info!("loading practice directory from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|err| LoadError::Unreadable {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        return build_table(&text);
    }

    Err(LoadError::DatasetMissing {
        candidates: candidates
            .iter()
            .map(|p| p.as_ref().display().to_string())
            .collect(),
    })
}

/// Lazily-populated holder for the parsed table.
///
/// The first `table()` call performs the filesystem read and caches the
/// outcome; every later call, from any thread, returns the cached value.
/// Failures are cached too: a broken dataset is reported the same way for
/// the rest of the process lifetime and retried only on a fresh start.
pub struct DirectoryStore {
    candidates: Vec<PathBuf>,
    table: OnceCell<Result<Arc<DirectoryTable>, LoadError>>,
}

impl DirectoryStore {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            table: OnceCell::new(),
        }
    }

    pub fn with_default_candidates() -> Self {
        Self::new(DATASET_CANDIDATES.iter().map(PathBuf::from).collect())
    }

    /// Idempotent ensure-loaded accessor.
    pub fn table(&self) -> Result<Arc<DirectoryTable>, LoadError> {
        self.table
            .get_or_init(|| match load_from_candidates(&self.candidates) {
                Ok(table) => {
                    tracing::info!(
                        "practice directory ready: {} records ({})",
                        table.records.len(),
                        table.diagnostics.detection_mode
                    );
                    Ok(Arc::new(table))
                }
                Err(err) => {
                    tracing::error!("practice directory load failed: {err}");
                    Err(err)
                }
            })
            .clone()
    }
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::with_default_candidates()
    }
}
