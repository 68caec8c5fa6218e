//! CSV/TSV ingest.
//!
//! This module turns the customer CSV into typed `InputRecord`s and the
//! postcode reference TSV into a `ReferenceTable`.
//!
//! Design goals:
//! - **Strict schema** for required columns (exact list of missing names, exit code 2)
//! - **Graceful absence** for every optional business column
//! - **Short rows are fine**: trailing cells a spreadsheet dropped read as absent;
//!   a row longer than the header aborts the load
//! - **Separation of concerns**: no enrichment or mapping logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{InputRecord, Locality, Postcode, SourceColumns};
use crate::enrich::ReferenceTable;
use crate::error::AppError;

/// Columns the reference file must carry.
pub const REFERENCE_COLUMNS: [&str; 3] = ["Postcode", "City", "State"];

/// Ingest output for the customer file.
#[derive(Debug, Clone)]
pub struct IngestedInput {
    pub records: Vec<InputRecord>,
}

/// Ingest output for the reference file.
#[derive(Debug, Clone)]
pub struct LoadedReference {
    pub table: ReferenceTable,
    pub rows_read: usize,
    /// Rows whose postcode could not be canonicalized.
    pub skipped: usize,
    /// Rows repeating an already-loaded postcode.
    pub duplicates: usize,
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    #[serde(rename = "Postcode")]
    postcode: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
}

/// Load the customer CSV and check that every address column is present.
pub fn load_input_records(path: &Path, columns: &SourceColumns) -> Result<IngestedInput, AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        IoErrorKind::NotFound => AppError::input_not_found(path),
        _ => AppError::input_unparseable(format!("failed to open '{}': {e}", path.display())),
    })?;

    // Values are kept verbatim; only header names are cleaned up.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input_unparseable(format!("failed to read CSV headers: {e}")))?
        .clone();
    if headers.iter().all(str::is_empty) {
        return Err(AppError::input_unparseable("no columns to parse"));
    }
    let header_map = build_header_map(&headers);

    ensure_required_columns_exist(&columns.address_lines, &header_map)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(AppError::input_unparseable)?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(AppError::input_unparseable(format!(
                "line {line}: expected at most {} fields, found {}",
                headers.len(),
                record.len()
            )));
        }
        records.push(parse_row(&record, &header_map, columns));
    }

    Ok(IngestedInput { records })
}

/// Report every required column missing from `header_map`, in declared order.
pub fn ensure_required_columns_exist(
    required: &[String],
    header_map: &HashMap<String, usize>,
) -> Result<(), AppError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !header_map.contains_key(name.as_str()))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::missing_columns(missing))
    }
}

/// Load the tab-separated postcode reference file.
pub fn load_reference_table(path: &Path) -> Result<LoadedReference, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::reference(format!(
            "ERROR: Could not open the postcode reference file '{}': {e}",
            path.display()
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::reference(format!("ERROR: Could not read reference headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    let missing: Vec<&str> = REFERENCE_COLUMNS
        .into_iter()
        .filter(|name| !header_map.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::reference(format!(
            "ERROR: The reference file '{}' is missing columns: {}",
            path.display(),
            missing.join(", ")
        )));
    }
    // Deserialize against the cleaned header names (BOM stripped).
    reader.set_headers(headers.iter().map(normalize_header_name).collect());

    let mut table = ReferenceTable::new();
    let mut rows_read = 0usize;
    let mut skipped = 0usize;
    let mut duplicates = 0usize;

    for result in reader.deserialize::<ReferenceRow>() {
        let row = result.map_err(|e| AppError::reference(format!("ERROR: Invalid reference row: {e}")))?;
        rows_read += 1;

        let Some(postcode) = Postcode::canonicalize(&row.postcode) else {
            warn!(value = %row.postcode, "skipping reference row with invalid postcode");
            skipped += 1;
            continue;
        };

        let locality = Locality {
            city: row.city,
            state: row.state,
        };
        if !table.insert(postcode.clone(), locality) {
            warn!(postcode = %postcode, "duplicate reference postcode, keeping first entry");
            duplicates += 1;
        }
    }

    Ok(LoadedReference {
        table,
        rows_read,
        skipped,
        duplicates,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    // Column names are otherwise matched case-sensitively.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>, columns: &SourceColumns) -> InputRecord {
    let get = |name: &str| get_optional(record, header_map, name).map(str::to_string);

    InputRecord {
        customer_code: get(&columns.customer_code),
        customer_name: get(&columns.customer_name),
        phone: get(&columns.phone),
        fax: get(&columns.fax),
        contact_name: get(&columns.contact_name),
        email: get(&columns.email),
        term: get(&columns.term),
        debtor_code_new: get(&columns.debtor_code_new),
        debtor_code_legacy: get(&columns.debtor_code_legacy),
        area_code: get(&columns.area_code),
        zone: get(&columns.zone),
        address_lines: columns.address_lines.iter().map(|name| get(name)).collect(),
    }
}

/// An absent column and an empty cell both read as `None`.
fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).filter(|s| !s.is_empty())
}
