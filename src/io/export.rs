//! Export the remapped table to CSV.
//!
//! Output lands next to nothing it could clobber: the file name carries the
//! input stem plus a generation timestamp, and rows are staged in a temp file
//! that is only moved into place once fully written.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;

use crate::error::AppError;
use crate::mapping::OutputTable;

/// `<dir>/<input stem>_output_<YYYYmmdd_HHMMSS>.csv`, with a numeric suffix
/// if that name is already taken.
pub fn output_path(output_dir: &Path, input_path: &Path, generated_at: DateTime<Local>) -> PathBuf {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "input".to_string());
    let ts = generated_at.format("%Y%m%d_%H%M%S");

    let base = format!("{stem}_output_{ts}");
    let mut candidate = output_dir.join(format!("{base}.csv"));
    let mut n = 1usize;
    while candidate.exists() {
        candidate = output_dir.join(format!("{base}_{n}.csv"));
        n += 1;
    }
    candidate
}

/// Write `table` to `path` (header row = schema columns).
pub fn write_output_csv(path: &Path, table: &OutputTable) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .map_err(|e| AppError::output(format!("Failed to create output directory '{}': {e}", dir.display())))?;

    let staged = NamedTempFile::new_in(&dir)
        .map_err(|e| AppError::output(format!("Failed to stage output in '{}': {e}", dir.display())))?;

    let mut writer = csv::Writer::from_writer(staged);
    writer
        .write_record(&table.columns)
        .map_err(|e| AppError::output(format!("Failed to write output CSV header: {e}")))?;
    for row in &table.rows {
        writer
            .write_record(row.values())
            .map_err(|e| AppError::output(format!("Failed to write output CSV row: {e}")))?;
    }

    let staged = writer
        .into_inner()
        .map_err(|e| AppError::output(format!("Failed to flush output CSV: {e}")))?;
    staged
        .persist_noclobber(path)
        .map_err(|e| AppError::output(format!("Failed to save output CSV '{}': {e}", path.display())))?;

    Ok(())
}
