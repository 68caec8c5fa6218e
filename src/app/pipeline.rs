//! The remap pipeline.
//!
//! load input -> check address columns -> combine addresses -> extract
//! postcodes -> resolve localities -> map to output schema -> persist
//!
//! Every stage runs over the full batch before the next begins. Any failure
//! aborts the run before the output file is created.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::info;

use crate::domain::{EnrichedRecord, RemapConfig};
use crate::enrich::{EnrichStats, enrich_records};
use crate::error::AppError;
use crate::io::ingest::{IngestedInput, LoadedReference, load_input_records, load_reference_table};
use crate::io::export::{output_path, write_output_csv};
use crate::mapping::{OutputSchema, OutputTable, map_records};

/// All computed outputs of a run, before anything is written.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: IngestedInput,
    pub reference: LoadedReference,
    pub enriched: Vec<EnrichedRecord>,
    pub stats: EnrichStats,
    pub table: OutputTable,
}

/// What a completed run wrote.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub reference_entries: usize,
    pub stats: EnrichStats,
}

/// Execute every in-memory stage and return the mapped table.
pub fn run_remap(config: &RemapConfig) -> Result<RunOutput, AppError> {
    // 1) Load input and check the required address columns.
    info!("Step 1: Loading '{}'...", config.input_path.display());
    let input = load_input_records(&config.input_path, &config.source)?;
    info!(
        "Step 2: {} rows loaded; required address columns present ({}).",
        input.records.len(),
        config.source.address_lines.join(", ")
    );

    // 2) Reference table. Fatal if it cannot be loaded.
    info!("Step 3: Loading postcode reference '{}'...", config.reference_path.display());
    let reference = load_reference_table(&config.reference_path)?;
    info!(
        "Reference loaded: {} postcodes ({} rows, {} skipped, {} duplicates).",
        reference.table.len(),
        reference.rows_read,
        reference.skipped,
        reference.duplicates
    );

    // 3) Combine, extract, resolve.
    info!(
        "Step 4: Combining addresses, extracting postcodes ({:?} match wins), looking up city/state...",
        config.match_policy
    );
    let (enriched, stats) = enrich_records(&input.records, &reference.table, config.match_policy);
    info!(
        "Enrichment complete: {}/{} postcodes found, {}/{} localities resolved.",
        stats.postcodes_found, stats.rows, stats.localities_resolved, stats.rows
    );

    // 4) Remap to the output schema.
    info!("Step 5: Remapping columns to the output structure...");
    let schema = OutputSchema::standard(&config.policy);
    let table = map_records(&schema, &enriched);

    Ok(RunOutput {
        input,
        reference,
        enriched,
        stats,
        table,
    })
}

/// Persist a finished run under a timestamped name in `config.output_dir`.
pub fn write_run(config: &RemapConfig, run: &RunOutput, generated_at: DateTime<Local>) -> Result<RunReport, AppError> {
    let path = output_path(&config.output_dir, &config.input_path, generated_at);
    info!("Step 6: Saving {} rows to '{}'...", run.table.len(), path.display());
    write_output_csv(&path, &run.table)?;

    Ok(RunReport {
        output_path: path,
        rows_written: run.table.len(),
        reference_entries: run.reference.table.len(),
        stats: run.stats,
    })
}

/// Run the whole pipeline and write the output file.
pub fn execute(config: &RemapConfig, generated_at: DateTime<Local>) -> Result<RunReport, AppError> {
    let run = run_remap(config)?;
    write_run(config, &run, generated_at)
}
