//! Formatted terminal output: data previews and the run summary.
//!
//! Formatting stays here so the pipeline itself never prints.

use crate::app::pipeline::RunReport;
use crate::domain::{EnrichedRecord, InputRecord};
use crate::mapping::OutputTable;

const CELL_WIDTH: usize = 24;

/// First `n` input rows, showing code, name and address lines.
pub fn format_input_preview(records: &[InputRecord], n: usize) -> String {
    let mut rows = Vec::new();
    for r in records.iter().take(n) {
        let mut cells = vec![
            r.customer_code.as_deref().unwrap_or(""),
            r.customer_name.as_deref().unwrap_or(""),
        ];
        cells.extend(r.address_lines.iter().map(|l| l.as_deref().unwrap_or("")));
        rows.push(cells);
    }

    let n_lines = records.first().map_or(0, |r| r.address_lines.len());
    let line_labels: Vec<String> = (1..=n_lines).map(|i| format!("add{i}")).collect();
    let mut header = vec!["code", "name"];
    header.extend(line_labels.iter().map(String::as_str));

    render_table(&header, &rows, records.len())
}

/// Postcode/city/state sample for the first `n` enriched rows.
pub fn format_locality_sample(records: &[EnrichedRecord], n: usize) -> String {
    let rows: Vec<Vec<&str>> = records
        .iter()
        .take(n)
        .map(|r| {
            vec![
                r.postcode_str().unwrap_or("-"),
                r.city().unwrap_or("-"),
                r.state().unwrap_or("-"),
            ]
        })
        .collect();
    render_table(&["Postcode", "City", "State"], &rows, records.len())
}

/// First `n` mapped rows, limited to a handful of identifying columns.
pub fn format_output_preview(table: &OutputTable, n: usize) -> String {
    const SHOWN: [&str; 6] = ["code", "name", "debtorCode", "address.postCode", "address.city", "address.zone"];
    let rows: Vec<Vec<&str>> = (0..table.len().min(n))
        .map(|i| SHOWN.iter().map(|c| table.value(i, c).unwrap_or("")).collect())
        .collect();
    render_table(&SHOWN, &rows, table.len())
}

pub fn format_run_summary(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("=== remap - customer address remap ===\n");
    out.push_str(&format!("Rows: {}\n", report.stats.rows));
    out.push_str(&format!(
        "Postcodes found: {} ({} without)\n",
        report.stats.postcodes_found,
        report.stats.rows - report.stats.postcodes_found
    ));
    out.push_str(&format!(
        "Localities resolved: {} ({} without)\n",
        report.stats.localities_resolved,
        report.stats.rows - report.stats.localities_resolved
    ));
    out.push_str(&format!("Reference entries: {}\n", report.reference_entries));
    out.push_str(&format!(
        "\nSUCCESS: The updated file has been saved as:\n{}\n",
        report.output_path.display()
    ));
    out
}

fn render_table(header: &[&str], rows: &[Vec<&str>], total: usize) -> String {
    let mut out = String::new();
    out.push_str(&render_row(header.iter().copied()));
    for row in rows {
        out.push_str(&render_row(row.iter().copied()));
    }
    if total > rows.len() {
        out.push_str(&format!("... ({} of {total} rows shown)\n", rows.len()));
    }
    out
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let line = cells.map(clip).collect::<Vec<_>>().join(" | ");
    format!("{}\n", line.trim_end())
}

fn clip(cell: &str) -> String {
    let n = cell.chars().count();
    if n <= CELL_WIDTH {
        format!("{cell:<CELL_WIDTH$}")
    } else {
        let head: String = cell.chars().take(CELL_WIDTH - 1).collect();
        format!("{head}…")
    }
}
