//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the run configuration
//! - runs the remap pipeline
//! - prints previews and the run summary

use chrono::Local;
use clap::Parser;

use crate::cli::{Command, LookupArgs, PostcodeArgs, RunArgs};
use crate::domain::{Postcode, RemapConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `remap` binary.
pub fn run() -> Result<(), AppError> {
    // `remap` and `remap --input x.csv` behave like `remap run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Postcode(args) => handle_postcode(args),
        Command::Lookup(args) => handle_lookup(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    crate::logging::init_logging(args.quiet);
    let config = remap_config_from_args(&args);

    let run = pipeline::run_remap(&config)?;

    if !args.quiet {
        let n = config.preview_rows;
        println!("Input preview:\n{}", crate::report::format_input_preview(&run.input.records, n));
        println!(
            "Sample of Postcode, City, and State:\n{}",
            crate::report::format_locality_sample(&run.enriched, n)
        );
        println!("Remapped preview:\n{}", crate::report::format_output_preview(&run.table, n));
    }

    let report = pipeline::write_run(&config, &run, Local::now())?;

    if args.quiet {
        println!("{}", report.output_path.display());
    } else {
        println!("{}", crate::report::format_run_summary(&report));
    }
    Ok(())
}

fn handle_postcode(args: PostcodeArgs) -> Result<(), AppError> {
    let candidates = crate::enrich::postcode_candidates(&args.text);
    println!("Candidates: {}", if candidates.is_empty() { "-".to_string() } else { candidates.join(", ") });
    match crate::enrich::extract_postcode(&args.text, args.match_policy) {
        Some(pc) => println!("Selected ({:?}): {pc}", args.match_policy),
        None => println!("Selected ({:?}): not found", args.match_policy),
    }
    Ok(())
}

fn handle_lookup(args: LookupArgs) -> Result<(), AppError> {
    crate::logging::init_logging(true);
    let Some(postcode) = Postcode::canonicalize(&args.postcode) else {
        println!("'{}' is not a valid postcode", args.postcode);
        return Ok(());
    };
    let reference = crate::io::load_reference_table(&args.reference)?;
    match reference.table.resolve(Some(&postcode)) {
        Some(loc) => println!("{postcode}\t{}\t{}", loc.city, loc.state),
        None => println!("{postcode}\tnot found"),
    }
    Ok(())
}

pub fn remap_config_from_args(args: &RunArgs) -> RemapConfig {
    RemapConfig {
        input_path: args.input.clone(),
        reference_path: args.reference.clone(),
        output_dir: args.output_dir.clone(),
        match_policy: args.match_policy,
        preview_rows: args.preview,
        ..RemapConfig::default()
    }
}

/// Rewrite argv so `remap` defaults to `remap run`.
///
/// Rules:
/// - `remap`                      -> `remap run`
/// - `remap -i x.csv ...`         -> `remap run -i x.csv ...`
/// - `remap --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "postcode" | "lookup");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_run() {
        assert_eq!(rewrite_args(argv(&["remap"])), argv(&["remap", "run"]));
    }

    #[test]
    fn leading_flags_are_run_flags() {
        assert_eq!(
            rewrite_args(argv(&["remap", "-i", "a.csv"])),
            argv(&["remap", "run", "-i", "a.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["remap", "--help"])), argv(&["remap", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["remap", "postcode", "x"])),
            argv(&["remap", "postcode", "x"])
        );
    }

    #[test]
    fn config_carries_cli_choices() {
        let cli = crate::cli::Cli::parse_from(argv(&["remap", "run", "--match-policy", "first", "-o", "out"]));
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = remap_config_from_args(&args);
        assert_eq!(config.match_policy, crate::domain::MatchPolicy::First);
        assert_eq!(config.output_dir, std::path::PathBuf::from("out"));
        assert_eq!(config.policy.blank_default, "TBA");
    }
}
