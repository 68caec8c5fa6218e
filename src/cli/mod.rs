//! Command-line parsing for the customer remap tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the enrichment/mapping code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::MatchPolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "remap", version, about = "Customer address postcode enrichment + import remap")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enrich the customer CSV with postcode/city/state and write the import CSV.
    Run(RunArgs),
    /// Show which postcode would be extracted from a piece of address text.
    Postcode(PostcodeArgs),
    /// Look up a single postcode in the reference table.
    Lookup(LookupArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Customer CSV (needs CustomerAdd1..CustomerAdd4).
    #[arg(short, long, default_value = "./input.csv")]
    pub input: PathBuf,

    /// Tab-separated postcode reference (Postcode, City, State).
    #[arg(short, long, default_value = "./db.csv")]
    pub reference: PathBuf,

    /// Directory for the timestamped output file.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Which 5-digit token to use when an address contains several.
    #[arg(long, value_enum, default_value_t = MatchPolicy::Last)]
    pub match_policy: MatchPolicy,

    /// Rows shown in each console preview.
    #[arg(long, default_value_t = 5)]
    pub preview: usize,

    /// Only print warnings, errors, and the output path.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct PostcodeArgs {
    /// Free-form address text.
    pub text: String,

    #[arg(long, value_enum, default_value_t = MatchPolicy::Last)]
    pub match_policy: MatchPolicy,
}

#[derive(Debug, Parser, Clone)]
pub struct LookupArgs {
    /// Postcode to resolve (leading zeros optional).
    pub postcode: String,

    #[arg(short, long, default_value = "./db.csv")]
    pub reference: PathBuf,
}
