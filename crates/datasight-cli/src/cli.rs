//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DataSight: data quality auditor for CSV files
#[derive(Parser)]
#[command(name = "datasight")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a data file for quality issues
    Audit {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Fill missing values and save a corrected copy
        #[arg(long)]
        auto_fix: bool,

        /// Output path for the corrected copy (default: fixed_<file>)
        #[arg(short, long, requires = "auto_fix")]
        output: Option<PathBuf>,

        /// Model to try, in order (repeatable; overrides GEMINI_MODEL)
        #[arg(short, long)]
        model: Vec<String>,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,

        /// Use scripted model replies instead of the Gemini API
        #[arg(long, conflicts_with = "no_ai")]
        mock_llm: bool,

        /// Skip the model summary and report rule findings only
        #[arg(long)]
        no_ai: bool,
    },

    /// List models available for the configured key and recommend one
    Models {
        /// Write the recommended model to the env file as GEMINI_MODEL
        #[arg(long)]
        save: bool,

        /// Env file to update
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
    },

    /// Store the API key or model candidates in an env file
    Configure {
        /// Gemini API key
        #[arg(long)]
        api_key: Option<String>,

        /// Model candidates, comma-separated
        #[arg(long)]
        model: Option<String>,

        /// Env file to update
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
    },
}
