//! DataSight CLI - data quality auditor for CSV files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    // Missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Audit {
            file,
            auto_fix,
            output,
            model,
            json,
            mock_llm,
            no_ai,
        } => commands::audit::run(file, auto_fix, output, model, json, mock_llm, no_ai),

        Commands::Models { save, env_file } => commands::models::run(save, env_file),

        Commands::Configure {
            api_key,
            model,
            env_file,
        } => commands::configure::run(api_key, model, env_file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
