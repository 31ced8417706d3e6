mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;

use commands::cap::CapArgs;
use commands::snapshot::SnapshotArgs;
use commands::workdays::WorkdaysArgs;
use output::OutputFormat;

/// Goal pacing and progress analytics for real-estate agents
#[derive(Parser)]
#[command(
    name = "pace",
    version,
    about = "Goal pacing and progress analytics for real-estate agents",
    long_about = "Computes goal pacing, activity gaps, headline KPIs, commission-cap \
                  progress and dashboard insights from monthly goal settings and \
                  logged daily activity, with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full progress snapshot for a month
    Snapshot(SnapshotArgs),
    /// Resolve total/elapsed/remaining work days for a month
    Workdays(WorkdaysArgs),
    /// Summarize annual commission cap progress
    Cap(CapArgs),
    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Snapshot(args) => commands::snapshot::run_snapshot(args),
        Commands::Workdays(args) => commands::workdays::run_workdays(args),
        Commands::Cap(args) => commands::cap::run_cap(args),
        Commands::Version => {
            println!("pace {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
