mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::context::ContextArgs;
use commands::schedule::ScheduleArgs;

/// Loan amortisation schedules with decimal precision
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortisation schedule calculator",
    long_about = "Computes period-by-period loan amortisation schedules with decimal \
                  precision. Supports upfront and ongoing fees and time-scoped \
                  introductory interest rates."
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
    /// Calculate the full amortisation schedule
    Schedule(ScheduleArgs),
    /// Inspect the resolved loan context at a single period
    Context(ContextArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Context(args) => commands::context::run_context(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
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
