mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::schedule::ScheduleArgs;

/// Loan amortization schedules with decimal precision
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules with yearly extra payments",
    long_about = "Computes a month-by-month loan amortization schedule with \
                  decimal precision, including the impact of an optional extra \
                  principal payment made every 12th month. Reports total \
                  interest, time to repay, and time saved."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Currency symbol for table output
    #[arg(long, default_value = "€", global = true)]
    symbol: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a full amortization schedule
    Schedule(ScheduleArgs),
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
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &cli.symbol, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
