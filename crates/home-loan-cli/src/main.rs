mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::ScheduleArgs;
use commands::scenarios::{AnalyzeArgs, PrepaymentArgs, RateChangeArgs};

/// Home loan repayment analysis
#[derive(Parser)]
#[command(
    name = "homeloan",
    version,
    about = "Home loan amortisation, rate rewrite and prepayment analysis",
    long_about = "A CLI for analysing fixed-payment home loans with decimal precision. \
                  Builds amortisation schedules, compares rewriting the loan at a new \
                  interest rate against a lump-sum prepayment, and recommends an option."
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
    /// Month-by-month amortisation schedule
    Schedule(ScheduleArgs),
    /// Impact of a one-time prepayment on interest and term
    Prepayment(PrepaymentArgs),
    /// Savings and break-even of rewriting the loan at a new rate
    RateChange(RateChangeArgs),
    /// Compare doing nothing, a rate rewrite and a prepayment
    Analyze(AnalyzeArgs),
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
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Prepayment(args) => commands::scenarios::run_prepayment(args),
        Commands::RateChange(args) => commands::scenarios::run_rate_change(args),
        Commands::Analyze(args) => commands::scenarios::run_analyze(args),
        Commands::Version => {
            println!("homeloan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
