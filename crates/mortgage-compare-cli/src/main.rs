mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use commands::amortization::{BalanceArgs, ConvertArgs, ImpliedTermArgs, PayoffArgs, PaymentArgs};
use commands::comparison::{BalanceChartArgs, BanksArgs, CompareArgs};
use commands::report::ReportArgs;

/// Mortgage repayment, extra-repayment and refinance comparison calculations
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Mortgage repayment, extra-repayment and refinance comparison calculations",
    long_about = "A CLI for mortgage amortization with decimal precision. Computes scheduled \
                  payments, converts between weekly/fortnightly/monthly frequencies, simulates \
                  extra repayments, and compares a current loan against bank rate cards."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scheduled monthly payment, with weekly/fortnightly equivalents
    Payment(PaymentArgs),
    /// Months needed to repay a loan at a given monthly payment
    ImpliedTerm(ImpliedTermArgs),
    /// Outstanding balance after a number of monthly payments
    Balance(BalanceArgs),
    /// Time and interest saved by an extra repayment
    Payoff(PayoffArgs),
    /// Convert a payment between frequencies
    Convert(ConvertArgs),
    /// Compare the current loan against candidate rates
    Compare(CompareArgs),
    /// Year-by-year balances for the current loan and each candidate
    BalanceChart(BalanceChartArgs),
    /// List built-in bank rate cards
    Banks(BanksArgs),
    /// Build a client comparison report, optionally saving or sending it
    Report(ReportArgs),
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

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mortgage_compare_core={level},mcalc={level}").into());

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::ImpliedTerm(args) => commands::amortization::run_implied_term(args),
        Commands::Balance(args) => commands::amortization::run_balance(args),
        Commands::Payoff(args) => commands::amortization::run_payoff(args),
        Commands::Convert(args) => commands::amortization::run_convert(args),
        Commands::Compare(args) => commands::comparison::run_compare(args),
        Commands::BalanceChart(args) => commands::comparison::run_balance_chart(args),
        Commands::Banks(args) => commands::comparison::run_banks(args),
        Commands::Report(args) => commands::report::run_report(args),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
