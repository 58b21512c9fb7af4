//! Stock Ledger CLI - process an inventory instruction file.
//!
//! # Usage
//!
//! ```bash
//! # Text report
//! stock-ledger instructions.txt
//!
//! # JSON report, case-insensitive keywords
//! stock-ledger --tolerant --format json instructions.txt
//!
//! # Read from stdin, alphanumeric-only SKUs
//! cat instructions.txt | stock-ledger --sku-policy alphanumeric -
//! ```
//!
//! Exits 0 when no hard error occurred, 1 otherwise.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stock_ledger::{process_str, ParseMode, ProcessorConfig, SkuPolicy, DEFAULT_MAX_STOCK_LEVEL};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stock-ledger")]
#[command(author, version, about = "Process inventory instructions and report stock levels")]
struct Cli {
    /// Instruction file, or `-` for stdin
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text, env = "STOCK_LEDGER_FORMAT")]
    format: Format,

    /// Accepted SKU-ID shape
    #[arg(long, value_enum, default_value_t = PolicyArg::Hyphenated, env = "STOCK_LEDGER_SKU_POLICY")]
    sku_policy: PolicyArg,

    /// Maximum level for set-stock / add-stock
    #[arg(long, default_value_t = DEFAULT_MAX_STOCK_LEVEL, env = "STOCK_LEDGER_MAX_STOCK")]
    max_stock: u32,

    /// Accept keywords in any case and with `_` for `-`
    #[arg(long, env = "STOCK_LEDGER_TOLERANT")]
    tolerant: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Hyphenated,
    Alphanumeric,
}

impl From<PolicyArg> for SkuPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Hyphenated => SkuPolicy::Hyphenated,
            PolicyArg::Alphanumeric => SkuPolicy::Alphanumeric,
        }
    }
}

impl Cli {
    fn config(&self) -> ProcessorConfig {
        ProcessorConfig {
            parse_mode: if self.tolerant {
                ParseMode::Tolerant
            } else {
                ParseMode::Strict
            },
            sku_policy: self.sku_policy.into(),
            max_stock_level: self.max_stock,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the run finished without hard errors
fn run(cli: &Cli) -> Result<bool> {
    let input = read_input(&cli.input)?;
    let report = process_str(&input, &cli.config());

    let rendered = match cli.format {
        Format::Text => report.render_text(),
        Format::Json => {
            let mut json = report.to_json().context("Failed to serialize report")?;
            json.push('\n');
            json
        }
    };

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", rendered).context("Failed to write report to stdout")?;
    stdout.flush().context("Failed to write report to stdout")?;

    Ok(report.is_success())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read instructions from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read instruction file {}", path.display()))
}
