//! CLI argument definitions for pricesheet.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fetch` | Fetch daily series for symbols over a date range |
//! | `export` | Convert a saved service response into CSV |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, csv, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as failures |
//!
//! # Examples
//!
//! ```bash
//! # Synthetic data for two symbols, preview table on stdout
//! pricesheet fetch AAPL MSFT --start 2024-01-01 --end 2024-01-31 --mock
//!
//! # Symbols from a file, CSV saved under ./downloads
//! pricesheet fetch --symbols-file nifty.txt --out-dir downloads
//!
//! # Pipe symbols in, CSV on stdout
//! printf 'TCS\nINFY\n' | pricesheet --format csv fetch --symbols-file -
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pricesheet_core::parse_utc_offset;
use time::UtcOffset;

/// Stock price-series fetcher with CSV export.
#[derive(Debug, Parser)]
#[command(
    name = "pricesheet",
    author,
    version,
    about = "Fetch daily stock series and export them as CSV"
)]
pub struct Cli {
    /// Output format for stdout.
    ///
    /// - table: preview rows (most recent first)
    /// - csv: full export text
    /// - json: service response shape
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings (symbols without data) as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Preview table for terminal display.
    Table,
    /// CSV text with a Symbol,Date,Close,Volume header.
    Csv,
    /// JSON in the service response schema.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch daily close/volume series for one or more symbols.
    ///
    /// # Examples
    ///
    ///   pricesheet fetch RELIANCE TCS --mock
    ///   pricesheet fetch --symbols-file symbols.txt --start 2024-01-01 --end 2024-03-31
    Fetch(FetchArgs),

    /// Convert a saved service response (JSON) into CSV.
    ///
    /// # Examples
    ///
    ///   pricesheet export response.json --output stock_data.csv
    Export(ExportArgs),
}

/// Arguments for the `fetch` command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Symbols to fetch; read from --symbols-file or stdin when omitted.
    pub symbols: Vec<String>,

    /// File with one symbol per line ('-' for stdin).
    #[arg(long, conflicts_with = "symbols")]
    pub symbols_file: Option<String>,

    /// First day of the range (yyyy-MM-dd); defaults to one year before --end.
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of the range (yyyy-MM-dd); defaults to today.
    #[arg(long)]
    pub end: Option<String>,

    /// Drop repeated symbols, keeping the first occurrence.
    #[arg(long, default_value_t = false)]
    pub dedup: bool,

    /// Rows per symbol in the preview table.
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,

    /// Directory to save the CSV download into.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Name the download after the date range instead of today.
    #[arg(long, default_value_t = false)]
    pub name_by_range: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

/// Provider selection shared by data-fetching commands.
#[derive(Debug, Args)]
pub struct ProviderArgs {
    /// Use the synthetic provider instead of the HTTP service.
    #[arg(long, default_value_t = false)]
    pub mock: bool,

    /// Seed for reproducible synthetic data.
    #[arg(long, requires = "mock")]
    pub seed: Option<u64>,

    /// Simulated latency for the synthetic provider.
    #[arg(long, default_value_t = 0)]
    pub latency_ms: u64,

    /// Stock-data service URL (default: $PRICESHEET_ENDPOINT or localhost:8000).
    #[arg(long, conflicts_with = "mock")]
    pub endpoint: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, default_value_t = 3000)]
    pub timeout_ms: u64,

    /// UTC offset of the exchange day for epoch-millisecond dates (+hh:mm).
    #[arg(
        long,
        default_value = "+05:30",
        value_parser = parse_utc_offset,
        allow_hyphen_values = true
    )]
    pub epoch_utc_offset: UtcOffset,
}

/// Arguments for the `export` command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON file holding a service response ('-' for stdin).
    pub input: String,

    /// Output CSV path; stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// UTC offset of the exchange day for epoch-millisecond dates (+hh:mm).
    #[arg(
        long,
        default_value = "+05:30",
        value_parser = parse_utc_offset,
        allow_hyphen_values = true
    )]
    pub epoch_utc_offset: UtcOffset,
}
