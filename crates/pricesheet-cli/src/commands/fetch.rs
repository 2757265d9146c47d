//! Fetch series for a symbol list and render or save the result.

use std::path::{Path, PathBuf};

use pricesheet_core::{
    format_iso_date, parse_iso_date, range_export_filename, today_utc, DataProvider, DateRange,
    Event, HttpProvider, HttpProviderConfig, MockProvider, MockProviderConfig, Workbench,
    WorkbenchConfig,
};
use tracing::debug;

use crate::cli::{FetchArgs, OutputFormat, ProviderArgs};
use crate::error::CliError;
use crate::output;

use super::{read_input, CommandReport};

/// Default lookback when `--start` is omitted.
const DEFAULT_LOOKBACK_DAYS: u16 = 365;

pub async fn run(
    args: &FetchArgs,
    format: OutputFormat,
    pretty: bool,
) -> Result<CommandReport, CliError> {
    let raw_symbols = read_symbols(args)?;
    let (start, end) = resolve_range(args.start.as_deref(), args.end.as_deref())?;
    let config = WorkbenchConfig {
        dedup_symbols: args.dedup,
        preview_rows: args.preview_rows,
    };

    if args.provider.mock {
        let provider = MockProvider::new(MockProviderConfig {
            latency_ms: args.provider.latency_ms,
            seed: args.provider.seed,
        });
        let bench = Workbench::new(provider, config);
        run_with(bench, &raw_symbols, &start, &end, args, format, pretty).await
    } else {
        let provider = HttpProvider::new(http_config(&args.provider));
        let bench = Workbench::new(provider, config);
        run_with(bench, &raw_symbols, &start, &end, args, format, pretty).await
    }
}

async fn run_with<P: DataProvider>(
    mut bench: Workbench<P>,
    raw_symbols: &str,
    start: &str,
    end: &str,
    args: &FetchArgs,
    format: OutputFormat,
    pretty: bool,
) -> Result<CommandReport, CliError> {
    let request = bench.prepare(raw_symbols, start, end)?;
    let range = request.range;
    debug!(provider = bench.provider().name(), %range, "submitting");

    let events = bench.submit_request(request).await;
    let warnings = output::notify(&events);

    if let Some(error) = bench.state().error() {
        return Err(CliError::Provider(error.clone()));
    }

    if let Some(outcome) = bench.state().displayed() {
        output::render(&outcome.collection, &bench.preview(), format, pretty)?;
    }

    if let Some(dir) = &args.out_dir {
        if let Some(Event::TriggerDownload { filename, content }) = bench.export(today_utc()) {
            let filename = if args.name_by_range {
                range_export_filename(&range)
            } else {
                filename
            };
            save_download(dir, &filename, &content)?;
        }
    }

    Ok(CommandReport::with_warnings(warnings))
}

fn http_config(args: &ProviderArgs) -> HttpProviderConfig {
    let mut config = HttpProviderConfig::default();
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    config.timeout_ms = args.timeout_ms;
    config.epoch_offset = args.epoch_utc_offset;
    config
}

/// Positional symbols win; otherwise the symbols file, otherwise stdin.
fn read_symbols(args: &FetchArgs) -> Result<String, CliError> {
    if !args.symbols.is_empty() {
        return Ok(args.symbols.join("\n"));
    }
    read_input(args.symbols_file.as_deref().unwrap_or("-"))
}

/// Fill in defaults: end is today, start is a year before end.
fn resolve_range(start: Option<&str>, end: Option<&str>) -> Result<(String, String), CliError> {
    let end = match end {
        Some(value) => parse_iso_date(value)?,
        None => today_utc(),
    };
    let start = match start {
        Some(value) => value.to_owned(),
        None => format_iso_date(DateRange::trailing_days(end, DEFAULT_LOOKBACK_DAYS).start()),
    };
    Ok((start, format_iso_date(end)))
}

fn save_download(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, content)?;

    let rows = content.lines().count().saturating_sub(1);
    eprintln!("✓ Saved {rows} rows to {}", path.display());
    Ok(path)
}
