use std::io::{self, Write};

use pricesheet_core::{to_csv, Event, PreviewRow, SeriesCollection, StockDataResponse};

use crate::cli::OutputFormat;
use crate::error::CliError;

const TABLE_HEADER: [&str; 4] = ["Symbol", "Date", "Close Price", "Volume"];

/// Show notification events on stderr; returns the warning descriptions.
pub fn notify(events: &[Event]) -> Vec<String> {
    let mut warnings = Vec::new();
    for event in events {
        match event {
            Event::NotifySuccess { title, description } => {
                eprintln!("✓ {title}: {description}");
            }
            Event::NotifyWarning { title, description } => {
                eprintln!("⚠ {title}: {description}");
                warnings.push(description.clone());
            }
            Event::NotifyError { title, description } => {
                eprintln!("✗ {title}: {description}");
            }
            Event::TriggerDownload { .. } => {}
        }
    }
    warnings
}

pub fn render(
    collection: &SeriesCollection,
    preview: &[PreviewRow],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => out.write_all(format_table(preview).as_bytes())?,
        OutputFormat::Csv => out.write_all(to_csv(collection).as_bytes())?,
        OutputFormat::Json => {
            let response = StockDataResponse::from(collection);
            let payload = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            writeln!(out, "{payload}")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Fixed-width table; text columns left-aligned, numbers right-aligned.
fn format_table(rows: &[PreviewRow]) -> String {
    let mut widths = TABLE_HEADER.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    push_line(&mut table, TABLE_HEADER, &widths);
    let rule = widths.map(|width| "-".repeat(width));
    push_line(&mut table, rule.each_ref().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut table, cells(row), &widths);
    }
    table
}

fn cells(row: &PreviewRow) -> [&str; 4] {
    [
        row.symbol.as_str(),
        row.date.as_str(),
        row.close.as_str(),
        row.volume.as_str(),
    ]
}

fn push_line(table: &mut String, cells: [&str; 4], widths: &[usize; 4]) {
    let [symbol, date, close, volume] = cells;
    table.push_str(&format!(
        "{symbol:<w0$}  {date:<w1$}  {close:>w2$}  {volume:>w3$}\n",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    ));
}
