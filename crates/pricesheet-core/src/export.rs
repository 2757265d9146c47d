//! Flat rows, CSV text and table previews for a [`SeriesCollection`].

use std::io::Write;

use time::Date;
use tracing::warn;

use crate::domain::{format_compact_date, format_iso_date};
use crate::{DateRange, SeriesCollection, Symbol};

/// CSV header, in column order.
pub const CSV_HEADER: [&str; 4] = ["Symbol", "Date", "Close", "Volume"];
/// Rows per symbol shown in the on-screen table.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// One `(symbol, point)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub symbol: Symbol,
    pub date: Date,
    pub close: f64,
    pub volume: u64,
}

/// Display-formatted row for table previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub symbol: String,
    pub date: String,
    /// Close rounded to two decimals.
    pub close: String,
    /// Volume with thousands separators.
    pub volume: String,
}

/// Flatten `collection`: symbol order outer, most recent date first inner.
pub fn to_rows(collection: &SeriesCollection) -> Vec<ExportRow> {
    collection
        .records()
        .iter()
        .flat_map(|record| {
            record.points().iter().map(|point| ExportRow {
                symbol: record.symbol().clone(),
                date: point.date,
                close: point.close,
                volume: point.volume,
            })
        })
        .collect()
}

/// Serialize `collection` as CSV with a `Symbol,Date,Close,Volume` header.
///
/// Every record, the header included, ends with `\n`. Close keeps full
/// precision; fields holding a comma, quote or line break are quoted.
///
/// The text is built in memory, where [`write_csv`] has no I/O to fail on.
/// Use [`write_csv`] directly to stream into a file and get its errors.
pub fn to_csv(collection: &SeriesCollection) -> String {
    let mut buffer = Vec::with_capacity(32 * (collection.total_points() + 1));
    if let Err(error) = write_csv(collection, &mut buffer) {
        warn!(%error, "in-memory csv write failed; returning the rows written so far");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Stream the CSV form of `collection` into `out`.
pub fn write_csv<W: Write>(collection: &SeriesCollection, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for row in to_rows(collection) {
        let date = format_iso_date(row.date);
        let close = row.close.to_string();
        let volume = row.volume.to_string();
        writer.write_record([
            row.symbol.as_str(),
            date.as_str(),
            close.as_str(),
            volume.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Preview rows: at most `per_symbol` most recent points of each record.
pub fn preview_rows(collection: &SeriesCollection, per_symbol: usize) -> Vec<PreviewRow> {
    collection
        .records()
        .iter()
        .flat_map(|record| {
            record
                .points()
                .iter()
                .take(per_symbol)
                .map(|point| PreviewRow {
                    symbol: record.symbol().to_string(),
                    date: format_iso_date(point.date),
                    close: format!("{:.2}", point.close),
                    volume: group_thousands(point.volume),
                })
        })
        .collect()
}

/// Suggested download name: `stock_data_<yyyyMMdd>.csv` for the export day.
pub fn export_filename(today: Date) -> String {
    format!("stock_data_{}.csv", format_compact_date(today))
}

/// Download name covering a range: `stock_data_<start>_<end>.csv`.
pub fn range_export_filename(range: &DateRange) -> String {
    format!(
        "stock_data_{}_{}.csv",
        format_compact_date(range.start()),
        format_compact_date(range.end())
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
