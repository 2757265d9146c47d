//! Convert a saved service response into CSV.

use std::fs::File;
use std::io::BufWriter;

use pricesheet_core::{write_csv, CoreError, SeriesCollection, StockDataResponse};
use time::UtcOffset;

use crate::cli::ExportArgs;
use crate::error::CliError;

use super::{read_input, CommandReport};

pub fn run(args: &ExportArgs) -> Result<CommandReport, CliError> {
    let collection = load_collection(&read_input(&args.input)?, args.epoch_utc_offset)?;

    match &args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_csv(&collection, writer).map_err(CoreError::from)?;
            eprintln!(
                "✓ Exported {} rows to {}",
                collection.total_points(),
                path.display()
            );
        }
        None => {
            write_csv(&collection, std::io::stdout().lock()).map_err(CoreError::from)?;
        }
    }

    Ok(CommandReport::default())
}

/// Decode a response body, keeping series in file order.
fn load_collection(body: &str, epoch_offset: UtcOffset) -> Result<SeriesCollection, CliError> {
    let response: StockDataResponse = serde_json::from_str(body)?;
    let records = response
        .data
        .into_iter()
        .map(|series| series.into_record(epoch_offset))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SeriesCollection::new(records))
}
