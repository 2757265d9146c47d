//! JSON wire contract shared with the upstream stock-data service.
//!
//! Request: `{ "symbols": "AAPL\nMSFT", "startDate": "2024-01-01", "endDate": "2024-01-31" }`
//!
//! Response: `{ "data": [ { "symbol": "AAPL", "dates": [ { "date", "close", "volume" } ] } ] }`
//!
//! The service reports `date` as epoch milliseconds and `volume` as a JSON
//! float; ISO date strings and integer volumes are accepted as well. Epoch
//! dates are midnight in the exchange's zone, so they are read at a UTC
//! offset ([`DEFAULT_EPOCH_OFFSET`] for NSE listings).

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use time::macros::offset;
use time::UtcOffset;

use crate::domain::{date_from_epoch_millis, format_iso_date, parse_iso_date};
use crate::{PricePoint, SeriesCollection, SeriesRecord, SeriesRequest, Symbol, ValidationError};

/// Offset at which epoch-millisecond dates are turned into calendar days
/// (Asia/Kolkata).
pub const DEFAULT_EPOCH_OFFSET: UtcOffset = offset!(+5:30);

/// Request body posted to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDataRequest {
    pub symbols: String,
    pub start_date: String,
    pub end_date: String,
}

impl From<&SeriesRequest> for StockDataRequest {
    fn from(req: &SeriesRequest) -> Self {
        Self {
            symbols: req.symbols.to_newline_text(),
            start_date: format_iso_date(req.range.start()),
            end_date: format_iso_date(req.range.end()),
        }
    }
}

/// Response body returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDataResponse {
    pub data: Vec<WireSeries>,
}

impl From<&SeriesCollection> for StockDataResponse {
    fn from(collection: &SeriesCollection) -> Self {
        Self {
            data: collection.records().iter().map(WireSeries::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSeries {
    pub symbol: String,
    pub dates: Vec<WirePoint>,
}

impl WireSeries {
    pub fn into_record(self, epoch_offset: UtcOffset) -> Result<SeriesRecord, ValidationError> {
        let symbol = Symbol::parse(&self.symbol)?;
        let points = self
            .dates
            .into_iter()
            .map(|point| point.into_point(epoch_offset))
            .collect::<Result<Vec<_>, _>>()?;
        SeriesRecord::new(symbol, points)
    }
}

impl From<&SeriesRecord> for WireSeries {
    fn from(record: &SeriesRecord) -> Self {
        Self {
            symbol: record.symbol().to_string(),
            dates: record
                .points()
                .iter()
                .map(|point| WirePoint {
                    date: WireDate::Iso(format_iso_date(point.date)),
                    close: point.close,
                    volume: point.volume,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    pub date: WireDate,
    pub close: f64,
    #[serde(deserialize_with = "deserialize_volume")]
    pub volume: u64,
}

impl WirePoint {
    pub fn into_point(self, epoch_offset: UtcOffset) -> Result<PricePoint, ValidationError> {
        PricePoint::new(self.date.to_date(epoch_offset)?, self.close, self.volume)
    }
}

/// Point date as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireDate {
    EpochMillis(f64),
    Iso(String),
}

impl WireDate {
    /// Calendar date of this value; `epoch_offset` only applies to epoch
    /// milliseconds, ISO strings already name their day.
    pub fn to_date(&self, epoch_offset: UtcOffset) -> Result<time::Date, ValidationError> {
        match self {
            Self::EpochMillis(millis) if millis.is_finite() => {
                date_from_epoch_millis(millis.round() as i64, epoch_offset)
            }
            Self::EpochMillis(millis) => Err(ValidationError::InvalidDate {
                value: millis.to_string(),
            }),
            // Accept full timestamps by keeping only the calendar part.
            Self::Iso(value) => parse_iso_date(value.get(..10).unwrap_or(value)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVolume {
    Integer(u64),
    Float(f64),
}

fn deserialize_volume<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawVolume::deserialize(deserializer)? {
        RawVolume::Integer(value) => Ok(value),
        RawVolume::Float(value) if value.is_finite() && value >= 0.0 => Ok(value.trunc() as u64),
        RawVolume::Float(value) => Err(D::Error::custom(format!(
            "volume must be a non-negative number, got {value}"
        ))),
    }
}
