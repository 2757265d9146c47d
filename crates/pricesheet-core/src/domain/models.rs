use time::Date;

use crate::domain::date_range::format_iso_date;
use crate::{Symbol, ValidationError};

/// One daily observation: close price and traded volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: Date,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    pub fn new(date: Date, close: f64, volume: u64) -> Result<Self, ValidationError> {
        validate_non_negative("close", close)?;
        Ok(Self {
            date,
            close,
            volume,
        })
    }
}

/// Daily series for one symbol, most recent point first.
///
/// Table previews take a fixed-size prefix of `points`, so the
/// date-descending order is part of the contract.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    symbol: Symbol,
    points: Vec<PricePoint>,
}

impl SeriesRecord {
    /// Sort `points` by date descending; reject a date seen twice.
    pub fn new(symbol: Symbol, mut points: Vec<PricePoint>) -> Result<Self, ValidationError> {
        points.sort_by(|left, right| right.date.cmp(&left.date));

        if let Some(pair) = points.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(ValidationError::DuplicateDate {
                symbol: symbol.to_string(),
                date: format_iso_date(pair[0].date),
            });
        }

        Ok(Self { symbol, points })
    }

    /// Caller guarantees `points` are already strictly date-descending.
    pub(crate) fn from_descending(symbol: Symbol, points: Vec<PricePoint>) -> Self {
        debug_assert!(points.windows(2).all(|pair| pair[0].date > pair[1].date));
        Self { symbol, points }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Series for every requested symbol, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesCollection {
    records: Vec<SeriesRecord>,
}

impl SeriesCollection {
    pub fn new(records: Vec<SeriesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SeriesRecord] {
        &self.records
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&SeriesRecord> {
        self.records.iter().find(|record| record.symbol() == symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.records.iter().map(SeriesRecord::len).sum()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
