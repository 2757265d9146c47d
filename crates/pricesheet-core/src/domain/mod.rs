//! # Domain Models
//!
//! Stock price-series types shared by providers, the exporter and the
//! session layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed ticker text, case preserved |
//! | [`SymbolList`] | Ordered symbols from one submission |
//! | [`DateRange`] | Inclusive calendar range, `start <= end` |
//! | [`PricePoint`] | Date, close, volume |
//! | [`SeriesRecord`] | Points for one symbol, most recent first |
//! | [`SeriesCollection`] | Records in request order |
//!
//! Construction validates invariants; a [`SeriesRecord`] can never hold two
//! points for the same date or hold them out of order.

mod date_range;
mod models;
mod symbol;
mod symbol_list;

pub use date_range::{
    date_from_epoch_millis, format_compact_date, format_iso_date, parse_iso_date, parse_utc_offset,
    today_utc, DateRange,
};
pub use models::{PricePoint, SeriesCollection, SeriesRecord};
pub use symbol::Symbol;
pub use symbol_list::{parse_symbols, SymbolList};
