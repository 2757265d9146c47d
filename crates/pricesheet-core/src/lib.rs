//! # Pricesheet Core
//!
//! Stock price-series model and the transformations around it.
//!
//! ## Overview
//!
//! - **Symbol parsing** from free-text, one ticker per line
//! - **Domain models** for dated close/volume series, validated on construction
//! - **Data providers** behind one async trait: a synthetic generator and an
//!   HTTP adapter for the stock-data service
//! - **CSV export** and table previews
//! - **Session** state with explicit presentation events
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Mock and HTTP providers |
//! | [`data_source`] | Provider trait, request and error types |
//! | [`domain`] | Symbols, date ranges, price series |
//! | [`error`] | Core error types |
//! | [`export`] | CSV text, flat rows, previews, filenames |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`session`] | Request state machine and events |
//! | [`wire`] | JSON request/response schema |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pricesheet_core::{Event, MockProvider, Workbench, WorkbenchConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut bench = Workbench::new(MockProvider::default(), WorkbenchConfig::default());
//!     let events = bench.submit("AAPL\nMSFT", "2024-01-01", "2024-01-31").await;
//!     println!("{events:?}");
//!
//!     if let Some(Event::TriggerDownload { filename, content }) =
//!         bench.export(pricesheet_core::today_utc())
//!     {
//!         std::fs::write(filename, content).ok();
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! raw text ──▶ parse_symbols ──▶ SeriesRequest ──▶ DataProvider::fetch
//!                                                        │
//!                                  ┌─────────────────────┤
//!                                  ▼                     ▼
//!                            preview_rows              to_csv
//! ```

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod export;
pub mod http_client;
pub mod session;
pub mod wire;

// Adapter implementations
pub use adapters::{
    generate_series, HttpProvider, HttpProviderConfig, MockProvider, MockProviderConfig,
};

// Provider trait and types
pub use data_source::{DataProvider, FetchOutcome, ProviderError, ProviderErrorKind, SeriesRequest};

// Domain models
pub use domain::{
    format_compact_date, format_iso_date, parse_iso_date, parse_symbols, parse_utc_offset,
    today_utc, DateRange,
    PricePoint, SeriesCollection, SeriesRecord, Symbol, SymbolList,
};

// Error types
pub use error::{CoreError, ValidationError};

// Export
pub use export::{
    export_filename, preview_rows, range_export_filename, to_csv, to_rows, write_csv, ExportRow,
    PreviewRow, CSV_HEADER, DEFAULT_PREVIEW_ROWS,
};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Session
pub use session::{Event, RequestState, Workbench, WorkbenchConfig};

// Wire schema
pub use wire::{StockDataRequest, StockDataResponse, DEFAULT_EPOCH_OFFSET};
