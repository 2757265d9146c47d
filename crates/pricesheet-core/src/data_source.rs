//! Data provider trait and request/response types.
//!
//! A provider turns one [`SeriesRequest`] into a [`FetchOutcome`]. The
//! synthetic [`MockProvider`](crate::MockProvider) and the HTTP-backed
//! [`HttpProvider`](crate::HttpProvider) both satisfy the same contract.
//!
//! # Example
//!
//! ```rust,ignore
//! use pricesheet_core::{parse_symbols, DataProvider, DateRange, MockProvider, SeriesRequest};
//!
//! async fn fetch() -> Result<(), Box<dyn std::error::Error>> {
//!     let symbols = parse_symbols("AAPL\nMSFT");
//!     let range = DateRange::parse("2024-01-01", "2024-01-03")?;
//!     let outcome = MockProvider::default()
//!         .fetch(SeriesRequest::new(symbols, range)?)
//!         .await?;
//!     println!("{} points", outcome.collection.total_points());
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::{DateRange, SeriesCollection, Symbol, SymbolList, ValidationError};

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    InvalidRequest,
    Unavailable,
    RateLimited,
    DataUnavailable,
    InvalidResponse,
}

/// Structured provider error reported back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message)
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::DataUnavailable, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidResponse, message)
    }

    fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::InvalidRequest => "provider.invalid_request",
            ProviderErrorKind::Unavailable => "provider.unavailable",
            ProviderErrorKind::RateLimited => "provider.rate_limited",
            ProviderErrorKind::DataUnavailable => "provider.data_unavailable",
            ProviderErrorKind::InvalidResponse => "provider.invalid_response",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

impl From<ValidationError> for ProviderError {
    fn from(value: ValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// One submission: the symbols to fetch and the window to cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub symbols: SymbolList,
    pub range: DateRange,
}

impl SeriesRequest {
    /// An empty symbol list is rejected here, before anything is sent.
    pub fn new(symbols: SymbolList, range: DateRange) -> Result<Self, ValidationError> {
        if symbols.is_empty() {
            return Err(ValidationError::EmptySymbolList);
        }
        debug!(symbols = symbols.len(), %range, "series request built");
        Ok(Self { symbols, range })
    }
}

/// Provider result: the series that came back plus the symbols that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    pub collection: SeriesCollection,
    /// Requested symbols the provider returned no data for, in request order.
    pub missing: Vec<Symbol>,
}

impl FetchOutcome {
    pub fn complete(collection: SeriesCollection) -> Self {
        Self {
            collection,
            missing: Vec::new(),
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Price-series provider contract.
///
/// Implementations must be `Send + Sync`; the returned future resolves to
/// either the fetched series or a [`ProviderError`]. Nothing is retried.
pub trait DataProvider: Send + Sync {
    /// Short name used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Fetch daily series for every symbol in `req`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if:
    /// - the upstream cannot be reached or answers with a failure status
    /// - the upstream is rate limiting
    /// - the response cannot be decoded into valid series
    /// - no requested symbol has data
    fn fetch<'a>(
        &'a self,
        req: SeriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<FetchOutcome, ProviderError>> + Send + 'a>>;
}
