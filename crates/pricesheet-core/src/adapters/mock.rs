use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::info;

use crate::data_source::{DataProvider, FetchOutcome, ProviderError, SeriesRequest};
use crate::{DateRange, PricePoint, SeriesCollection, SeriesRecord, SymbolList};

/// Upper bound (exclusive) for synthetic close prices.
pub const MAX_SYNTHETIC_CLOSE: f64 = 1_000.0;
/// Upper bound (exclusive) for synthetic volumes.
pub const MAX_SYNTHETIC_VOLUME: u64 = 1_000_000;

/// Produce one random point per calendar day of `range` for every symbol.
///
/// Points are date-descending and records follow `symbols` order.
pub fn generate_series(
    symbols: &SymbolList,
    range: DateRange,
    rng: &mut fastrand::Rng,
) -> SeriesCollection {
    let records = symbols
        .iter()
        .map(|symbol| {
            let points = range
                .iter_desc()
                .map(|date| PricePoint {
                    date,
                    close: rng.f64() * MAX_SYNTHETIC_CLOSE,
                    volume: rng.u64(0..MAX_SYNTHETIC_VOLUME),
                })
                .collect();
            SeriesRecord::from_descending(symbol.clone(), points)
        })
        .collect();

    SeriesCollection::new(records)
}

/// Settings for [`MockProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MockProviderConfig {
    /// Simulated round-trip delay before the series are returned.
    pub latency_ms: u64,
    /// Fixed seed for reproducible output; random when `None`.
    pub seed: Option<u64>,
}

/// Offline provider returning synthetic series.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    config: MockProviderConfig,
}

impl MockProvider {
    pub fn new(config: MockProviderConfig) -> Self {
        Self { config }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(MockProviderConfig {
            seed: Some(seed),
            ..MockProviderConfig::default()
        })
    }

    pub fn config(&self) -> MockProviderConfig {
        self.config
    }
}

impl DataProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn fetch<'a>(
        &'a self,
        req: SeriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<FetchOutcome, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            if self.config.latency_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
            }

            let mut rng = match self.config.seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            let collection = generate_series(&req.symbols, req.range, &mut rng);
            info!(
                provider = self.name(),
                records = collection.records().len(),
                points = collection.total_points(),
                "synthetic series generated"
            );

            Ok(FetchOutcome::complete(collection))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_symbols;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end).expect("valid range")
    }

    #[test]
    fn covers_every_day_of_the_range_most_recent_first() {
        let mut rng = fastrand::Rng::with_seed(7);
        let collection = generate_series(
            &parse_symbols("AAPL\nMSFT"),
            range("2024-01-01", "2024-01-31"),
            &mut rng,
        );

        assert_eq!(collection.records().len(), 2);
        for record in collection.records() {
            assert_eq!(record.len(), 31);
            assert!(record
                .points()
                .windows(2)
                .all(|pair| pair[0].date > pair[1].date));
            assert_eq!(
                record.latest().map(|p| p.date),
                Some(range("2024-01-31", "2024-01-31").end())
            );
        }
    }

    #[test]
    fn values_stay_within_placeholder_bounds() {
        let mut rng = fastrand::Rng::with_seed(11);
        let collection = generate_series(
            &parse_symbols("X"),
            range("2023-01-01", "2023-12-31"),
            &mut rng,
        );

        for point in collection.records()[0].points() {
            assert!((0.0..MAX_SYNTHETIC_CLOSE).contains(&point.close));
            assert!(point.volume < MAX_SYNTHETIC_VOLUME);
        }
    }

    #[test]
    fn keeps_symbol_order_and_duplicates() {
        let mut rng = fastrand::Rng::with_seed(3);
        let collection = generate_series(
            &parse_symbols("b\nA\nb"),
            range("2024-01-01", "2024-01-01"),
            &mut rng,
        );
        let names: Vec<_> = collection
            .records()
            .iter()
            .map(|r| r.symbol().as_str())
            .collect();
        assert_eq!(names, vec!["b", "A", "b"]);
    }

    #[tokio::test]
    async fn seeded_provider_is_reproducible() {
        let req = SeriesRequest::new(parse_symbols("AAPL"), range("2024-01-01", "2024-01-05"))
            .expect("valid request");

        let first = MockProvider::seeded(42).fetch(req.clone()).await.expect("ok");
        let second = MockProvider::seeded(42).fetch(req).await.expect("ok");

        assert_eq!(first, second);
        assert!(!first.is_partial());
    }
}
