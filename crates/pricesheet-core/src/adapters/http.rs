use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use time::UtcOffset;
use tracing::{debug, info, warn};

use crate::data_source::{DataProvider, FetchOutcome, ProviderError, SeriesRequest};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::wire::{StockDataRequest, StockDataResponse, DEFAULT_EPOCH_OFFSET};
use crate::{SeriesCollection, SeriesRecord, Symbol};

/// Backend URL used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/stock-data";
/// Environment variable overriding [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_ENV: &str = "PRICESHEET_ENDPOINT";

/// Settings for [`HttpProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProviderConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    /// Offset used to turn epoch-millisecond dates into calendar days.
    pub epoch_offset: UtcOffset,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| String::from(DEFAULT_ENDPOINT)),
            timeout_ms: 3_000,
            epoch_offset: DEFAULT_EPOCH_OFFSET,
        }
    }
}

/// Provider that posts one request to the stock-data service.
#[derive(Clone)]
pub struct HttpProvider {
    config: HttpProviderConfig,
    http_client: Arc<dyn HttpClient>,
}

impl Default for HttpProvider {
    fn default() -> Self {
        Self::new(HttpProviderConfig::default())
    }
}

impl HttpProvider {
    pub fn new(config: HttpProviderConfig) -> Self {
        Self {
            config,
            http_client: Arc::new(ReqwestHttpClient::new()),
        }
    }

    pub fn with_http_client(config: HttpProviderConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    async fn post(&self, req: &SeriesRequest) -> Result<String, ProviderError> {
        let body = serde_json::to_string(&StockDataRequest::from(req))
            .map_err(|e| ProviderError::invalid_request(format!("failed to encode request: {e}")))?;
        let request = HttpRequest::post(&self.config.endpoint)
            .with_json_body(body)
            .with_timeout_ms(self.config.timeout_ms);

        debug!(endpoint = %self.config.endpoint, range = %req.range, "posting series request");
        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.timed_out() {
                ProviderError::unavailable(format!(
                    "stock data service timed out after {} ms",
                    self.config.timeout_ms
                ))
            } else {
                ProviderError::unavailable(format!("stock data transport error: {}", e.message()))
            }
        })?;

        match response.status {
            429 => Err(ProviderError::rate_limited(
                "stock data service is rate limiting requests",
            )),
            _ if !response.is_success() => Err(ProviderError::unavailable(format!(
                "stock data service returned status {}",
                response.status
            ))),
            _ => Ok(response.body),
        }
    }
}

impl DataProvider for HttpProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    fn fetch<'a>(
        &'a self,
        req: SeriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<FetchOutcome, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.post(&req).await?;
            let response: StockDataResponse = serde_json::from_str(&body).map_err(|e| {
                ProviderError::invalid_response(format!("failed to parse stock data: {e}"))
            })?;

            let outcome = normalize_response(&req, response, self.config.epoch_offset)?;
            info!(
                provider = self.name(),
                records = outcome.collection.records().len(),
                points = outcome.collection.total_points(),
                missing = outcome.missing.len(),
                "series fetched"
            );
            Ok(outcome)
        })
    }
}

/// Map a decoded response onto the request: records in request order,
/// omitted symbols listed in `missing`, unrequested symbols dropped. A
/// symbol sent twice makes the whole response invalid.
fn normalize_response(
    req: &SeriesRequest,
    response: StockDataResponse,
    epoch_offset: UtcOffset,
) -> Result<FetchOutcome, ProviderError> {
    let mut by_symbol: HashMap<Symbol, SeriesRecord> = HashMap::with_capacity(response.data.len());
    for series in response.data {
        let record = series
            .into_record(epoch_offset)
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;
        if !req.symbols.iter().any(|symbol| symbol == record.symbol()) {
            warn!(symbol = %record.symbol(), "ignoring unrequested symbol in response");
            continue;
        }
        match by_symbol.entry(record.symbol().clone()) {
            Entry::Occupied(entry) => {
                return Err(ProviderError::invalid_response(format!(
                    "duplicate series for {}",
                    entry.key()
                )));
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
        }
    }

    let mut records = Vec::with_capacity(req.symbols.len());
    let mut missing = Vec::new();
    for symbol in &req.symbols {
        // Repeated symbols in the request each get their own copy.
        match by_symbol.get(symbol) {
            Some(record) => records.push(record.clone()),
            None => missing.push(symbol.clone()),
        }
    }

    if records.is_empty() {
        return Err(ProviderError::data_unavailable(format!(
            "no data returned for {}",
            join_symbols(&missing)
        )));
    }
    if !missing.is_empty() {
        warn!(missing = %join_symbols(&missing), "provider omitted symbols");
    }

    Ok(FetchOutcome {
        collection: SeriesCollection::new(records),
        missing,
    })
}

pub(crate) fn join_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::data_source::ProviderErrorKind;
    use crate::http_client::{HttpError, HttpResponse};
    use crate::{parse_symbols, DateRange};

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_owned(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: HttpError) -> Self {
            Self {
                response: Err(error),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn config() -> HttpProviderConfig {
        HttpProviderConfig {
            endpoint: String::from("http://service.test/api/stock-data"),
            timeout_ms: 1_500,
            epoch_offset: DEFAULT_EPOCH_OFFSET,
        }
    }

    fn request(symbols: &str) -> SeriesRequest {
        SeriesRequest::new(
            parse_symbols(symbols),
            DateRange::parse("2024-01-01", "2024-01-03").expect("valid range"),
        )
        .expect("valid request")
    }

    #[tokio::test]
    async fn posts_wire_body_with_configured_timeout() {
        let client = Arc::new(RecordingHttpClient::replying(
            200,
            r#"{"data":[{"symbol":"INFY","dates":[{"date":"2024-01-02","close":1.5,"volume":10}]}]}"#,
        ));
        let provider = HttpProvider::with_http_client(config(), client.clone());

        provider.fetch(request("INFY")).await.expect("fetch succeeds");

        let sent = client.recorded_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://service.test/api/stock-data");
        assert_eq!(sent[0].timeout_ms, 1_500);
        let body: serde_json::Value =
            serde_json::from_str(sent[0].body.as_deref().expect("body")).expect("json body");
        assert_eq!(body["symbols"], "INFY");
        assert_eq!(body["startDate"], "2024-01-01");
        assert_eq!(body["endDate"], "2024-01-03");
    }

    #[tokio::test]
    async fn maps_status_codes_to_error_kinds() {
        for (status, kind) in [
            (429, ProviderErrorKind::RateLimited),
            (500, ProviderErrorKind::Unavailable),
            (404, ProviderErrorKind::Unavailable),
        ] {
            let client = Arc::new(RecordingHttpClient::replying(status, "{}"));
            let provider = HttpProvider::with_http_client(config(), client);
            let error = provider.fetch(request("A")).await.expect_err("must fail");
            assert_eq!(error.kind(), kind, "status {status}");
        }
    }

    #[tokio::test]
    async fn timeout_reports_unavailable_with_budget() {
        let client = Arc::new(RecordingHttpClient::failing(HttpError::timeout("deadline")));
        let provider = HttpProvider::with_http_client(config(), client);

        let error = provider.fetch(request("A")).await.expect_err("must fail");
        assert_eq!(error.kind(), ProviderErrorKind::Unavailable);
        assert!(error.message().contains("1500 ms"), "{}", error.message());
    }

    #[tokio::test]
    async fn malformed_body_is_an_invalid_response() {
        let client = Arc::new(RecordingHttpClient::replying(200, "<html>oops</html>"));
        let provider = HttpProvider::with_http_client(config(), client);

        let error = provider.fetch(request("A")).await.expect_err("must fail");
        assert_eq!(error.kind(), ProviderErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn empty_data_for_every_symbol_is_data_unavailable() {
        let client = Arc::new(RecordingHttpClient::replying(200, r#"{"data":[]}"#));
        let provider = HttpProvider::with_http_client(config(), client);

        let error = provider.fetch(request("A\nB")).await.expect_err("must fail");
        assert_eq!(error.kind(), ProviderErrorKind::DataUnavailable);
        assert!(error.message().contains("A, B"));
    }

    #[test]
    fn reorders_to_request_and_drops_unrequested_symbols() {
        let response: StockDataResponse = serde_json::from_str(
            r#"{"data":[
                {"symbol":"ZZ","dates":[]},
                {"symbol":"B","dates":[{"date":"2024-01-01","close":2.0,"volume":1}]},
                {"symbol":"A","dates":[{"date":"2024-01-01","close":1.0,"volume":1}]}
            ]}"#,
        )
        .expect("decodes");

        let outcome = normalize_response(&request("A\nC\nB"), response, UtcOffset::UTC)
            .expect("partial");
        let names: Vec<_> = outcome
            .collection
            .records()
            .iter()
            .map(|r| r.symbol().as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(outcome.missing, vec![Symbol::parse("C").expect("valid")]);
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let response: StockDataResponse = serde_json::from_str(
            r#"{"data":[{"symbol":"A","dates":[
                {"date":"2024-01-01","close":1.0,"volume":1},
                {"date":"2024-01-01","close":1.1,"volume":2}
            ]}]}"#,
        )
        .expect("decodes");

        let error =
            normalize_response(&request("A"), response, UtcOffset::UTC).expect_err("must fail");
        assert_eq!(error.kind(), ProviderErrorKind::InvalidResponse);
    }

    #[test]
    fn repeated_series_for_one_symbol_is_rejected() {
        let response: StockDataResponse = serde_json::from_str(
            r#"{"data":[
                {"symbol":"A","dates":[{"date":"2024-01-01","close":1.0,"volume":1}]},
                {"symbol":"A","dates":[{"date":"2024-01-02","close":2.0,"volume":2}]}
            ]}"#,
        )
        .expect("decodes");

        let error =
            normalize_response(&request("A"), response, UtcOffset::UTC).expect_err("must fail");
        assert_eq!(error.kind(), ProviderErrorKind::InvalidResponse);
        assert!(error.message().contains("duplicate series for A"), "{}", error.message());
    }

    #[tokio::test]
    async fn epoch_dates_use_configured_offset() {
        // 2024-01-02T00:00:00+05:30
        let body = r#"{"data":[{"symbol":"A","dates":[{"date":1704133800000,"close":1.0,"volume":1.0}]}]}"#;
        let cases = [(DEFAULT_EPOCH_OFFSET, "2024-01-02"), (UtcOffset::UTC, "2024-01-01")];

        for (epoch_offset, expected) in cases {
            let client = Arc::new(RecordingHttpClient::replying(200, body));
            let provider = HttpProvider::with_http_client(
                HttpProviderConfig {
                    epoch_offset,
                    ..config()
                },
                client,
            );

            let outcome = provider.fetch(request("A")).await.expect("fetch succeeds");
            let date = outcome.collection.records()[0].points()[0].date;
            assert_eq!(crate::format_iso_date(date), expected, "offset {epoch_offset}");
        }
    }
}
