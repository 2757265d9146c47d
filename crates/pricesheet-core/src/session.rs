//! Request state and presentation events for one user session.
//!
//! A [`Workbench`] owns the latest [`RequestState`] and turns each submission
//! into a list of [`Event`]s that a front end interprets (show a
//! notification, save a download). The core never touches the terminal,
//! the filesystem or a browser.

use std::mem;

use time::Date;
use tracing::{info, warn};

use crate::adapters::join_symbols;
use crate::data_source::{DataProvider, FetchOutcome, ProviderError, SeriesRequest};
use crate::export::{export_filename, preview_rows, to_csv, PreviewRow, DEFAULT_PREVIEW_ROWS};
use crate::{parse_symbols, DateRange, SymbolList, ValidationError};

pub const SUCCESS_TITLE: &str = "Data fetched successfully";
pub const PARTIAL_TITLE: &str = "Some symbols returned no data";
pub const FAILURE_TITLE: &str = "Error fetching data";
pub const INVALID_INPUT_TITLE: &str = "Invalid input";

/// Instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NotifySuccess { title: String, description: String },
    NotifyWarning { title: String, description: String },
    NotifyError { title: String, description: String },
    TriggerDownload { filename: String, content: String },
}

/// Lifecycle of the most recent request.
///
/// Every state except `Idle` and `Succeeded` remembers the previously
/// displayed result, so a failed or in-flight request leaves the last good
/// data on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending {
        previous: Option<FetchOutcome>,
    },
    Succeeded(FetchOutcome),
    Failed {
        error: ProviderError,
        previous: Option<FetchOutcome>,
    },
}

impl RequestState {
    pub fn begin(&mut self) {
        let previous = self.take_displayed();
        *self = Self::Pending { previous };
    }

    /// Replace whatever was displayed with `outcome`.
    pub fn succeed(&mut self, outcome: FetchOutcome) {
        *self = Self::Succeeded(outcome);
    }

    pub fn fail(&mut self, error: ProviderError) {
        let previous = self.take_displayed();
        *self = Self::Failed { error, previous };
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The result currently shown to the user, if any.
    pub fn displayed(&self) -> Option<&FetchOutcome> {
        match self {
            Self::Idle => None,
            Self::Pending { previous } | Self::Failed { previous, .. } => previous.as_ref(),
            Self::Succeeded(outcome) => Some(outcome),
        }
    }

    fn take_displayed(&mut self) -> Option<FetchOutcome> {
        match mem::take(self) {
            Self::Idle => None,
            Self::Pending { previous } | Self::Failed { previous, .. } => previous,
            Self::Succeeded(outcome) => Some(outcome),
        }
    }
}

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkbenchConfig {
    /// Drop repeated symbols (first occurrence wins) before fetching.
    pub dedup_symbols: bool,
    /// Rows per symbol in [`Workbench::preview`].
    pub preview_rows: usize,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            dedup_symbols: false,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// One user session bound to a provider.
pub struct Workbench<P> {
    provider: P,
    config: WorkbenchConfig,
    state: RequestState,
}

impl<P: DataProvider> Workbench<P> {
    pub fn new(provider: P, config: WorkbenchConfig) -> Self {
        Self {
            provider,
            config,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validate raw form input into a request without sending anything.
    pub fn prepare(
        &self,
        raw_symbols: &str,
        start: &str,
        end: &str,
    ) -> Result<SeriesRequest, ValidationError> {
        let mut symbols = parse_symbols(raw_symbols);
        if self.config.dedup_symbols {
            symbols = symbols.dedup_first_seen();
        }
        SeriesRequest::new(symbols, DateRange::parse(start, end)?)
    }

    /// Validate and fetch. Invalid input yields a single error event and
    /// leaves the state untouched.
    pub async fn submit(&mut self, raw_symbols: &str, start: &str, end: &str) -> Vec<Event> {
        match self.prepare(raw_symbols, start, end) {
            Ok(req) => self.submit_request(req).await,
            Err(error) => {
                warn!(%error, "submission rejected before fetch");
                vec![Event::NotifyError {
                    title: String::from(INVALID_INPUT_TITLE),
                    description: error.to_string(),
                }]
            }
        }
    }

    /// Fetch an already validated request and record the outcome.
    pub async fn submit_request(&mut self, req: SeriesRequest) -> Vec<Event> {
        self.state.begin();
        let requested = req.symbols.len();

        match self.provider.fetch(req).await {
            Ok(outcome) => {
                let events = success_events(&outcome, requested);
                self.state.succeed(outcome);
                events
            }
            Err(error) => {
                warn!(provider = self.provider.name(), %error, "fetch failed");
                let event = Event::NotifyError {
                    title: String::from(FAILURE_TITLE),
                    description: error.message().to_owned(),
                };
                self.state.fail(error);
                vec![event]
            }
        }
    }

    /// Download of the displayed data, named after `today`.
    pub fn export(&self, today: Date) -> Option<Event> {
        let outcome = self.state.displayed()?;
        let filename = export_filename(today);
        info!(%filename, points = outcome.collection.total_points(), "csv export prepared");
        Some(Event::TriggerDownload {
            filename,
            content: to_csv(&outcome.collection),
        })
    }

    /// Table preview of the displayed data.
    pub fn preview(&self) -> Vec<PreviewRow> {
        self.state
            .displayed()
            .map(|outcome| preview_rows(&outcome.collection, self.config.preview_rows))
            .unwrap_or_default()
    }
}

fn success_events(outcome: &FetchOutcome, requested: usize) -> Vec<Event> {
    let fetched = outcome.collection.records().len();
    let mut events = vec![Event::NotifySuccess {
        title: String::from(SUCCESS_TITLE),
        description: format!("Fetched data for {fetched} of {requested} symbols"),
    }];

    if outcome.is_partial() {
        // A symbol requested twice is still one symbol without data.
        let missing = SymbolList::new(outcome.missing.clone()).dedup_first_seen();
        events.push(Event::NotifyWarning {
            title: String::from(PARTIAL_TITLE),
            description: format!(
                "No data for {} symbol(s): {}",
                missing.len(),
                join_symbols(missing.as_slice())
            ),
        });
    }
    events
}
