//! Load and search controllers.
//!
//! A controller owns the visible state for one view. Every load takes a
//! [`LoadTicket`] from a monotonically increasing generation counter; when
//! the fetch settles the ticket is checked against the current generation and
//! anything older is dropped without touching the view.
//!
//! The controllers never retry on their own. [`ChartController::retry`] and
//! [`SearchController::retry`] re-issue the last parameters, which each
//! controller keeps in its own state.

use serde::Serialize;
use tracing::{info, warn};

use crate::classify::{classify, ErrorCategory, FetchFailure, Locale};
use crate::client::{MarketDataSource, SearchQuery};
use crate::pipeline::ChartFrame;
use crate::{chart_title, DateRange, MergedRecord, SecurityCode, SecurityInfo};

/// Parameters of one chart load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRequest {
    pub code: SecurityCode,
    pub range: DateRange,
}

impl ChartRequest {
    pub fn new(code: SecurityCode, range: DateRange) -> Self {
        Self { code, range }
    }
}

/// Proof that a load was started at a given generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket<R> {
    generation: u64,
    request: R,
}

impl<R> LoadTicket<R> {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &R {
        &self.request
    }
}

/// A fetch that has finished, successfully or not, tagged with its ticket.
#[derive(Debug)]
pub struct Settled<R, T> {
    ticket: LoadTicket<R>,
    outcome: Result<T, FetchFailure>,
}

impl<R, T> Settled<R, T> {
    pub fn new(ticket: LoadTicket<R>, outcome: Result<T, FetchFailure>) -> Self {
        Self { ticket, outcome }
    }

    pub const fn generation(&self) -> u64 {
        self.ticket.generation
    }
}

/// What happened to a settled fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The fetch belonged to the current generation and now drives the view.
    Applied,
    /// A newer load started meanwhile; the result was dropped.
    Stale,
}

/// Generation counter plus last-issued parameters.
#[derive(Debug, Clone)]
struct Generations<R> {
    current: u64,
    last: Option<R>,
}

impl<R> Default for Generations<R> {
    fn default() -> Self {
        Self {
            current: 0,
            last: None,
        }
    }
}

impl<R: Clone> Generations<R> {
    fn issue(&mut self, request: R) -> LoadTicket<R> {
        self.current += 1;
        self.last = Some(request.clone());
        LoadTicket {
            generation: self.current,
            request,
        }
    }

    fn reissue(&mut self) -> Option<LoadTicket<R>> {
        let request = self.last.clone()?;
        Some(self.issue(request))
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.current
    }
}

/// Successful chart load, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPage {
    pub request: ChartRequest,
    pub security: Option<SecurityInfo>,
    pub title: String,
    pub frame: ChartFrame,
    /// Set when the load succeeded but nothing is drawable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Visible state of the chart view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChartView {
    Idle,
    Loading { request: ChartRequest },
    Ready(ChartPage),
    Failed {
        request: ChartRequest,
        category: ErrorCategory,
        message: String,
    },
}

type ChartData = (Option<SecurityInfo>, Vec<MergedRecord>);

/// Controller for the chart view of a single security.
#[derive(Debug, Clone)]
pub struct ChartController {
    generations: Generations<ChartRequest>,
    view: ChartView,
    locale: Locale,
}

impl ChartController {
    pub fn new(locale: Locale) -> Self {
        Self {
            generations: Generations::default(),
            view: ChartView::Idle,
            locale,
        }
    }

    pub fn view(&self) -> &ChartView {
        &self.view
    }

    pub fn last_request(&self) -> Option<&ChartRequest> {
        self.generations.last.as_ref()
    }

    pub const fn generation(&self) -> u64 {
        self.generations.current
    }

    /// Start a load. Any earlier in-flight load becomes stale.
    pub fn begin(&mut self, request: ChartRequest) -> LoadTicket<ChartRequest> {
        let ticket = self.generations.issue(request);
        self.view = ChartView::Loading {
            request: ticket.request.clone(),
        };
        ticket
    }

    /// Re-issue the last request, if there was one.
    pub fn retry(&mut self) -> Option<LoadTicket<ChartRequest>> {
        let ticket = self.generations.reissue()?;
        self.view = ChartView::Loading {
            request: ticket.request.clone(),
        };
        Some(ticket)
    }

    /// Fetch security info and the technical series concurrently.
    ///
    /// Both fetches must succeed. When both fail the series failure wins,
    /// since it decides whether there is anything to draw.
    pub async fn fetch<S>(
        source: &S,
        ticket: LoadTicket<ChartRequest>,
    ) -> Settled<ChartRequest, ChartData>
    where
        S: MarketDataSource + ?Sized,
    {
        let request = &ticket.request;
        let (info, series) = tokio::join!(
            source.lookup(request.code.clone()),
            source.technical(request.code.clone(), request.range),
        );

        let outcome = match (info, series) {
            (Ok(info), Ok(series)) => Ok((info, series)),
            (_, Err(failure)) | (Err(failure), Ok(_)) => Err(failure),
        };
        Settled::new(ticket, outcome)
    }

    /// Apply a settled fetch if it is still current.
    pub fn settle(&mut self, settled: Settled<ChartRequest, ChartData>) -> Settlement {
        let Settled { ticket, outcome } = settled;
        if !self.generations.is_current(ticket.generation) {
            warn!(
                generation = ticket.generation,
                current = self.generations.current,
                code = %ticket.request.code,
                "discarding stale chart load"
            );
            return Settlement::Stale;
        }

        let request = ticket.request;
        self.view = match outcome {
            Ok((security, records)) => {
                let frame = ChartFrame::build(&records);
                let notice = frame
                    .is_empty()
                    .then(|| self.locale.empty_series_notice().to_owned());
                info!(
                    code = %request.code,
                    records = records.len(),
                    empty = frame.is_empty(),
                    "chart load settled"
                );
                ChartView::Ready(ChartPage {
                    title: chart_title(&request.code, security.as_ref(), self.locale),
                    request,
                    security,
                    frame,
                    notice,
                })
            }
            Err(failure) => {
                let category = classify(&failure);
                info!(code = %request.code, %category, %failure, "chart load failed");
                ChartView::Failed {
                    message: category.message(self.locale),
                    request,
                    category,
                }
            }
        };
        Settlement::Applied
    }

    /// Begin, fetch and settle in one step.
    pub async fn load<S>(&mut self, source: &S, request: ChartRequest) -> &ChartView
    where
        S: MarketDataSource + ?Sized,
    {
        let ticket = self.begin(request);
        let settled = Self::fetch(source, ticket).await;
        self.settle(settled);
        &self.view
    }
}

/// Visible state of the search box results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchView {
    Idle,
    Searching {
        query: String,
    },
    Results {
        query: String,
        results: Vec<SecurityInfo>,
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<String>,
    },
    Failed {
        query: String,
        category: ErrorCategory,
        message: String,
    },
}

/// Controller for the security search box.
#[derive(Debug, Clone)]
pub struct SearchController {
    generations: Generations<SearchQuery>,
    view: SearchView,
    locale: Locale,
}

impl SearchController {
    pub fn new(locale: Locale) -> Self {
        Self {
            generations: Generations::default(),
            view: SearchView::Idle,
            locale,
        }
    }

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.generations.last.as_ref()
    }

    pub fn begin(&mut self, query: SearchQuery) -> LoadTicket<SearchQuery> {
        let ticket = self.generations.issue(query);
        self.view = SearchView::Searching {
            query: ticket.request.as_str().to_owned(),
        };
        ticket
    }

    pub fn retry(&mut self) -> Option<LoadTicket<SearchQuery>> {
        let ticket = self.generations.reissue()?;
        self.view = SearchView::Searching {
            query: ticket.request.as_str().to_owned(),
        };
        Some(ticket)
    }

    pub async fn fetch<S>(
        source: &S,
        ticket: LoadTicket<SearchQuery>,
    ) -> Settled<SearchQuery, Vec<SecurityInfo>>
    where
        S: MarketDataSource + ?Sized,
    {
        let outcome = source.search(ticket.request.clone()).await;
        Settled::new(ticket, outcome)
    }

    pub fn settle(&mut self, settled: Settled<SearchQuery, Vec<SecurityInfo>>) -> Settlement {
        let Settled { ticket, outcome } = settled;
        if !self.generations.is_current(ticket.generation) {
            warn!(
                generation = ticket.generation,
                current = self.generations.current,
                "discarding stale search"
            );
            return Settlement::Stale;
        }

        let query = ticket.request.as_str().to_owned();
        self.view = match outcome {
            Ok(results) => {
                let notice = results
                    .is_empty()
                    .then(|| self.locale.no_search_results_notice().to_owned());
                SearchView::Results {
                    query,
                    results,
                    notice,
                }
            }
            Err(failure) => {
                let category = classify(&failure);
                SearchView::Failed {
                    message: category.message(self.locale),
                    query,
                    category,
                }
            }
        };
        Settlement::Applied
    }

    pub async fn search<S>(&mut self, source: &S, query: SearchQuery) -> &SearchView
    where
        S: MarketDataSource + ?Sized,
    {
        let ticket = self.begin(query);
        let settled = Self::fetch(source, ticket).await;
        self.settle(settled);
        &self.view
    }
}
