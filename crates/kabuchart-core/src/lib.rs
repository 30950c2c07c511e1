//! Core contracts for kabuchart.
//!
//! This crate contains:
//! - Domain records (daily prices, indicators, Security Master rows) and validation
//! - The visualization pipeline from fetched records to a render-ready [`ChartFrame`]
//! - Failure classification with localized messages
//! - The HTTP transport seam and the API client
//! - Load/search controllers with stale-response discard
//! - Response envelope and structured errors

pub mod classify;
pub mod client;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod pipeline;
pub mod session;

pub use classify::{classify, ErrorCategory, FetchFailure, Locale};
pub use client::{ApiClient, FetchFuture, MarketDataSource, SearchQuery};
pub use config::ClientConfig;
pub use domain::{
    chart_title, DailyRecord, DateRange, IndicatorField, IndicatorRecord, MergedRecord,
    PriceFields, SecurityCode, SecurityInfo, TradingDate,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use pipeline::ChartFrame;
pub use session::{
    ChartController, ChartPage, ChartRequest, ChartView, LoadTicket, SearchController,
    SearchView, Settled, Settlement,
};
