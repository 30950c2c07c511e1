//! API client for the Security Master and Analytics services.
//!
//! # Endpoints
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | [`search`](MarketDataSource::search) | `GET /stocks/master?q=` | `[SecurityInfo]` |
//! | [`technical`](MarketDataSource::technical) | `GET /analysis/{code}/technical?from=&to=` | `[MergedRecord]` |
//! | [`daily`](MarketDataSource::daily) | `GET /stocks/{code}/daily?from=&to=` | `[DailyRecord]` |
//! | [`financials`](MarketDataSource::financials) | `GET /stocks/{code}/financials` | raw statement rows |
//!
//! Exact lookup by code is [`lookup`](MarketDataSource::lookup): a search
//! for the code followed by a local exact-match filter.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::classify::FetchFailure;
use crate::config::ClientConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{DailyRecord, DateRange, MergedRecord, SecurityCode, SecurityInfo, ValidationError};

pub type FetchFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchFailure>> + Send + 'a>>;

/// Free-text query for the Security Master (code or company name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Result<Self, ValidationError> {
        let query = query.into();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn for_code(code: &SecurityCode) -> Self {
        Self(code.as_str().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Data source contract consumed by the controllers.
///
/// Implementations must be `Send + Sync`; the load controller issues two
/// calls on the same source concurrently.
pub trait MarketDataSource: Send + Sync {
    /// Securities whose code or name matches the query.
    fn search<'a>(&'a self, query: SearchQuery) -> FetchFuture<'a, Vec<SecurityInfo>>;

    /// Daily prices with server-computed indicators.
    fn technical<'a>(
        &'a self,
        code: SecurityCode,
        range: DateRange,
    ) -> FetchFuture<'a, Vec<MergedRecord>>;

    /// Raw daily prices without indicators.
    fn daily<'a>(&'a self, code: SecurityCode, range: DateRange) -> FetchFuture<'a, Vec<DailyRecord>>;

    /// Financial statement rows as published, one JSON object per disclosure.
    fn financials<'a>(&'a self, code: SecurityCode) -> FetchFuture<'a, Vec<serde_json::Value>>;

    /// The master row whose code equals `code` exactly, if any.
    fn lookup<'a>(&'a self, code: SecurityCode) -> FetchFuture<'a, Option<SecurityInfo>> {
        Box::pin(async move {
            let rows = self.search(SearchQuery::for_code(&code)).await?;
            Ok(rows.into_iter().find(|row| row.matches_code(&code)))
        })
    }
}

/// HTTP implementation of [`MarketDataSource`].
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(http: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self { http, config }
    }

    /// Client backed by reqwest.
    pub fn with_reqwest(config: ClientConfig) -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{path}", self.config.base_url))
            .with_timeout_ms(self.config.timeout_ms)
    }

    fn ranged(&self, path: &str, range: DateRange) -> HttpRequest {
        range
            .query_pairs()
            .into_iter()
            .fold(self.request(path), |request, (name, value)| {
                request.with_query(name, value)
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, FetchFailure> {
        debug!(url = %request.full_url(), "issuing request");
        let response = self.http.execute(request).await?;
        if !response.is_success() {
            debug!(status = response.status, "request failed with status");
            return Err(FetchFailure::Status {
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(FetchFailure::from)
    }
}

impl MarketDataSource for ApiClient {
    fn search<'a>(&'a self, query: SearchQuery) -> FetchFuture<'a, Vec<SecurityInfo>> {
        Box::pin(async move {
            let request = self.request("/stocks/master").with_query("q", query.as_str());
            self.get_json(request).await
        })
    }

    fn technical<'a>(
        &'a self,
        code: SecurityCode,
        range: DateRange,
    ) -> FetchFuture<'a, Vec<MergedRecord>> {
        Box::pin(async move {
            let request = self.ranged(&format!("/analysis/{code}/technical"), range);
            self.get_json(request).await
        })
    }

    fn daily<'a>(&'a self, code: SecurityCode, range: DateRange) -> FetchFuture<'a, Vec<DailyRecord>> {
        Box::pin(async move {
            let request = self.ranged(&format!("/stocks/{code}/daily"), range);
            self.get_json(request).await
        })
    }

    fn financials<'a>(&'a self, code: SecurityCode) -> FetchFuture<'a, Vec<serde_json::Value>> {
        Box::pin(async move {
            let request = self.request(&format!("/stocks/{code}/financials"));
            self.get_json(request).await
        })
    }
}
