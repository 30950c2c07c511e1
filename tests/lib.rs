//! Shared fixtures for the behavior tests: a scripted transport and canned
//! backend payloads.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

pub use kabuchart_core::{
    ApiClient, ChartController, ChartRequest, ChartView, ClientConfig, DateRange, ErrorCategory,
    HttpClient, HttpError, HttpRequest, HttpResponse, Locale, SearchController, SearchQuery,
    SearchView, SecurityCode, Settlement,
};

type Scripted = Result<HttpResponse, HttpError>;

/// In-memory transport answering by URL path.
///
/// The first route whose path fragment occurs in the request URL wins;
/// unmatched requests get a 404.
#[derive(Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<Vec<(String, Scripted)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, fragment: impl Into<String>, response: Scripted) -> Self {
        self.replace(fragment, response);
        self
    }

    /// Swap the answer for `fragment`, keeping the route's position.
    pub fn replace(&self, fragment: impl Into<String>, response: Scripted) {
        let fragment = fragment.into();
        let mut routes = self.routes.lock().expect("routes lock");
        match routes.iter_mut().find(|(known, _)| *known == fragment) {
            Some(route) => route.1 = response,
            None => routes.push((fragment, response)),
        }
    }

    /// Full URLs of every request issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let url = request.full_url();
        self.calls.lock().expect("calls lock").push(url.clone());
        let answer = self
            .routes
            .lock()
            .expect("routes lock")
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(HttpResponse::with_status(404, "{\"detail\":\"Not Found\"}")));
        Box::pin(async move { answer })
    }
}

pub fn api(http: Arc<ScriptedHttpClient>) -> ApiClient {
    ApiClient::new(http, ClientConfig::new().expect("default config"))
}

pub fn code(value: &str) -> SecurityCode {
    SecurityCode::parse(value).expect("valid code")
}

pub fn chart_request(value: &str) -> ChartRequest {
    ChartRequest::new(code(value), DateRange::default())
}

/// Security Master answer for a search on `7203`.
pub fn toyota_master() -> HttpResponse {
    HttpResponse::ok_json(
        r#"[
            {"code":"72030","company_name":"Other Co","market_code_name":"Standard"},
            {"code":"7203","company_name":"トヨタ自動車","company_name_english":"TOYOTA MOTOR CORPORATION",
             "market_code_name":"プライム","sector_33_code_name":"輸送用機器","sector_17_code_name":"自動車・輸送機"}
        ]"#,
    )
}

/// Ten sessions. Day 3 is `open 100 / high 107 / low 99 / close 105`; the
/// lowest low is 95 and the highest high is 120. SMA5 starts on day 5.
pub fn ten_day_series() -> HttpResponse {
    HttpResponse::ok_json(
        r#"[
            {"date":"2024-01-04","open":98,"high":101,"low":95,"close":100,"volume":1000.0,"sma_5":null,"rsi_14":null,"macd_histogram":null},
            {"date":"2024-01-05","open":100,"high":104,"low":99,"close":103,"volume":1200,"sma_5":null,"rsi_14":null},
            {"date":"2024-01-08","open":100,"high":107,"low":99,"close":105,"volume":1500,"sma_5":null,"rsi_14":null},
            {"date":"2024-01-09","open":105,"high":110,"low":104,"close":108,"volume":1300,"sma_5":null,"rsi_14":null},
            {"date":"2024-01-10","open":108,"high":112,"low":106,"close":107,"volume":900,"sma_5":104.6,"rsi_14":null},
            {"date":"2024-01-11","open":107,"high":115,"low":106,"close":114,"volume":2100,"sma_5":107.4,"rsi_14":null},
            {"date":"2024-01-12","open":114,"high":120,"low":113,"close":118,"volume":2500,"sma_5":110.4,"rsi_14":null},
            {"date":"2024-01-15","open":118,"high":119,"low":110,"close":111,"volume":1800,"sma_5":111.6,"rsi_14":null},
            {"date":"2024-01-16","open":111,"high":113,"low":108,"close":112,"volume":1100,"sma_5":112.4,"rsi_14":null},
            {"date":"2024-01-17","open":112,"high":116,"low":111,"close":115,"volume":1400,"sma_5":114.0,"rsi_14":62.5,
             "macd":1.2,"macd_signal":0.8,"macd_histogram":0.4}
        ]"#,
    )
}
