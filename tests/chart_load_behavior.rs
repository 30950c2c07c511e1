//! Behavior-driven tests for loading a security's chart end to end.

use std::sync::Arc;

use kabuchart_core::pipeline::ColorClass;
use kabuchart_core::{HttpError, IndicatorField, TradingDate};
use kabuchart_tests::{
    api, chart_request, code, ten_day_series, toyota_master, ChartController, ChartRequest,
    ChartView, DateRange, ErrorCategory, HttpResponse, Locale, ScriptedHttpClient, Settlement,
};

fn scripted_toyota() -> Arc<ScriptedHttpClient> {
    Arc::new(
        ScriptedHttpClient::new()
            .route("/stocks/master?q=7203", Ok(toyota_master()))
            .route("/analysis/7203/technical", Ok(ten_day_series())),
    )
}

// =============================================================================
// Chart Load: Successful Series
// =============================================================================

#[tokio::test]
async fn when_ten_sessions_load_the_frame_matches_the_fetched_prices() {
    // Given: A backend serving ten sessions for 7203
    let http = scripted_toyota();
    let api = api(Arc::clone(&http));
    let mut controller = ChartController::new(Locale::Ja);

    // When: The chart loads
    let view = controller.load(&api, chart_request("7203")).await;

    // Then: The page carries the derived geometry
    let ChartView::Ready(page) = view else {
        panic!("expected ready view, got {view:?}");
    };
    assert_eq!(page.title, "トヨタ自動車 (7203) - プライム / 輸送用機器");
    assert!(page.notice.is_none());

    let frame = &page.frame;
    assert_eq!(frame.len, 10);
    assert_eq!(frame.tick_interval.get(), 1);

    let price = frame.price.as_ref().expect("price panel");
    assert_eq!(price.candles.len(), 10);
    assert_eq!((price.domain.min, price.domain.max), (93.0, 123.0));

    let day3 = &price.candles[2];
    assert_eq!(day3.date, TradingDate::parse("2024-01-08").expect("date"));
    assert_eq!(day3.body(), (100.0, 105.0));
    assert_eq!(day3.wick(), (99.0, 107.0));
    assert_eq!(day3.color, ColorClass::Bull);

    let volume = frame.volume.as_ref().expect("volume panel");
    assert_eq!(volume.bars.len(), 10);
    assert_eq!(volume.bars[0].volume, 1000);
}

#[tokio::test]
async fn when_an_indicator_starts_late_its_line_starts_at_that_session() {
    // Given: SMA5 is null for the first four sessions
    let api = api(scripted_toyota());
    let mut controller = ChartController::new(Locale::En);

    // When: The chart loads
    let view = controller.load(&api, chart_request("7203")).await;

    // Then: The SMA5 overlay is one segment from index 4 to index 9
    let ChartView::Ready(page) = view else {
        panic!("expected ready view, got {view:?}");
    };
    let price = page.frame.price.as_ref().expect("price panel");
    let sma5 = price
        .overlays
        .iter()
        .find(|line| line.field == IndicatorField::Sma5)
        .expect("sma5 overlay");
    assert_eq!(sma5.segments.len(), 1);
    let indices = sma5.segments[0]
        .points
        .iter()
        .map(|point| point.index)
        .collect::<Vec<_>>();
    assert_eq!(indices, vec![4, 5, 6, 7, 8, 9]);

    // And: RSI only has the final session
    let rsi = page.frame.rsi.as_ref().expect("rsi panel");
    assert_eq!(rsi.line.segments.len(), 1);
    assert_eq!(rsi.line.segments[0].points[0].value, 62.5);
}

#[tokio::test]
async fn when_a_range_is_given_it_is_sent_in_compact_form() {
    // Given: An explicit Q1 window
    let http = scripted_toyota();
    let api = api(Arc::clone(&http));
    let range = DateRange::new(
        Some(TradingDate::parse("20240101").expect("date")),
        Some(TradingDate::parse("2024-03-31").expect("date")),
    )
    .expect("range");

    // When: The chart loads
    let mut controller = ChartController::new(Locale::Ja);
    controller.load(&api, ChartRequest::new(code("7203"), range)).await;

    // Then: The technical request carries both bounds as YYYYMMDD
    assert!(http
        .calls()
        .iter()
        .any(|url| url.ends_with("/analysis/7203/technical?from=20240101&to=20240331")));
}

#[tokio::test]
async fn when_the_series_is_empty_an_empty_state_notice_is_shown() {
    // Given: A backend with no sessions in the window
    let http = Arc::new(
        ScriptedHttpClient::new()
            .route("/stocks/master", Ok(toyota_master()))
            .route("/technical", Ok(HttpResponse::ok_json("[]"))),
    );
    let api = api(http);
    let mut controller = ChartController::new(Locale::Ja);

    // When: The chart loads
    let view = controller.load(&api, chart_request("7203")).await;

    // Then: The load succeeds with nothing to draw and the notice set
    let ChartView::Ready(page) = view else {
        panic!("expected ready view, got {view:?}");
    };
    assert!(page.frame.is_empty());
    assert_eq!(page.notice.as_deref(), Some(Locale::Ja.empty_series_notice()));
}

// =============================================================================
// Chart Load: Ordering and Retry
// =============================================================================

#[tokio::test]
async fn when_an_older_load_settles_late_it_is_discarded() {
    // Given: Two loads started back to back
    let http = Arc::new(
        ScriptedHttpClient::new()
            .route("/stocks/master", Ok(toyota_master()))
            .route("/analysis/7203/technical", Ok(ten_day_series()))
            .route("/analysis/6758/technical", Ok(HttpResponse::ok_json("[]"))),
    );
    let api = api(http);
    let mut controller = ChartController::new(Locale::Ja);
    let first = controller.begin(chart_request("7203"));
    let second = controller.begin(chart_request("6758"));

    let first = ChartController::fetch(&api, first).await;
    let second = ChartController::fetch(&api, second).await;

    // When: The newer load settles first, then the older one
    assert_eq!(controller.settle(second), Settlement::Applied);
    assert_eq!(controller.settle(first), Settlement::Stale);

    // Then: The view still shows the newer security
    let ChartView::Ready(page) = controller.view() else {
        panic!("expected ready view");
    };
    assert_eq!(page.request.code.as_str(), "6758");
    assert_eq!(page.title, "銘柄: 6758");
}

#[tokio::test]
async fn when_an_older_load_settles_while_a_newer_one_is_pending_the_view_keeps_loading() {
    // Given: A second load begun before the first settled
    let api = api(scripted_toyota());
    let mut controller = ChartController::new(Locale::Ja);
    let first = controller.begin(chart_request("7203"));
    let _second = controller.begin(chart_request("7203"));

    // When: The first settles
    let settled = ChartController::fetch(&api, first).await;
    let outcome = controller.settle(settled);

    // Then: Nothing changes
    assert_eq!(outcome, Settlement::Stale);
    assert!(matches!(controller.view(), ChartView::Loading { .. }));
}

#[tokio::test]
async fn when_retry_is_requested_the_last_request_is_issued_again() {
    // Given: A first load that cannot reach the server
    let http = Arc::new(
        ScriptedHttpClient::new()
            .route("/stocks/master?q=7203", Ok(toyota_master()))
            .route(
                "/analysis/7203/technical",
                Err(HttpError::connect("connection refused")),
            ),
    );
    let api = api(Arc::clone(&http));
    let mut controller = ChartController::new(Locale::En);
    let view = controller.load(&api, chart_request("7203")).await;
    assert!(matches!(
        view,
        ChartView::Failed {
            category: ErrorCategory::NetworkUnreachable,
            ..
        }
    ));

    // When: The server comes back and the user retries
    http.replace("/analysis/7203/technical", Ok(ten_day_series()));
    let ticket = controller.retry().expect("a request to retry");
    let settled = ChartController::fetch(&api, ticket).await;
    assert_eq!(controller.settle(settled), Settlement::Applied);

    // Then: The same parameters were sent twice and the chart is shown
    let technical_calls = http
        .calls()
        .into_iter()
        .filter(|url| url.contains("/analysis/7203/technical"))
        .count();
    assert_eq!(technical_calls, 2);
    assert!(matches!(controller.view(), ChartView::Ready(_)));
    assert_eq!(controller.generation(), 2);
}
