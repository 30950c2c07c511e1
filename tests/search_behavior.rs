//! Behavior-driven tests for searching the Security Master.

use std::sync::Arc;

use kabuchart_core::{HttpError, MarketDataSource};
use kabuchart_tests::{
    api, code, toyota_master, ErrorCategory, HttpResponse, Locale, ScriptedHttpClient,
    SearchController, SearchQuery, SearchView, Settlement,
};

fn query(value: &str) -> SearchQuery {
    SearchQuery::new(value).expect("valid query")
}

#[tokio::test]
async fn when_a_query_matches_the_results_are_listed() {
    // Given: A master with two rows for 7203
    let http = Arc::new(ScriptedHttpClient::new().route("/stocks/master", Ok(toyota_master())));
    let api = api(Arc::clone(&http));
    let mut controller = SearchController::new(Locale::Ja);

    // When: The user searches by company name
    let view = controller.search(&api, query("トヨタ")).await;

    // Then: Every returned row is listed and no notice is shown
    match view {
        SearchView::Results {
            results, notice, ..
        } => {
            assert_eq!(results.len(), 2);
            assert!(notice.is_none());
        }
        other => panic!("expected results, got {other:?}"),
    }
    assert_eq!(
        http.calls(),
        vec![String::from(
            "http://localhost:8000/api/stocks/master?q=%E3%83%88%E3%83%A8%E3%82%BF"
        )]
    );
}

#[tokio::test]
async fn when_nothing_matches_the_empty_state_notice_is_shown() {
    let http = Arc::new(
        ScriptedHttpClient::new().route("/stocks/master", Ok(HttpResponse::ok_json("[]"))),
    );
    let mut controller = SearchController::new(Locale::En);

    let view = controller.search(&api(http), query("nothing")).await;

    match view {
        SearchView::Results { notice, .. } => {
            assert_eq!(notice.as_deref(), Some("No matching securities were found."));
        }
        other => panic!("expected results, got {other:?}"),
    }
}

#[tokio::test]
async fn when_search_fails_and_is_retried_the_same_query_is_sent() {
    // Given: A first search that times out
    let http = Arc::new(
        ScriptedHttpClient::new().route("/stocks/master", Err(HttpError::timeout("timed out"))),
    );
    let api = api(Arc::clone(&http));
    let mut controller = SearchController::new(Locale::Ja);
    let view = controller.search(&api, query("7203")).await;
    assert!(matches!(
        view,
        SearchView::Failed {
            category: ErrorCategory::NetworkUnreachable,
            ..
        }
    ));

    // When: The backend recovers and the user retries
    http.replace("/stocks/master", Ok(toyota_master()));
    let ticket = controller.retry().expect("a query to retry");
    let settled = SearchController::fetch(&api, ticket).await;

    // Then: The retried query is applied
    assert_eq!(controller.settle(settled), Settlement::Applied);
    assert_eq!(controller.last_query().map(SearchQuery::as_str), Some("7203"));
    let calls = http.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn when_typing_quickly_only_the_latest_query_is_shown() {
    let http = Arc::new(ScriptedHttpClient::new().route("/stocks/master", Ok(toyota_master())));
    let api = api(http);
    let mut controller = SearchController::new(Locale::Ja);

    let older = controller.begin(query("72"));
    let newer = controller.begin(query("7203"));
    let older = SearchController::fetch(&api, older).await;
    let newer = SearchController::fetch(&api, newer).await;

    assert_eq!(controller.settle(newer), Settlement::Applied);
    assert_eq!(controller.settle(older), Settlement::Stale);
    assert!(matches!(
        controller.view(),
        SearchView::Results { query, .. } if query == "7203"
    ));
}

#[tokio::test]
async fn when_looking_up_a_code_only_the_exact_row_is_returned() {
    let http = Arc::new(ScriptedHttpClient::new().route("/stocks/master", Ok(toyota_master())));

    let found = api(http).lookup(code("7203")).await.expect("lookup");

    let row = found.expect("exact match");
    assert_eq!(row.code, "7203");
    assert_eq!(row.company_name_english, "TOYOTA MOTOR CORPORATION");
}
