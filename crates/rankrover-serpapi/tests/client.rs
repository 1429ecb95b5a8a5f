//! Integration tests for `SerpApiClient` and the tracking pipeline using
//! wiremock HTTP mocks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rankrover_serpapi::{
    run_search_tracking, SerpApiClient, SerpApiError, TrackingOptions,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SerpApiClient {
    SerpApiClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn search_body(page_token: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "search_metadata": { "id": "search-1", "status": "Success" }
    });
    if let Some(token) = page_token {
        body["ai_overview"] = serde_json::json!({ "page_token": token });
    }
    body
}

fn overview_body() -> serde_json::Value {
    serde_json::json!({
        "search_metadata": { "id": "overview-1", "status": "Success" },
        "ai_overview": {
            "text_blocks": [
                { "type": "paragraph", "snippet": "Widgets are tools for building things." },
                {
                    "type": "list",
                    "list": [
                        { "title": "Other Corp", "snippet": "a widget maker" },
                        { "title": "Acme", "snippet": "an excellent widget maker" }
                    ]
                }
            ],
            "references": [
                { "title": "Widget buying guide", "link": "https://example.com/g", "source": "example.com" }
            ]
        }
    })
}

#[tokio::test]
async fn google_search_returns_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google"))
        .and(query_param("q", "best widgets"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(Some("tok-123"))))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .google_search("best widgets")
        .await
        .expect("should parse search response");

    assert_eq!(result.search_metadata.status, "Success");
    let token = result
        .ai_overview
        .and_then(|p| p.page_token)
        .expect("page token present");
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn google_search_without_overview_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(None)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.google_search("anything").await.expect("should parse");
    assert!(result.ai_overview.is_none());
}

#[tokio::test]
async fn fetch_ai_overview_parses_blocks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google_ai_overview"))
        .and(query_param("page_token", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overview_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .fetch_ai_overview("tok-123")
        .await
        .expect("should parse overview");

    let overview = response.ai_overview.expect("overview present");
    assert_eq!(overview.to_blocks().len(), 4);
    assert_eq!(
        overview.first_snippet(),
        Some("Widgets are tools for building things.")
    );
}

#[tokio::test]
async fn api_error_field_surfaces_as_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "error": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .google_search("anything")
        .await
        .expect_err("error field must fail the call");
    assert!(matches!(err, SerpApiError::Api(ref m) if m == "Invalid API key"));
}

#[tokio::test]
async fn tracking_run_locates_brand_and_aggregates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(Some("tok-123"))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google_ai_overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overview_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = TrackingOptions {
        count: 2,
        max_retries: 0,
        backoff_base_ms: 0,
    };
    let mut rng = StdRng::seed_from_u64(7);
    let report = run_search_tracking(&client, "widgets", "Acme", options, &mut rng)
        .await
        .expect("run should succeed");

    assert_eq!(report.search_count, 2);
    assert_eq!(report.found_count, 2);
    // Blocks: paragraph (1), Other Corp (2), Acme (3), reference (4).
    assert_eq!(report.average_position, Some(3.0));
    assert_eq!(report.sentiment_counts.positive, 2);
    assert!(report.searches[0].snippet.is_some());
}

#[tokio::test]
async fn tracking_run_with_no_overviews_is_empty_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(None)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = TrackingOptions {
        count: 2,
        max_retries: 0,
        backoff_base_ms: 0,
    };
    let mut rng = StdRng::seed_from_u64(7);
    let report = run_search_tracking(&client, "widgets", "Acme", options, &mut rng)
        .await
        .expect("run should succeed with zero results");

    assert_eq!(report.search_count, 0);
    assert_eq!(report.found_count, 0);
    assert_eq!(report.average_position, None);
}

#[tokio::test]
async fn tracking_run_fails_when_every_query_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "error": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = TrackingOptions {
        count: 1,
        max_retries: 0,
        backoff_base_ms: 0,
    };
    let mut rng = StdRng::seed_from_u64(7);
    let err = run_search_tracking(&client, "widgets", "Acme", options, &mut rng)
        .await
        .expect_err("all-failed run must surface the error");
    assert!(matches!(err, SerpApiError::Api(_)));
}
