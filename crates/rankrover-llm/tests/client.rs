//! Integration tests for `ChatClient` and the chat-tracking pipeline using
//! wiremock HTTP mocks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rankrover_llm::{run_chat_tracking, ChatClient, LlmError, TrackingOptions};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ChatClient {
    ChatClient::with_base_url("openai", base_url, "gpt-4o", "test-key", 30)
        .expect("client construction should not fail")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn complete_returns_answer_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({ "model": "gpt-4o" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("An answer.")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client
        .complete("What are the best widgets?")
        .await
        .expect("should return completion text");
    assert_eq!(text, "An answer.");
}

#[tokio::test]
async fn unauthorized_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": { "message": "bad key" } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.complete("prompt").await.expect_err("401 must fail");
    match err {
        LlmError::Api {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "openai");
            assert_eq!(status.as_u16(), 401);
            assert!(message.contains("bad key"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_surface_as_empty_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-2",
            "choices": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .complete("prompt")
        .await
        .expect_err("empty choices must fail");
    assert!(matches!(err, LlmError::EmptyCompletion { .. }));
}

#[tokio::test]
async fn tracking_run_locates_brand_in_answers() {
    let server = MockServer::start().await;

    let answer = "Several vendors compete here.\n\nAcme is an excellent choice for most teams.\n\nOthers also exist.";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(answer)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = TrackingOptions {
        count: 3,
        max_retries: 0,
        backoff_base_ms: 0,
    };
    let mut rng = StdRng::seed_from_u64(21);
    let report = run_chat_tracking(&client, "widgets", "Acme", options, &mut rng).await;

    assert_eq!(report.search_count, 3);
    assert_eq!(report.found_count, 3);
    // The brand sits in the second paragraph of every answer.
    assert_eq!(report.average_position, Some(2.0));
    assert_eq!(report.sentiment_counts.positive, 3);
    assert!(report.searches.iter().all(|s| s.snippet.is_some()));
}

#[tokio::test]
async fn failed_generations_become_placeholder_records() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({ "error": "bad request" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = TrackingOptions {
        count: 2,
        max_retries: 0,
        backoff_base_ms: 0,
    };
    let mut rng = StdRng::seed_from_u64(21);
    let report = run_chat_tracking(&client, "widgets", "Acme", options, &mut rng).await;

    // The run completes; every prompt contributes a not-found placeholder.
    assert_eq!(report.search_count, 2);
    assert_eq!(report.found_count, 0);
    assert_eq!(report.average_position, None);
    assert!(report
        .searches
        .iter()
        .all(|s| s.position.is_none() && s.debug_info.contains("request failed")));
}
