// tests/comment_api.rs


use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use comment_sentiment::ProviderError;
use test_helpers::{StubProvider, create_test_app, post_comment};

fn positive_five() -> Value {
    json!({ "sentiment": "positive", "rating": 5 })
}

#[tokio::test]
async fn test_empty_comment_is_rejected() {
    let provider = StubProvider::returning(positive_five());
    let app = create_test_app(provider.clone());

    let (status, body) = post_comment(app, r#"{"comment": ""}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Comment cannot be empty");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_whitespace_comment_is_rejected() {
    let provider = StubProvider::returning(positive_five());
    let app = create_test_app(provider.clone());

    let (status, body) = post_comment(app, r#"{"comment": "   \n\t "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Comment cannot be empty");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_missing_comment_is_rejected() {
    for raw in [r#"{}"#, r#"{"comment": null}"#] {
        let provider = StubProvider::returning(positive_five());
        let app = create_test_app(provider.clone());

        let (status, body) = post_comment(app, raw).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", raw);
        assert_eq!(body["detail"], "Comment cannot be empty");
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let provider = StubProvider::returning(positive_five());
    let app = create_test_app(provider.clone());

    let (status, body) = post_comment(app, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_non_string_comment_is_bad_request() {
    let provider = StubProvider::returning(positive_five());
    let app = create_test_app(provider.clone());

    let (status, _) = post_comment(app, r#"{"comment": 42}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_successful_analysis_returns_exact_body() {
    let provider = StubProvider::returning(positive_five());
    let app = create_test_app(provider.clone());

    let (status, body) = post_comment(app, r#"{"comment": "I love this!"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "sentiment": "positive", "rating": 5 }));
    assert_eq!(body.as_object().map(|o| o.len()), Some(2));
    assert_eq!(
        provider.prompts(),
        vec!["Analyze sentiment of this comment: I love this!".to_string()]
    );
}

#[tokio::test]
async fn test_comment_is_forwarded_untrimmed() {
    let provider = StubProvider::returning(json!({ "sentiment": "neutral", "rating": 3 }));
    let app = create_test_app(provider.clone());

    let (status, _) = post_comment(app, r#"{"comment": "  it is fine  "}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        provider.prompts(),
        vec!["Analyze sentiment of this comment:   it is fine  ".to_string()]
    );
}

#[tokio::test]
async fn test_provider_connection_error_is_internal_error() {
    let provider =
        StubProvider::failing(|| ProviderError::Transport("connection refused".to_string()));
    let app = create_test_app(provider.clone());

    let (status, body) = post_comment(app, r#"{"comment": "meh"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let expected = ProviderError::Transport("connection refused".to_string()).to_string();
    assert_eq!(body["detail"], expected.as_str());
    assert!(expected.contains("connection refused"));
    assert_eq!(body["error_code"], "EXTERNAL_SERVICE_ERROR");
    assert_eq!(body["retryable"], true);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_provider_auth_error_is_internal_error() {
    let provider = StubProvider::failing(|| {
        ProviderError::Authentication("Incorrect API key provided".to_string())
    });
    let app = create_test_app(provider);

    let (status, body) = post_comment(app, r#"{"comment": "meh"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["detail"]
            .as_str()
            .is_some_and(|d| d.contains("Incorrect API key provided"))
    );
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn test_payload_missing_rating_is_internal_error() {
    let provider = StubProvider::returning(json!({ "sentiment": "positive" }));
    let app = create_test_app(provider);

    let (status, body) = post_comment(app, r#"{"comment": "I love this!"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("rating")));
}

#[tokio::test]
async fn test_nonconforming_payloads_are_internal_errors() {
    let payloads = [
        json!({ "sentiment": "positive", "rating": 0 }),
        json!({ "sentiment": "positive", "rating": 6 }),
        json!({ "sentiment": "thrilled", "rating": 4 }),
        json!({ "sentiment": "negative", "rating": 2, "reason": "rude" }),
        json!({ "sentiment": "negative", "rating": "2" }),
        json!("positive"),
    ];

    for payload in payloads {
        let provider = StubProvider::returning(payload.clone());
        let app = create_test_app(provider);

        let (status, body) = post_comment(app, r#"{"comment": "hello"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "payload: {}", payload);
        assert!(body.get("sentiment").is_none());
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let provider = StubProvider::returning(positive_five());
    let app = comment_sentiment::api::http::create_router(
        comment_sentiment::AppState::new(provider.clone()),
        64,
    );

    let long_comment = "a".repeat(256);
    let (status, _) = post_comment(app, json!({ "comment": long_comment }).to_string()).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(StubProvider::returning(positive_five()));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-api-version").and_then(|v| v.to_str().ok()),
        Some(comment_sentiment::api::http::API_VERSION)
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "stub-model");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_get_comment_is_method_not_allowed() {
    let app = create_test_app(StubProvider::returning(positive_five()));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/comment")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
