// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support_chat::chat::ConversationSession;
use support_chat::error::{ApiError, SupportError};
use support_chat::llm::message::Message;
use support_chat::llm::provider::{
    CompletionRequest, CompletionService, ReplyContent, SamplingConfig, NO_RESPONSE_FALLBACK,
};
use support_chat::llm::providers::OpenAiProvider;

fn provider(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::with_base_url(Some("test-key".to_string()), server.uri())
}

fn request() -> CompletionRequest {
    CompletionRequest::new(
        "gpt-4o-mini",
        vec![Message::system("Be helpful"), Message::user("Hi")],
    )
}

fn completion_body(content: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
    })
}

#[tokio::test]
async fn test_complete_sends_wire_shape_and_parses_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": { "type": "text" },
            "max_completion_tokens": 2048,
            "messages": [
                { "role": "system", "content": [{ "type": "text", "text": "Be helpful" }] },
                { "role": "user", "content": [{ "type": "text", "text": "Hi" }] }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("Hello!"))))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider(&server).complete(request()).await.unwrap();

    assert_eq!(response.id, "chatcmpl-123");
    assert_eq!(response.reply_text(), "Hello!");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.input_tokens, 12);
    assert_eq!(response.usage.total_tokens(), 17);
}

#[tokio::test]
async fn test_complete_joins_structured_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!([
            { "type": "text", "text": "First" },
            { "type": "refusal", "refusal": "nope" },
            { "type": "text", "text": "Second" }
        ]))))
        .mount(&server)
        .await;

    let response = provider(&server).complete(request()).await.unwrap();
    assert_eq!(response.reply_text(), "First\nSecond");
}

#[tokio::test]
async fn test_complete_skips_parts_without_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!([
            { "type": "text", "text": "A" },
            { "image": "x" },
            { "type": "text", "text": "B" }
        ]))))
        .mount(&server)
        .await;

    let response = provider(&server).complete(request()).await.unwrap();
    assert_eq!(response.reply_text(), "A\nB");
}

#[tokio::test]
async fn test_complete_unrecognized_content_uses_fallback() {
    for content in [json!({ "foo": "bar" }), json!(42)] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
            .mount(&server)
            .await;

        let response = provider(&server).complete(request()).await.unwrap();
        assert_eq!(response.content, ReplyContent::Absent);
        assert_eq!(response.reply_text(), NO_RESPONSE_FALLBACK);
    }
}

#[tokio::test]
async fn test_complete_null_content_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!(null))))
        .mount(&server)
        .await;

    let response = provider(&server).complete(request()).await.unwrap();
    assert_eq!(response.content, ReplyContent::Absent);
    assert_eq!(response.reply_text(), NO_RESPONSE_FALLBACK);
}

#[tokio::test]
async fn test_complete_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .mount(&server)
        .await;

    let err = provider(&server).complete(request()).await.unwrap_err();
    assert!(matches!(
        err,
        SupportError::Api(ApiError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn test_complete_rate_limited_uses_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_json(json!({
                    "error": { "message": "Rate limit reached", "code": "rate_limit_exceeded" }
                })),
        )
        .mount(&server)
        .await;

    let err = provider(&server).complete(request()).await.unwrap_err();
    assert!(matches!(err, SupportError::Api(ApiError::RateLimited(7))));
}

#[tokio::test]
async fn test_complete_server_error_with_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = provider(&server).complete(request()).await.unwrap_err();
    match err {
        SupportError::Api(ApiError::ServerError { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = provider(&server).complete(request()).await.unwrap_err();
    assert!(matches!(err, SupportError::Api(ApiError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_complete_without_key_never_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::with_base_url(None, server.uri());
    let err = provider.complete(request()).await.unwrap_err();

    assert!(matches!(
        err,
        SupportError::Api(ApiError::MissingApiKey(ref env)) if env == "OPENAI_API_KEY"
    ));
}

#[tokio::test]
async fn test_session_over_http_keeps_user_turn_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let provider = provider(&server);
    let mut session =
        ConversationSession::new("gpt-4o-mini", "Be helpful", SamplingConfig::default());
    session.initialize("Be helpful");

    let err = session.submit(&provider, "Hi").await.unwrap_err();

    assert!(err.is_external_service());
    assert_eq!(session.transcript().len(), 2);
    assert!(session.last_reply().is_none());
}
