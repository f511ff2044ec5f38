//! End-to-end relay tests: router + real OpenAI client against a mock provider.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use chat_relay::server::{self, error::COMPLETION_FAILED_MESSAGE};
use chat_relay::{CompletionProvider, OpenAiClient, OpenAiConfig};

const COMPLETIONS_PATH: &str = "/v1/engines/davinci/completions";

fn client_for(base_url: String) -> Arc<dyn CompletionProvider> {
    let config = OpenAiConfig::new("test-key").with_base_url(base_url);
    Arc::new(OpenAiClient::new(config).expect("Failed to create client"))
}

async fn mock_provider(response: ResponseTemplate) -> MockServer {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(response)
        .mount(&mock)
        .await;

    mock
}

async fn chat(provider: Arc<dyn CompletionProvider>, prompt: &str) -> (StatusCode, String) {
    let response = server::router(provider)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/chat")
                .body(Body::from(prompt.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn relays_completion_text() {
    let mock = mock_provider(
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [{ "text": "hello" }] })),
    )
    .await;

    let (status, body) = chat(client_for(format!("{}/v1", mock.uri())), "Say hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello");

    let requests = mock.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, json!({ "prompt": "Say hello", "max_tokens": 150 }));
}

#[tokio::test]
async fn empty_prompt_is_still_relayed() {
    let mock = mock_provider(
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [{ "text": "?" }] })),
    )
    .await;

    let (status, body) = chat(client_for(format!("{}/v1", mock.uri())), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "?");

    let requests = mock.received_requests().await.expect("requests recorded");
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["prompt"], "");
}

#[tokio::test]
async fn upstream_shape_failures_are_generic_500() {
    let responses = [
        ResponseTemplate::new(200),
        ResponseTemplate::new(200).set_body_string("not json"),
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [{ "nottext": "x" }] })),
        ResponseTemplate::new(500).set_body_json(json!({ "error": { "message": "boom" } })),
    ];

    for response in responses {
        let mock = mock_provider(response).await;

        let (status, body) = chat(client_for(format!("{}/v1", mock.uri())), "hi").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, COMPLETION_FAILED_MESSAGE);
    }
}

#[tokio::test]
async fn refused_connection_is_generic_500() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/v1", listener.local_addr().unwrap());
    drop(listener);

    let (status, body) = chat(client_for(base_url), "hi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, COMPLETION_FAILED_MESSAGE);
}

#[tokio::test]
async fn same_prompt_twice_gives_same_text() {
    let mock = mock_provider(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "choices": [{ "text": "deterministic" }] })),
    )
    .await;
    let provider = client_for(format!("{}/v1", mock.uri()));

    let first = chat(provider.clone(), "repeat me").await;
    let second = chat(provider, "repeat me").await;

    assert_eq!(first, (StatusCode::OK, "deterministic".to_string()));
    assert_eq!(first, second);

    let requests = mock.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn serves_over_tcp() {
    let mock = mock_provider(
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [{ "text": "over the wire" }] })),
    )
    .await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let provider = client_for(format!("{}/v1", mock.uri()));
    tokio::spawn(server::serve(listener, provider));

    let http = reqwest::Client::new();
    let response = http
        .post(format!("http://{addr}/chat"))
        .body("ping")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "over the wire");

    let response = http.get(format!("http://{addr}/chat")).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}
