// Integration tests for the impersonation chat path against a mock service

use anyhow::Result;
use chattune::chat::system_prompt;
use chattune::cli::commands::impersonation_request;
use chattune::cli::render_reply;
use chattune::config::Config;
use chattune::openai::{OpenAIClient, ServiceConfig, ServiceError};
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> OpenAIClient {
    let config = ServiceConfig::new("sk-test").with_base_url(server.url());
    OpenAIClient::new(config).expect("client")
}

#[tokio::test]
async fn test_chat_sends_persona_request_and_renders_reply() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let completion = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::Json(json!({
            "model": "ft:gpt-4o-mini:chat",
            "messages": [
                {"role": "system", "content": system_prompt("Bob")},
                {"role": "user", "content": "Alice: dinner tonight?"}
            ],
            "temperature": 1.0,
            "max_tokens": 300
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"chatcmpl-1","object":"chat.completion","model":"ft:gpt-4o-mini:chat","choices":[{"index":0,"message":{"role":"assistant","content":"Bob: sure, 8pm"},"finish_reason":"stop"}]}"#)
        .create_async()
        .await;

    let request = impersonation_request(
        &Config::default(),
        "ft:gpt-4o-mini:chat",
        "Bob",
        "Alice",
        "dinner tonight?",
    );
    let response = client_for(&server).chat_completion(&request).await?;

    completion.assert_async().await;
    assert_eq!(render_reply(&response, "Bob"), "Bob: sure, 8pm");
    Ok(())
}

#[tokio::test]
async fn test_chat_empty_content_renders_no_response() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _completion = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"chatcmpl-2","model":"m","choices":[{"message":{"role":"assistant","content":""}}]}"#)
        .create_async()
        .await;

    let request = impersonation_request(&Config::default(), "m", "Bob", "Alice", "hi");
    let response = client_for(&server).chat_completion(&request).await?;

    assert_eq!(render_reply(&response, "Bob"), "Bob: No response");
    Ok(())
}

#[tokio::test]
async fn test_chat_rejection_is_an_api_error() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _completion = server
        .mock("POST", "/v1/chat/completions")
        .with_status(404)
        .with_body(r#"{"error":{"message":"model not found"}}"#)
        .create_async()
        .await;

    let request = impersonation_request(&Config::default(), "ft:missing", "Bob", "Alice", "hi");
    let err = client_for(&server)
        .chat_completion(&request)
        .await
        .unwrap_err();

    match err {
        ServiceError::Api {
            operation,
            status,
            body,
            ..
        } => {
            assert_eq!(operation, "Chat completion");
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("model not found"));
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    Ok(())
}
