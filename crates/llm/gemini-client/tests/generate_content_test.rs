//! HTTP tests for [`gemini_client::GeminiClient`] against a mockito server.

use gemini_client::{Content, GeminiClient, GenerateContentRequest};
use mockito::Matcher;

fn request() -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![
            Content::text("user", "2+2=?"),
            Content::text("model", "4"),
            Content::text("user", "and 3+3?"),
        ],
        system_instruction: Some(Content::instruction("You are a tutor.")),
    }
}

/// **Test: Turns are posted in order with the key header; reply text is returned.**
#[tokio::test]
async fn generate_text_posts_turns_and_returns_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": "2+2=?"}]},
                {"role": "model", "parts": [{"text": "4"}]},
                {"role": "user", "parts": [{"text": "and 3+3?"}]}
            ],
            "systemInstruction": {"parts": [{"text": "You are a tutor."}]}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "candidates": [{"content": {"role": "model", "parts": [{"text": "6"}]}, "finishReason": "STOP"}],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 1, "totalTokenCount": 13}
            }"#,
        )
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("test-key".to_string(), server.url());
    let text = client
        .generate_text("gemini-2.0-flash", &request())
        .await
        .unwrap();

    assert_eq!(text, "6");
    mock.assert_async().await;
}

/// **Test: Provider error bodies surface their message.**
#[tokio::test]
async fn generate_content_error_status_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"code": 403, "message": "API key not valid"}}"#)
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("bad".to_string(), server.url());
    let err = client
        .generate_content("gemini-2.0-flash", &request())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("API key not valid"));
}

/// **Test: A response without candidates decodes to empty text, not an error.**
#[tokio::test]
async fn generate_text_empty_candidates_is_empty_string() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("k".to_string(), server.url());
    let text = client
        .generate_text("gemini-2.0-flash", &request())
        .await
        .unwrap();
    assert!(text.is_empty());
}
