use std::time::Duration;

use pocket_recipe_core::{
    domain::{
        common::entities::app_errors::CoreError,
        recipe_extraction::{entities::ExtractionModel, ports::LLMClient},
    },
    infrastructure::llm::gemini_client::GeminiLLMClient,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path, query_param},
};

fn client(server: &MockServer) -> GeminiLLMClient {
    GeminiLLMClient::with_base_url(
        "test-key".to_string(),
        server.uri(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
    }))
}

#[tokio::test]
async fn test_generate_with_image_sends_inline_image_and_disables_thinking() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [
                {"inlineData": {"mimeType": "image/jpeg", "data": "AQID"}},
                {"text": "read this"}
            ]}],
            "generationConfig": {"temperature": 0.1, "thinkingConfig": {"thinkingBudget": 0}}
        })))
        .respond_with(text_response("```json\n{\"title\":\"X\"}\n```"))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .generate_with_image(
            ExtractionModel::Flash,
            "read this".to_string(),
            vec![1, 2, 3],
            "image/jpeg".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(text, "```json\n{\"title\":\"X\"}\n```");
}

#[tokio::test]
async fn test_legacy_model_gets_no_thinking_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(text_response("{}"))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .generate_with_image(
            ExtractionModel::Gemini20Flash,
            "prompt".to_string(),
            vec![0],
            "image/png".to_string(),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["generationConfig"].get("thinkingConfig").is_none());
}

#[tokio::test]
async fn test_api_error_is_external_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("API_KEY_INVALID"))
        .mount(&server)
        .await;

    let result = client(&server)
        .generate_with_image(
            ExtractionModel::Lite,
            "prompt".to_string(),
            vec![0],
            "image/jpeg".to_string(),
        )
        .await;

    match result {
        Err(CoreError::ExternalServiceError(message)) => {
            assert!(message.contains("API_KEY_INVALID"))
        }
        other => panic!("expected external service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_candidates_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let result = client(&server)
        .generate_with_image(
            ExtractionModel::Flash,
            "prompt".to_string(),
            vec![0],
            "image/jpeg".to_string(),
        )
        .await;

    assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
}

#[tokio::test]
async fn test_list_models() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {
                    "name": "models/gemini-2.5-flash",
                    "displayName": "Gemini 2.5 Flash",
                    "supportedGenerationMethods": ["generateContent", "countTokens"]
                },
                {
                    "name": "models/text-embedding-004",
                    "supportedGenerationMethods": ["embedContent"]
                }
            ]
        })))
        .mount(&server)
        .await;

    let models = client(&server).list_models().await.unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].short_name(), "gemini-2.5-flash");
    assert_eq!(models[0].display_name.as_deref(), Some("Gemini 2.5 Flash"));
    assert!(!models[1].supports_generate_content());
}
