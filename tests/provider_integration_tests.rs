use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use sous::core::action::{Action, Effect, update};
use sous::core::state::App;
use sous::inference::{
    ChatProvider, ChatRequest, FunctionProvider, OpenAiProvider, OpenAiSettings, ProviderError,
};
use sous::tui::request_reply;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_partial_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

async fn function_server(response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(response)
        .mount(&mock_server)
        .await;
    mock_server
}

fn function_provider(server: &MockServer) -> FunctionProvider {
    FunctionProvider::new(format!("{}/chat", server.uri()))
}

async fn ask(provider: &dyn ChatProvider, message: &str) -> Result<String, ProviderError> {
    provider.reply(ChatRequest { message }).await
}

fn openai_settings(base_url: String) -> OpenAiSettings {
    OpenAiSettings {
        api_key: "test-key".to_string(),
        base_url,
        model: "gpt-3.5-turbo".to_string(),
        temperature: 0.7,
        max_tokens: 500,
        timeout: Duration::from_secs(5),
        system_prompt: "You are a chef.".to_string(),
    }
}

// ============================================================================
// Chat Function Provider Tests
// ============================================================================

#[tokio::test]
async fn test_function_sends_message_only_and_returns_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "message": "How long do I boil pasta?" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "reply": "About 9 minutes." })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = function_provider(&mock_server);
    let reply = ask(&provider, "How long do I boil pasta?").await;

    assert_eq!(reply.unwrap(), "About 9 minutes.");
}

#[tokio::test]
async fn test_function_ignores_extra_response_fields() {
    let mock_server = function_server(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "reply": "Use butter.", "model": "whatever" })),
    )
    .await;

    let reply = ask(&function_provider(&mock_server), "substitute for oil?").await;
    assert_eq!(reply.unwrap(), "Use butter.");
}

#[tokio::test]
async fn test_function_server_error_extracts_message() {
    let mock_server = function_server(
        ResponseTemplate::new(500).set_body_json(json!({ "error": "OpenAI API key not configured" })),
    )
    .await;

    let result = ask(&function_provider(&mock_server), "hi").await;

    match result {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "OpenAI API key not configured");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_function_error_with_plain_body() {
    let mock_server =
        function_server(ResponseTemplate::new(404).set_body_string("Not Found")).await;

    let result = ask(&function_provider(&mock_server), "hi").await;

    match result {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_function_malformed_json_is_parse_error() {
    let mock_server =
        function_server(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let result = ask(&function_provider(&mock_server), "hi").await;
    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_function_missing_reply_is_parse_error() {
    let mock_server =
        function_server(ResponseTemplate::new(200).set_body_json(json!({ "answer": "hi" }))).await;

    let result = ask(&function_provider(&mock_server), "hi").await;
    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_function_empty_reply_is_parse_error() {
    let mock_server =
        function_server(ResponseTemplate::new(200).set_body_json(json!({ "reply": "  " }))).await;

    let result = ask(&function_provider(&mock_server), "hi").await;
    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_function_connection_refused_is_network_error() {
    // Grab a free port and release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let provider = FunctionProvider::new(format!("http://127.0.0.1:{port}/chat"));

    let result = ask(&provider, "hi").await;
    assert!(matches!(result, Err(ProviderError::Network(_))));
}

// ============================================================================
// OpenAI Provider Tests
// ============================================================================

#[tokio::test]
async fn test_openai_sends_system_prompt_and_returns_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 500,
            "messages": [
                { "role": "system", "content": "You are a chef." },
                { "role": "user", "content": "Quick dessert?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Try a mug cake." } }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new(openai_settings(format!("{}/v1", mock_server.uri())));
    let reply = ask(&provider, "Quick dessert?").await;

    assert_eq!(reply.unwrap(), "Try a mug cake.");
}

#[tokio::test]
async fn test_openai_error_status_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": { "message": "Invalid API key" } })),
        )
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new(openai_settings(format!("{}/v1", mock_server.uri())));
    let result = ask(&provider, "hi").await;

    match result {
        Err(ProviderError::Api { status, .. }) => assert_eq!(status, 401),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_openai_no_choices_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new(openai_settings(format!("{}/v1", mock_server.uri())));
    let result = ask(&provider, "hi").await;
    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

// ============================================================================
// Send Cycle Tests (reducer + real provider)
// ============================================================================

async fn run_turn(app: &mut App, text: &str) {
    let effect = update(app, Action::Submit(text.to_string()));
    let Effect::SpawnRequest(message) = effect else {
        panic!("Expected a request, got {effect:?}");
    };
    assert!(app.is_loading());

    let provider = app.provider.clone();
    let action = request_reply(provider.as_ref(), &message).await;
    update(app, action);
}

#[tokio::test]
async fn test_send_cycle_appends_reply() {
    let mock_server = function_server(
        ResponseTemplate::new(200).set_body_json(json!({ "reply": "Salt the water well." })),
    )
    .await;
    let mut app = App::new(Arc::new(function_provider(&mock_server)));

    run_turn(&mut app, "pasta tips?").await;

    assert!(!app.is_loading());
    assert!(app.notification.is_none());
    let contents: Vec<_> = app
        .transcript
        .messages()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, vec!["pasta tips?", "Salt the water well."]);
}

#[tokio::test]
async fn test_send_cycle_failure_keeps_user_message_and_raises_toast() {
    let mock_server = function_server(
        ResponseTemplate::new(500).set_body_json(json!({ "error": "upstream down" })),
    )
    .await;
    let mut app = App::new(Arc::new(function_provider(&mock_server)));

    run_turn(&mut app, "pasta tips?").await;

    assert!(!app.is_loading());
    assert!(app.notification.is_some());
    assert_eq!(app.transcript.len(), 1);
    assert!(app.can_send());
}

#[tokio::test]
async fn test_each_turn_sends_only_its_own_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "second" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "two" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "first" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "one" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = App::new(Arc::new(function_provider(&mock_server)));
    run_turn(&mut app, "first").await;
    run_turn(&mut app, "second").await;

    assert_eq!(app.transcript.len(), 4);
}

#[test]
fn test_blocking_reply_outside_async_test() {
    let result = tokio_test::block_on(async {
        let mock_server = function_server(
            ResponseTemplate::new(200).set_body_json(json!({ "reply": "Yes." })),
        )
        .await;
        ask(&function_provider(&mock_server), "Can I?").await
    });
    assert_eq!(result.unwrap(), "Yes.");
}
