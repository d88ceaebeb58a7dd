use std::sync::Arc;

use muse::Tool;
use muse::api::{BackendError, GenerationBackend, HttpBackend, Message, Role, Usage};
use muse::core::action::{Action, Effect, update};
use muse::core::state::{App, GENERIC_ERROR};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(server.uri(), None)
}

async fn mount_reply(server: &MockServer, endpoint: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Drives one submit through `update` and the real backend, the way the
/// event loop does, and returns the effect of the outcome.
async fn submit_through(app: &mut App, prompt: &str) -> Effect {
    let Effect::SpawnRequest {
        page_id,
        tool,
        messages,
    } = update(app, Action::Submit(prompt.to_string()))
    else {
        panic!("submit did not spawn a request");
    };
    let action = match app.backend.generate(tool, &messages).await {
        Ok(reply) => Action::ReplyReceived { page_id, reply },
        Err(error) => Action::RequestFailed { page_id, error },
    };
    update(app, action)
}

// ============================================================================
// Generation Endpoints
// ============================================================================

#[tokio::test]
async fn test_code_request_posts_history_and_returns_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/code"))
        .and(body_json(json!({
            "messages": [
                {"role": "user", "content": "Write a Bash script that lists files"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "role": "assistant",
            "content": "```bash\nls\n```"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = backend_for(&server)
        .generate(
            Tool::Code,
            &[Message::user("Write a Bash script that lists files")],
        )
        .await
        .unwrap();

    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "```bash\nls\n```");
}

#[tokio::test]
async fn test_conversation_uses_its_own_endpoint() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "/api/conversation",
        200,
        json!({"role": "assistant", "content": "Hi there"}),
    )
    .await;

    let reply = backend_for(&server)
        .generate(Tool::Conversation, &[Message::user("Hello")])
        .await
        .unwrap();
    assert_eq!(reply.content, "Hi there");
}

#[tokio::test]
async fn test_forbidden_is_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/conversation"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Free trial has expired."))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .generate(Tool::Conversation, &[Message::user("Hello")])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        BackendError::QuotaExceeded("Free trial has expired.".to_string())
    );
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/code"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Error"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .generate(Tool::Code, &[Message::user("Hello")])
        .await
        .unwrap_err();
    match err {
        BackendError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Error");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/code"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .generate(Tool::Code, &[Message::user("Hello")])
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Port 1 is reserved and nothing listens there
    let backend = HttpBackend::new("http://127.0.0.1:1", None);
    let err = backend
        .generate(Tool::Code, &[Message::user("Hello")])
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_invalid_base_url_is_config_error() {
    let backend = HttpBackend::new("not a url", None);
    let err = backend
        .generate(Tool::Code, &[Message::user("Hello")])
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Config(_)), "got {err:?}");
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/code"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"role": "assistant", "content": "ok"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri(), Some("secret".to_string()));
    let reply = backend
        .generate(Tool::Code, &[Message::user("Hello")])
        .await
        .unwrap();
    assert_eq!(reply.content, "ok");
}

// ============================================================================
// Usage and Upgrade Endpoints
// ============================================================================

#[tokio::test]
async fn test_usage_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/usage"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"count": 3, "limit": 5})),
        )
        .mount(&server)
        .await;

    let usage = backend_for(&server).usage().await.unwrap();
    assert_eq!(
        usage,
        Usage {
            count: 3,
            limit: 5,
            is_pro: false
        }
    );
}

#[tokio::test]
async fn test_upgrade_link_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stripe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"url": "https://checkout.example/session"})),
        )
        .mount(&server)
        .await;

    let link = backend_for(&server).upgrade_link().await.unwrap();
    assert_eq!(link.url, "https://checkout.example/session");
}

// ============================================================================
// Full Submit Flow
// ============================================================================

#[tokio::test]
async fn test_code_page_records_exchange() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "/api/code",
        200,
        json!({"role": "assistant", "content": "```bash\nls\n```"}),
    )
    .await;

    let mut app = App::new(Arc::new(backend_for(&server)), Tool::Code);
    let effect = submit_through(&mut app, "Write a Bash script that lists files").await;

    assert_eq!(effect, Effect::Refresh { clear_input: true });
    let messages = app.page.transcript.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "Write a Bash script that lists files");
    assert_eq!(messages[1].content, "```bash\nls\n```");
    // Newest first for display
    let shown: Vec<Role> = app.page.transcript.newest_first().map(|m| m.role).collect();
    assert_eq!(shown, vec![Role::Assistant, Role::User]);
}

#[tokio::test]
async fn test_quota_failure_opens_upgrade() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/conversation"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Free trial has expired."))
        .mount(&server)
        .await;

    let mut app = App::new(Arc::new(backend_for(&server)), Tool::Conversation);
    let effect = submit_through(&mut app, "Hello").await;

    assert_eq!(effect, Effect::Refresh { clear_input: false });
    assert!(app.upgrade_open);
    assert!(app.toast.is_none());
    assert!(app.page.transcript.is_empty());
    assert!(!app.is_loading());
}

#[tokio::test]
async fn test_server_failure_shows_toast() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/conversation"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = App::new(Arc::new(backend_for(&server)), Tool::Conversation);
    let effect = submit_through(&mut app, "Hello").await;

    assert_eq!(effect, Effect::Refresh { clear_input: false });
    assert!(!app.upgrade_open);
    assert_eq!(
        app.toast.as_ref().map(|t| t.message.as_str()),
        Some(GENERIC_ERROR)
    );
    assert!(app.page.transcript.is_empty());
}
