mod common;

use serde_json::json;
use std::time::Duration;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clientele::api::{ChatBackend, HttpBackend, Role};
use clientele::error::ClienteleError;

use common::{chat_body, roster_body, server_config};

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server_config(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_list_clients_returns_roster_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_body()))
        .expect(1)
        .mount(&server)
        .await;

    let clients = backend(&server).list_clients().await.unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].display_name, "Ada Park");
    assert_eq!(clients[1].display_name, "Bo Chen");
    assert_eq!(clients[1].difficulty.as_deref(), Some("hard"));
}

#[tokio::test]
async fn test_list_clients_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(500).set_body_string("clients file missing"))
        .mount(&server)
        .await;

    let err = backend(&server).list_clients().await.unwrap_err();
    match err.downcast_ref::<ClienteleError>() {
        Some(ClienteleError::Status { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "clients file missing");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_clients_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend(&server).list_clients().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ClienteleError>(),
        Some(ClienteleError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_list_clients_wrong_shape_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clients": []})))
        .mount(&server)
        .await;

    let err = backend(&server).list_clients().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ClienteleError>(),
        Some(ClienteleError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_open_chat_posts_client_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"client": "Ada Park"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_body("abc-123", "Ada Park", &[])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let chat = backend(&server).open_chat("Ada Park").await.unwrap();

    assert_eq!(chat.uuid, "abc-123");
    assert_eq!(chat.display_name, "Ada Park");
    assert_eq!(chat.messages.len(), 1);
    assert_eq!(chat.messages[0].role, Role::System);
}

#[tokio::test]
async fn test_send_message_puts_uuid_and_text() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/chat"))
        .and(body_json(json!({"uuid": "abc-123", "user_message": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(
            "abc-123",
            "Ada Park",
            &["hello", "hi there"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let chat = backend(&server)
        .send_message("abc-123", "hello")
        .await
        .unwrap();

    assert_eq!(chat.last_content(), Some("hi there"));
}

#[tokio::test]
async fn test_send_message_unknown_chat_is_404() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("Could not find a chat with that ID!"),
        )
        .mount(&server)
        .await;

    let err = backend(&server)
        .send_message("missing", "hello")
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ClienteleError>(),
        Some(ClienteleError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_read_chat_sends_uuid_body_with_get() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chat"))
        .and(body_json(json!({"uuid": "abc-123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(
            "abc-123",
            "Ada Park",
            &["hello", "hi there"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let chat = backend(&server).read_chat("abc-123").await.unwrap();
    assert_eq!(chat.messages.len(), 3);
}

#[tokio::test]
async fn test_delete_chat_sends_uuid_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/chat"))
        .and(body_json(json!({"uuid": "abc-123"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_body("abc-123", "Ada Park", &[])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let chat = backend(&server).delete_chat("abc-123").await.unwrap();
    assert_eq!(chat.uuid, "abc-123");
}

#[tokio::test]
async fn test_endpoints_resolve_under_base_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/practice/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = server_config(&format!("{}/practice", server.uri()));
    let clients = HttpBackend::new(&config)
        .unwrap()
        .list_clients()
        .await
        .unwrap();
    assert_eq!(clients.len(), 2);
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(roster_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = server_config(&server.uri());
    config.timeout_seconds = 1;
    let err = HttpBackend::new(&config)
        .unwrap()
        .list_clients()
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ClienteleError>(),
        Some(ClienteleError::Timeout(1))
    ));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let backend = HttpBackend::new(&server_config("http://127.0.0.1:1")).unwrap();
    let err = backend.list_clients().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ClienteleError>(),
        Some(ClienteleError::Transport(_))
    ));
}
