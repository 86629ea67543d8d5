//! Integration tests for POST /api/confirm
//!
//! These drive the full router through axum-test and check:
//! - status codes and the `{ error: { code, message } }` envelope
//! - the `{ id, email }` success body
//! - that the confirmation email goes to the confirmed attendee

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use confreg::prelude::*;
use serde_json::{Value, json};

async fn create_test_server() -> (TestServer, InMemoryRegistrationStore, InMemoryMailer) {
    let store = InMemoryRegistrationStore::new()
        .with_attendees(["alice@example.com", "bob@example.com"])
        .await;
    let mailer = InMemoryMailer::new();

    let app = ServerBuilder::new()
        .with_store(store.clone())
        .with_mailer(mailer.clone())
        .with_event(EventConfig {
            event_name: "Open Components Hackathon".to_string(),
            ..EventConfig::default()
        })
        .build()
        .expect("router should build");

    let server = TestServer::new(app).expect("Failed to create test server");
    (server, store, mailer)
}

fn assert_error_code(body: &Value, code: &str) {
    assert_eq!(body["error"]["code"], code, "unexpected body: {}", body);
    assert!(body["error"]["message"].is_string());
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_confirm_returns_id_and_email() {
    let (server, _store, _mailer) = create_test_server().await;

    let response = server
        .post("/api/confirm")
        .json(&json!({ "email": "alice@example.com", "name": "Alice" }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "id": email_to_id("alice@example.com", None),
            "email": "alice@example.com"
        })
    );
}

#[tokio::test]
async fn test_confirm_marks_record_and_sends_email() {
    let (server, store, mailer) = create_test_server().await;

    server
        .post("/api/confirm")
        .json(&json!({ "email": "Bob@Example.com", "name": "Bob" }))
        .await
        .assert_status(StatusCode::OK);

    let record = store
        .get_user(&email_to_id("bob@example.com", None))
        .await
        .unwrap()
        .expect("record should exist");
    assert!(record.is_confirmed());
    assert_eq!(record.name.as_deref(), Some("Bob"));

    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "bob@example.com");
    assert!(sent[0].text.contains("Open Components Hackathon"));
    assert!(sent[0].html.contains("Bob"));
}

#[tokio::test]
async fn test_confirm_accepts_form_body() {
    let (server, _store, _mailer) = create_test_server().await;

    let response = server
        .post("/api/confirm")
        .form(&[("email", "alice@example.com"), ("name", "Alice")])
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>()["email"], "alice@example.com");
}

#[tokio::test]
async fn test_confirm_twice_is_idempotent() {
    let (server, _store, mailer) = create_test_server().await;

    for _ in 0..2 {
        server
            .post("/api/confirm")
            .json(&json!({ "email": "alice@example.com", "name": "Alice" }))
            .await
            .assert_status(StatusCode::OK);
    }

    assert_eq!(mailer.sent().await.len(), 2);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_malformed_email_is_bad_request() {
    let (server, _store, mailer) = create_test_server().await;

    let response = server
        .post("/api/confirm")
        .json(&json!({ "email": "not-an-email", "name": "X" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_code(&response.json::<Value>(), "bad_email");
    assert!(mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_ip_literal_and_numeric_tld_are_bad_requests() {
    let (server, _store, _mailer) = create_test_server().await;

    for email in ["user@[127.0.0.1]", "user@example.123"] {
        let response = server
            .post("/api/confirm")
            .json(&json!({ "email": email, "name": "X" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_code(&response.json::<Value>(), "bad_email");
    }
}

#[tokio::test]
async fn test_missing_email_is_bad_request() {
    let (server, _store, _mailer) = create_test_server().await;

    let response = server.post("/api/confirm").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_code(&response.json::<Value>(), "bad_email");
}

#[tokio::test]
async fn test_empty_body_is_bad_request() {
    let (server, _store, _mailer) = create_test_server().await;

    let response = server.post("/api/confirm").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_code(&response.json::<Value>(), "bad_email");
}

#[tokio::test]
async fn test_malformed_json_is_invalid_body() {
    let (server, _store, _mailer) = create_test_server().await;

    let response = server
        .post("/api/confirm")
        .bytes("{ not json".into())
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_code(&response.json::<Value>(), "invalid_body");
}

#[tokio::test]
async fn test_unknown_email_is_not_found() {
    let (server, _store, mailer) = create_test_server().await;

    let response = server
        .post("/api/confirm")
        .json(&json!({ "email": "ghost@example.com", "name": "Ghost" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_error_code(&body, "email_not_found");
    assert_eq!(body["error"]["message"], "User not registered");
    assert!(mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_get_is_not_implemented() {
    let (server, _store, _mailer) = create_test_server().await;

    let response = server.get("/api/confirm").await;

    response.assert_status(StatusCode::NOT_IMPLEMENTED);
    assert_error_code(&response.json::<Value>(), "method_unknown");
}

#[tokio::test]
async fn test_other_methods_are_not_implemented() {
    let (server, _store, _mailer) = create_test_server().await;

    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let response = server.method(method.clone(), "/api/confirm").await;
        response.assert_status(StatusCode::NOT_IMPLEMENTED);
        assert_error_code(&response.json::<Value>(), "method_unknown");
    }
}

// =============================================================================
// Collaborator failures
// =============================================================================

/// Store that knows every ticket but refuses to confirm
struct RefusingStore;

#[async_trait]
impl RegistrationStore for RefusingStore {
    async fn ticket_number(&self, _user_id: &str) -> Result<Option<u64>> {
        Ok(Some(7))
    }

    async fn confirm(&self, _user_id: &str, _name: &str) -> Result<()> {
        Err(anyhow::anyhow!("record is locked"))
    }

    async fn get_user(&self, _user_id: &str) -> Result<Option<UserRecord>> {
        Ok(None)
    }
}

/// Mailer whose transport is always down
struct DownMailer;

#[async_trait]
impl Mailer for DownMailer {
    async fn send(&self, _email: OutgoingEmail) -> std::result::Result<(), MailError> {
        Err(MailError::Transport("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_confirm_failure_is_registration_not_completed() {
    let app = ServerBuilder::new()
        .with_store(RefusingStore)
        .with_mailer(InMemoryMailer::new())
        .build()
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/confirm")
        .json(&json!({ "email": "alice@example.com", "name": "Alice" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_code(&response.json::<Value>(), "registration_not_completed");
}

#[tokio::test]
async fn test_mail_failure_still_returns_ok() {
    let store = InMemoryRegistrationStore::new()
        .with_attendees(["alice@example.com"])
        .await;
    let app = ServerBuilder::new()
        .with_store(store.clone())
        .with_mailer(DownMailer)
        .build()
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/confirm")
        .json(&json!({ "email": "alice@example.com", "name": "Alice" }))
        .await;

    response.assert_status(StatusCode::OK);
    let record = store
        .get_user(&email_to_id("alice@example.com", None))
        .await
        .unwrap()
        .unwrap();
    assert!(record.is_confirmed());
}

#[tokio::test]
async fn test_id_secret_changes_returned_id() {
    let secret = Some("pepper".to_string());
    let store = InMemoryRegistrationStore::new()
        .with_id_secret(secret.clone())
        .with_attendees(["alice@example.com"])
        .await;
    let app = ServerBuilder::new()
        .with_store(store)
        .with_mailer(InMemoryMailer::new())
        .with_id_secret(secret)
        .build()
        .unwrap();
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/confirm")
        .json(&json!({ "email": "alice@example.com", "name": "Alice" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["id"], email_to_id("alice@example.com", Some("pepper")));
    assert_ne!(body["id"], email_to_id("alice@example.com", None));
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_routes() {
    let (server, _store, _mailer) = create_test_server().await;

    for path in ["/health", "/healthz"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({ "status": "ok", "service": "confreg" })
        );
    }
}

#[tokio::test]
async fn test_form_page_absent_without_provider() {
    let (server, _store, _mailer) = create_test_server().await;

    server.get("/").await.assert_status(StatusCode::NOT_FOUND);
}
