//! Tests for loading configuration and form schemas from disk

use confreg::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_event_config_from_file() {
    let file = write_temp(
        r#"
event_name: Open Components Hackathon
sender_name: OC Team
schedule: Kick-off is Saturday at 10:00.
community_url: https://chat.example.com/invite
attendees:
  - alice@example.com
  - bob@example.com
"#,
    );

    let config = EventConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.event_name, "Open Components Hackathon");
    assert_eq!(config.sender_name, "OC Team");
    assert_eq!(config.attendees.len(), 2);
}

#[test]
fn test_event_config_defaults_sender() {
    let file = write_temp("event_name: Demo Day\n");

    let config = EventConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.sender_name, "Support");
    assert!(config.schedule.is_none());
    assert!(config.attendees.is_empty());
}

#[test]
fn test_event_config_missing_file() {
    let err = EventConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_event_config_invalid_yaml() {
    let file = write_temp("event_name: [unterminated\n");

    let err = EventConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_form_schema_from_file() {
    let file = write_temp(
        r#"{
            "title": "Registration",
            "formId": "abc123",
            "fields": [
                { "id": "111", "type": "SHORT_ANSWER", "label": "Email", "required": true },
                { "id": "222", "type": "CHECKBOX", "label": "Pick many" }
            ]
        }"#,
    );

    let schema = FormSchema::from_json_file(file.path()).unwrap();

    assert_eq!(schema.form_id.as_deref(), Some("abc123"));
    assert_eq!(schema.fields.len(), 2);
    assert_eq!(schema.fields[1].kind, FieldKind::Unsupported);
}

#[test]
fn test_form_schema_missing_file() {
    let err = FormSchema::from_json_file("/definitely/not/form.json").unwrap_err();
    assert!(err.to_string().starts_with("Invalid form schema"));
}

#[tokio::test]
async fn test_attendees_seed_store() {
    let config = EventConfig::from_yaml_str(
        "event_name: Demo\nattendees: [alice@example.com, ALICE@example.com, bob@example.com]\n",
    )
    .unwrap();

    let store = InMemoryRegistrationStore::new()
        .with_attendees(&config.attendees)
        .await;

    assert_eq!(store.len().await, 2);
    let ticket = store
        .ticket_number(&email_to_id("bob@example.com", None))
        .await
        .unwrap();
    assert_eq!(ticket, Some(2));
}
