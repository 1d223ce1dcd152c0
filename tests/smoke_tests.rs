use classmate::agent::coerce::{coerce_tool_input, ToolInput};
use classmate::assignments::{CourseBucket, PendingAssignment, PendingMapping};
use classmate::config::Config;
use classmate::web::session::{Role, Session, NO_ASSIGNMENTS_YET};
use classmate::web::AppState;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

fn test_config() -> Config {
    Config {
        google_client_id: String::new(),
        google_client_secret: String::new(),
        google_token_path: String::from("config/google_token.json"),
        google_calendar_id: String::from("primary"),
        gemini_api_key: String::from("test_api_key"),
        gemini_model: String::from("gemini-1.5-flash"),
        timezone: String::from("Asia/Karachi"),
        bind_address: String::from("127.0.0.1:3000"),
        page_size: 20,
    }
}

fn sample_mapping() -> PendingMapping {
    let mut mapping = PendingMapping::new();
    mapping.insert(
        String::from("Math"),
        CourseBucket {
            not_submitted: vec![PendingAssignment {
                title: String::from("HW1"),
                due_date: String::from("2024-05-01"),
                due_time: String::from("23:59"),
            }],
        },
    );
    mapping
}

/// Smoke test to verify the config shape
#[tokio::test]
async fn test_config_shape() {
    let config = test_config();
    assert_eq!(config.google_calendar_id, "primary");
    assert_eq!(config.page_size, 20);
    assert!(config.google_client_id.is_empty());
}

/// A fresh session has no services and the placeholder context
#[tokio::test]
async fn test_session_starts_empty() {
    let session = Session::new();
    assert!(!session.is_logged_in());
    assert_eq!(session.summary_context, NO_ASSIGNMENTS_YET);
    assert!(session.pending.is_empty());
    assert!(session.transcript.is_empty());
}

/// The transcript accumulates alternating turns
#[tokio::test]
async fn test_transcript_accumulates() {
    let mut session = Session::new();
    session.push_turn(Role::Human, String::from("what's due?"));
    session.push_turn(Role::Assistant, String::from("Nothing is due."));
    assert_eq!(session.transcript.len(), 2);
    assert_eq!(session.history_messages().len(), 2);
}

/// App state construction and the router build without a running server
#[tokio::test]
async fn test_router_builds() {
    let config = Arc::new(RwLock::new(test_config()));
    let state = AppState::new(config);
    let _router = classmate::web::router(state);
}

/// Coercer round-trip: mapping value and its JSON text agree
#[tokio::test]
async fn test_coercer_roundtrip() {
    let mapping = sample_mapping();
    let value = serde_json::to_value(&mapping).unwrap();

    let from_value = coerce_tool_input(ToolInput::Structured(value.clone())).unwrap();
    let from_text = coerce_tool_input(ToolInput::Text(value.to_string())).unwrap();

    assert_eq!(from_value, mapping);
    assert_eq!(from_text, mapping);
}

/// Coercer failures are strings, not panics
#[tokio::test]
async fn test_coercer_failures_are_strings() {
    assert!(coerce_tool_input(ToolInput::Structured(json!({}))).is_err());
    assert!(coerce_tool_input(ToolInput::Structured(json!("just text"))).is_err());
    assert!(coerce_tool_input(ToolInput::Text(String::from("###"))).is_err());
}

/// The tool argument enum tolerates both shapes the model may produce
#[tokio::test]
async fn test_tool_input_deserializes_both_shapes() {
    let as_object: ToolInput =
        serde_json::from_value(serde_json::to_value(sample_mapping()).unwrap()).unwrap();
    assert!(matches!(as_object, ToolInput::Structured(_)));

    let as_text: ToolInput = serde_json::from_value(json!("{\"Math\": {}}")).unwrap();
    assert!(matches!(as_text, ToolInput::Text(_)));
}
