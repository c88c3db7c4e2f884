use super::*;
use serde_json::json;
use wizard::debounce::DEFAULT_QUIET_INTERVAL;
use wizard::{ListOrder, MemoryProjectStore, PreviewSlot, ProjectStore};

fn session_with_store() -> (Arc<MemoryProjectStore>, WizardSession) {
    let store = Arc::new(MemoryProjectStore::new());
    let session = WizardSession::new(store.clone(), PreviewSlot::new(), DEFAULT_QUIET_INTERVAL);
    (store, session)
}

fn single(events: Vec<EditorEvent>) -> EditorEvent {
    assert_eq!(events.len(), 1, "expected exactly one event, got {events:?}");
    events.into_iter().next().expect("one event")
}

// =============================================================================
// COMMAND PARSING
// =============================================================================

#[test]
fn commands_parse_from_op_tag() {
    let cmd: EditorCommand =
        serde_json::from_str(r#"{"op":"set_field","category":"login","field":"title","value":"Hi"}"#).unwrap();
    assert_eq!(
        cmd,
        EditorCommand::SetField { category: "login".into(), field: "title".into(), value: json!("Hi") }
    );

    let cmd: EditorCommand = serde_json::from_str(r#"{"op":"toggle_page","page_id":"page-3"}"#).unwrap();
    assert_eq!(cmd, EditorCommand::TogglePage { page_id: "page-3".into() });

    let cmd: EditorCommand = serde_json::from_str(r#"{"op":"go_to","index":2}"#).unwrap();
    assert_eq!(cmd, EditorCommand::GoTo { index: 2 });

    let cmd: EditorCommand = serde_json::from_str(r#"{"op":"save"}"#).unwrap();
    assert_eq!(cmd, EditorCommand::Save);
}

#[test]
fn events_serialize_with_type_tag() {
    let id = Uuid::nil();
    let value = serde_json::to_value(EditorEvent::Session { session_id: id }).unwrap();
    assert_eq!(value, json!({"type": "session", "session_id": id}));

    let (_, session) = session_with_store();
    let value = serde_json::to_value(EditorEvent::State(session.view())).unwrap();
    assert_eq!(value["type"], "state");
    assert_eq!(value["progress"], "Step 1 of 3");
    assert_eq!(value["enabled_pages"], json!(["page-1", "page-2"]));
}

// =============================================================================
// DISPATCH
// =============================================================================

#[tokio::test]
async fn malformed_frame_yields_bad_command_error() {
    let (_, session) = session_with_store();
    let event = single(handle_text(&session, r#"{"op":"fly"}"#).await);
    let EditorEvent::Error { code, retryable, .. } = event else {
        panic!("expected error event");
    };
    assert_eq!(code, "E_BAD_COMMAND");
    assert!(!retryable);
}

#[tokio::test]
async fn toggle_then_next_reports_new_steps() {
    let (_, session) = session_with_store();
    handle_text(&session, r#"{"op":"toggle_page","page_id":"page-6"}"#).await;
    let event = single(handle_text(&session, r#"{"op":"next"}"#).await);
    let EditorEvent::State(view) = event else {
        panic!("expected state event");
    };
    assert_eq!(view.steps.len(), 4);
    assert_eq!(view.current_index, 1);
    assert_eq!(view.progress, "Step 2 of 4");
    assert_eq!(view.enabled_pages, vec!["page-1", "page-2", "page-6"]);
}

#[tokio::test]
async fn unknown_field_reports_error_and_keeps_state() {
    let (_, session) = session_with_store();
    let before = session.view();
    let event = single(handle_text(&session, r#"{"op":"set_field","category":"weather","field":"x","value":1}"#).await);
    assert_eq!(
        event,
        EditorEvent::Error { code: "E_UNKNOWN_FIELD", message: "unknown field: weather.x".into(), retryable: false }
    );
    assert_eq!(session.view(), before);
}

#[tokio::test]
async fn save_emits_saved_and_finishes_session() {
    let (store, session) = session_with_store();
    handle_text(&session, r#"{"op":"set_field","category":"metadata","field":"customerName","value":"Alya"}"#).await;

    let event = single(handle_text(&session, r#"{"op":"save"}"#).await);
    let EditorEvent::Saved { project } = event else {
        panic!("expected saved event");
    };
    assert_eq!(project.name, "Alya");
    assert!(session.is_finished());
    assert_eq!(store.list(ListOrder::NewestFirst).await.unwrap().len(), 1);

    let event = single(handle_text(&session, r#"{"op":"back"}"#).await);
    assert!(matches!(event, EditorEvent::Error { code: "E_SESSION_FINISHED", .. }));
}
