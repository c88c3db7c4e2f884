use super::*;
use serde_json::json;

#[test]
fn sync_config_wire_shape() {
    let msg = PreviewMessage::SyncConfig { config: WizardConfiguration::default() };
    let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
    assert_eq!(value["type"], json!("SYNC_CONFIG"));
    assert_eq!(value["config"]["login"]["title"], json!("Private Access"));
}

#[test]
fn navigate_wire_shape_uses_page_id_key() {
    let msg = PreviewMessage::NavigateToPage { page_id: "page-1".into() };
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value, json!({"type": "NAVIGATE_TO_PAGE", "pageId": "page-1"}));
}

#[test]
fn flush_pair_orders_config_before_navigation() {
    let pair = PreviewMessage::flush_pair(WizardConfiguration::default(), Some("page-2"));
    let kinds: Vec<&str> = pair.iter().map(PreviewMessage::kind).collect();
    assert_eq!(kinds, vec![SYNC_CONFIG, NAVIGATE_TO_PAGE]);
}

#[test]
fn flush_pair_without_step_sends_config_only() {
    let pair = PreviewMessage::flush_pair(WizardConfiguration::default(), None);
    assert_eq!(pair.len(), 1);
    assert_eq!(pair[0].kind(), SYNC_CONFIG);
}

#[test]
fn preview_messages_parse_from_renderer_json() {
    let raw = r#"{"type":"NAVIGATE_TO_PAGE","pageId":"page-7"}"#;
    let msg: PreviewMessage = serde_json::from_str(raw).unwrap();
    assert_eq!(msg, PreviewMessage::NavigateToPage { page_id: "page-7".into() });
}
