use super::*;

fn timeouts() -> StoreTimeouts {
    StoreTimeouts { request_secs: 5, connect_secs: 2 }
}

const ROW: &str = r#"{
    "id": "6a2f41a0-6e3b-4d4b-9a55-0f3f1e2d7c11",
    "name": "Alya",
    "theme_type": "valentine",
    "recipient_name": "Alya",
    "config": {"enabledPages": ["page-1", "page-2"]},
    "is_live": false,
    "created_at": "2026-02-14T09:30:00Z"
}"#;

#[test]
fn projects_url_strips_trailing_slash() {
    let store = SupabaseProjectStore::new("https://abc.supabase.co/", "anon".into(), timeouts()).unwrap();
    assert_eq!(store.projects_url(), "https://abc.supabase.co/rest/v1/projects");
}

#[test]
fn list_params_follow_order() {
    let newest = serde_json::to_value(list_params(ListOrder::NewestFirst)).unwrap();
    assert_eq!(newest, serde_json::json!({"select": "*", "order": "created_at.desc"}));
    let oldest = serde_json::to_value(list_params(ListOrder::OldestFirst)).unwrap();
    assert_eq!(oldest["order"], "created_at.asc");
}

#[test]
fn parse_inserted_takes_first_row() {
    let record = parse_inserted(&format!("[{ROW}]")).unwrap();
    assert_eq!(record.name, "Alya");
    assert_eq!(record.recipient_name.as_deref(), Some("Alya"));
    assert!(!record.is_live);
    assert_eq!(record.config["enabledPages"][1], "page-2");
}

#[test]
fn parse_inserted_rejects_empty_array() {
    let err = parse_inserted("[]").unwrap_err();
    assert!(matches!(err, StoreError::Decode(ref msg) if msg == "insert returned no rows"));
}

#[test]
fn parse_records_accepts_null_recipient() {
    let row = ROW.replace(r#""recipient_name": "Alya""#, r#""recipient_name": null"#);
    let records = parse_records(&format!("[{row}, {row}]")).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].recipient_name.is_none());
}

#[test]
fn parse_records_reports_decode_errors() {
    assert!(matches!(parse_records("{\"oops\": 1}"), Err(StoreError::Decode(_))));
}

#[test]
fn error_message_prefers_postgrest_message() {
    let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy"}"#;
    assert_eq!(error_message(body), "new row violates row-level security policy");
    assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
}
