use super::*;
use serde_json::json;

impl PageContent {
    /// Read one field as JSON.
    pub(crate) fn field(&self, name: &str) -> Option<Value> {
        match self {
            Self::Greeting(g) => match name {
                "title" => g.title.clone().map(Value::String),
                "message" => g.message.clone().map(Value::String),
                _ => None,
            },
            Self::Music(f)
            | Self::Wrapped(f)
            | Self::Quiz(f)
            | Self::Gallery(f)
            | Self::Map(f)
            | Self::Letter(f)
            | Self::Lock(f)
            | Self::Infinity(f) => f.0.get(name).cloned(),
        }
    }
}

#[test]
fn defaults_match_new_project_template() {
    let cfg = WizardConfiguration::default();
    assert_eq!(cfg.theme.background_color, "#F5E6D3");
    assert_eq!(cfg.theme.particles, "hearts");
    assert_eq!(cfg.login.password, "");
    assert_eq!(cfg.login.title, "Private Access");
    assert_eq!(cfg.login.instruction, "Enter our special date");
    assert_eq!(cfg.metadata.customer_name, "Recipient Name");
    assert_eq!(cfg.enabled_pages, vec!["page-1", "page-2"]);
    assert!(cfg.pages.is_empty());
}

#[test]
fn serializes_with_camel_case_keys() {
    let json = serde_json::to_value(WizardConfiguration::default()).unwrap();
    assert_eq!(json["theme"]["backgroundColor"], json!("#F5E6D3"));
    assert_eq!(json["theme"]["fontDisplay"], json!("Playfair Display, serif"));
    assert_eq!(json["metadata"]["customerName"], json!("Recipient Name"));
    assert_eq!(json["enabledPages"], json!(["page-1", "page-2"]));
}

#[test]
fn set_field_replaces_only_the_named_field() {
    let mut cfg = WizardConfiguration::default();
    let before = cfg.clone();
    cfg.set_field("login", "password", json!("14-02-2020")).unwrap();

    assert_eq!(cfg.login.password, "14-02-2020");
    assert_eq!(cfg.login.title, before.login.title);
    assert_eq!(cfg.theme, before.theme);
    assert_eq!(cfg.metadata, before.metadata);
    assert_eq!(cfg.enabled_pages, before.enabled_pages);
}

#[test]
fn set_field_accepts_any_text_without_validation() {
    let mut cfg = WizardConfiguration::default();
    cfg.set_field("theme", "backgroundColor", json!("not a colour")).unwrap();
    cfg.set_field("metadata", "customerName", json!("")).unwrap();
    assert_eq!(cfg.theme.background_color, "not a colour");
    assert_eq!(cfg.metadata.customer_name, "");
}

#[test]
fn set_field_coerces_non_string_scalars() {
    let mut cfg = WizardConfiguration::default();
    cfg.set_field("login", "password", json!(1402)).unwrap();
    assert_eq!(cfg.login.password, "1402");
    cfg.set_field("login", "password", json!(null)).unwrap();
    assert_eq!(cfg.login.password, "");
}

#[test]
fn set_field_rejects_unknown_category_without_side_effects() {
    let mut cfg = WizardConfiguration::default();
    let before = cfg.clone();
    let err = cfg.set_field("colors", "primary", json!("red")).unwrap_err();
    assert!(matches!(err, WizardError::UnknownField { ref category, .. } if category == "colors"));
    assert_eq!(cfg, before);
}

#[test]
fn set_field_rejects_unknown_typed_field() {
    let mut cfg = WizardConfiguration::default();
    assert!(cfg.set_field("theme", "accent", json!("red")).is_err());
    assert!(cfg.set_field("metadata", "email", json!("a@b.c")).is_err());
}

#[test]
fn greeting_section_is_created_lazily_by_type_name() {
    let mut cfg = WizardConfiguration::default();
    assert!(cfg.greeting().is_none());

    cfg.set_field("greeting", "title", json!("Hi love")).unwrap();
    let greeting = cfg.greeting().expect("greeting section");
    assert_eq!(greeting.title.as_deref(), Some("Hi love"));
    assert_eq!(greeting.message, None);
    assert!(cfg.page("page-2").is_some());
}

#[test]
fn greeting_title_falls_back_to_default() {
    let fields = GreetingFields::default();
    assert_eq!(fields.title_or_default(), DEFAULT_GREETING_TITLE);
}

#[test]
fn rejected_greeting_field_leaves_no_empty_section() {
    let mut cfg = WizardConfiguration::default();
    assert!(cfg.set_field("greeting", "subtitle", json!("x")).is_err());
    assert!(cfg.pages.is_empty());
}

#[test]
fn page_id_addresses_the_same_section_as_type_name() {
    let mut cfg = WizardConfiguration::default();
    cfg.set_field("page-2", "message", json!("Always")).unwrap();
    cfg.set_field("greeting", "title", json!("Hello")).unwrap();
    let greeting = cfg.greeting().unwrap();
    assert_eq!(greeting.message.as_deref(), Some("Always"));
    assert_eq!(greeting.title.as_deref(), Some("Hello"));
}

#[test]
fn open_sections_store_arbitrary_json() {
    let mut cfg = WizardConfiguration::default();
    cfg.set_field("music", "tracks", json!([{"title": "Song"}])).unwrap();
    let content = cfg.page("page-3").unwrap();
    assert_eq!(content.kind(), PageKind::Music);
    assert_eq!(content.field("tracks"), Some(json!([{"title": "Song"}])));
}

#[test]
fn login_page_id_is_not_a_page_section() {
    let mut cfg = WizardConfiguration::default();
    assert!(cfg.set_field("page-1", "title", json!("x")).is_err());
    assert_eq!(FieldCategory::parse("login"), Some(FieldCategory::Login));
}

#[test]
fn page_content_serializes_with_type_tag() {
    let mut cfg = WizardConfiguration::default();
    cfg.set_field("greeting", "title", json!("Hi")).unwrap();
    cfg.set_field("gallery", "layout", json!("grid")).unwrap();

    let json = serde_json::to_value(&cfg).unwrap();
    assert_eq!(json["pages"]["page-2"], json!({"type": "greeting", "title": "Hi"}));
    assert_eq!(json["pages"]["page-6"], json!({"type": "gallery", "layout": "grid"}));

    let restored: WizardConfiguration = serde_json::from_value(json).unwrap();
    assert_eq!(restored, cfg);
}

#[test]
fn enabled_in_catalog_order_ignores_toggle_order() {
    let mut cfg = WizardConfiguration::default();
    cfg.enabled_pages = vec!["page-9".into(), "page-2".into(), "page-5".into()];
    let ids: Vec<&str> = cfg.enabled_in_catalog_order().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["page-2", "page-5", "page-9"]);
}
