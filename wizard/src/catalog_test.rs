use super::*;
use std::collections::HashSet;

#[test]
fn catalog_ids_are_unique() {
    let ids: HashSet<&str> = PAGE_CATALOG.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), PAGE_CATALOG.len());
}

#[test]
fn first_page_is_the_access_gate() {
    let first = first_page();
    assert_eq!(first.id, "page-1");
    assert_eq!(first.kind, PageKind::Login);
    assert!(!first.is_toggleable());
}

#[test]
fn find_resolves_known_ids() {
    assert_eq!(find("page-3").map(|p| p.kind), Some(PageKind::Music));
    assert_eq!(find("page-6").map(|p| p.kind), Some(PageKind::Gallery));
    assert_eq!(find("page-10").map(|p| p.name), Some("Infinity Scroll"));
    assert!(find("page-11").is_none());
    assert!(find("setup").is_none());
}

#[test]
fn find_by_kind_returns_catalog_entry() {
    assert_eq!(find_by_kind(PageKind::Greeting).map(|p| p.id), Some("page-2"));
    assert_eq!(find_by_kind(PageKind::Infinity).map(|p| p.id), Some("page-10"));
}

#[test]
fn toggleable_skips_login_and_keeps_order() {
    let ids: Vec<&str> = toggleable().map(|p| p.id).collect();
    assert_eq!(
        ids,
        vec!["page-2", "page-3", "page-4", "page-5", "page-6", "page-7", "page-8", "page-9", "page-10"]
    );
}

#[test]
fn section_names_round_trip_except_login() {
    for page in toggleable() {
        assert_eq!(PageKind::from_section(page.kind.as_str()), Some(page.kind));
    }
    assert_eq!(PageKind::from_section("login"), None);
    assert_eq!(PageKind::from_section("theme"), None);
}

#[test]
fn page_kind_serializes_lowercase() {
    let json = serde_json::to_value(PageKind::Gallery).unwrap();
    assert_eq!(json, serde_json::json!("gallery"));
}
