use super::*;
use wizard::MemoryProjectStore;

fn store() -> Arc<dyn ProjectStore> {
    Arc::new(MemoryProjectStore::new())
}

#[tokio::test]
async fn open_registers_session_by_id() {
    let registry = SessionRegistry::new();
    let session = registry.open(store(), Duration::from_millis(500)).await;

    let found = registry.get(session.id()).await.expect("session registered");
    assert!(Arc::ptr_eq(&found, &session));
    assert_eq!(registry.len().await, 1);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let registry = SessionRegistry::new();
    assert!(registry.get(Uuid::new_v4()).await.is_none());
    assert!(!registry.remove(Uuid::new_v4()).await);
}

#[tokio::test]
async fn remove_closes_session_and_detaches_preview() {
    let registry = SessionRegistry::new();
    let session = registry.open(store(), Duration::from_millis(500)).await;
    let (tx, _rx) = tokio::sync::mpsc::channel(4);
    session.preview_slot().attach(Arc::new(wizard::ChannelSurface::new(tx)));

    assert!(registry.remove(session.id()).await);
    assert!(session.is_finished());
    assert!(!session.preview_slot().is_attached());
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn sessions_are_independent() {
    let registry = SessionRegistry::new();
    let a = registry.open(store(), Duration::from_millis(500)).await;
    let b = registry.open(store(), Duration::from_millis(500)).await;
    assert_ne!(a.id(), b.id());

    a.toggle_page("page-4").unwrap();
    assert!(a.view().enabled_pages.iter().any(|id| id == "page-4"));
    assert!(!b.view().enabled_pages.iter().any(|id| id == "page-4"));
}
