//! End-to-end checks against a file-backed local store: the same path the
//! dev environment uses, exercised through configuration rather than the
//! test constructors.

use fixwell_config::DatabaseConfig;
use fixwell_core::enums::ListingStatus;
use fixwell_db::StoreService;

async fn file_backed_service(dir: &tempfile::TempDir) -> StoreService {
    let config = DatabaseConfig {
        local_path: dir
            .path()
            .join("store.db")
            .to_string_lossy()
            .into_owned(),
        ..Default::default()
    };
    StoreService::connect(&config).await.unwrap()
}

#[tokio::test]
async fn seed_then_reopen_keeps_content() {
    let dir = tempfile::tempdir().unwrap();

    let svc = file_backed_service(&dir).await;
    let report = svc.seed("555-0177").await.unwrap();
    assert_eq!(report.listings_added, 3);
    svc.shutdown().await;

    // A second service over the same file sees the seeded content.
    let svc = file_backed_service(&dir).await;
    let active = svc
        .list_listings(Some(ListingStatus::Active))
        .await
        .unwrap();
    assert_eq!(active.len(), 3);
    let phone = svc.get_setting_or("contact_phone", "").await;
    assert_eq!(phone, "555-0177");
}

#[tokio::test]
async fn health_check_and_rebuild_counter() {
    let dir = tempfile::tempdir().unwrap();
    let svc = file_backed_service(&dir).await;

    assert!(svc.check_health().await);
    assert_eq!(svc.supervisor().rebuild_attempts(), 0);

    // An explicit rebuild keeps the store usable.
    svc.supervisor().force_new_connection().await.unwrap();
    assert_eq!(svc.supervisor().rebuild_attempts(), 1);
    assert!(svc.check_health().await);
}

#[tokio::test]
async fn shutdown_releases_and_lazily_reconnects() {
    let dir = tempfile::tempdir().unwrap();
    let svc = file_backed_service(&dir).await;
    svc.set_setting("hours", "Mon-Fri").await.unwrap();

    svc.shutdown().await;
    assert!(!svc.supervisor().is_connected().await);

    // Next unit of work lazily constructs a new handle.
    let hours = svc.get_setting_or("hours", "closed").await;
    assert_eq!(hours, "Mon-Fri");
}
