//! Integration tests for the connection configuration lifecycle

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use siteconf::api::{Caller, Role, SiteApi};
use siteconf::clock::{Clock, FixedClock};
use siteconf::connection::{
    history_doc_id, ConnectionConfigService, ConnectionConfiguration, ConnectionFields,
    ConnectionHandle, HandleState,
    ACTIVE_CONFIG_DOC, CONNECTION_COLLECTION, SYSTEM_ACTOR,
};
use siteconf::env::MapEnv;
use siteconf::error::{ApiError, ValidationError};
use siteconf::site::SiteConfigService;
use siteconf::store::{to_document, DocumentStore, MemoryDocumentStore, SledDocumentStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn env() -> MapEnv {
    MapEnv::new()
        .with("NEXT_PUBLIC_FIREBASE_API_KEY", "AIzaSyEnvironmentKey")
        .with("NEXT_PUBLIC_FIREBASE_AUTH_DOMAIN", "env-proj.firebaseapp.com")
        .with("NEXT_PUBLIC_FIREBASE_PROJECT_ID", "env-proj")
}

fn candidate(project: &str) -> ConnectionFields {
    ConnectionFields {
        api_key: format!("AIzaSy{}", project),
        auth_domain: format!("{}.firebaseapp.com", project),
        project_id: project.to_string(),
        storage_bucket: format!("{}.firebasestorage.app", project),
        messaging_sender_id: "1234567890".to_string(),
        app_id: format!("1:1234567890:web:{}", project),
        measurement_id: "G-ABC123".to_string(),
    }
}

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
}

fn service(store: Arc<dyn DocumentStore>, clock: Arc<FixedClock>) -> ConnectionConfigService {
    ConnectionConfigService::new(store, Arc::new(env()), clock)
}

#[test]
fn test_fresh_store_loads_environment_default() {
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(Arc::new(MemoryDocumentStore::new()), clock);

    let config = service.load_active();
    assert_eq!(config.updated_by, SYSTEM_ACTOR);
    assert_eq!(config.updated_at, start());
    assert_eq!(config.fields.project_id, "env-proj");
    assert_eq!(config.fields.storage_bucket, "");
}

#[test]
fn test_save_then_load_returns_saved_record() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(SledDocumentStore::new(temp.path()).unwrap());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store.clone(), clock);

    let saved = service.save(candidate("alpha"), "admin-1").unwrap();
    let loaded = service.load_active();

    assert_eq!(loaded, saved);
    assert_eq!(loaded.updated_by, "admin-1");
    assert_eq!(loaded.updated_at, start());
    assert_eq!(store.count(CONNECTION_COLLECTION).unwrap(), 2);
    assert!(store
        .get_document(CONNECTION_COLLECTION, "active_2026-06-01")
        .unwrap()
        .is_some());
}

#[test]
fn test_rejected_save_writes_nothing() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store.clone(), clock);

    let mut bad = candidate("alpha");
    bad.api_key = "BAD".to_string();
    let err = service.save(bad, "admin-1").unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::InvalidApiKey)
    ));

    let mut missing = candidate("alpha");
    missing.app_id.clear();
    let err = service.save(missing, "admin-1").unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::MissingField("appId"))
    ));

    assert_eq!(store.write_count(), 0);
    assert!(store.ids(CONNECTION_COLLECTION).is_empty());
}

#[test]
fn test_same_day_saves_share_one_history_entry() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store.clone(), clock.clone());

    service.save(candidate("alpha"), "admin-1").unwrap();
    clock.advance(ChronoDuration::hours(3));
    service.save(candidate("beta"), "admin-2").unwrap();

    assert_eq!(
        store.ids(CONNECTION_COLLECTION),
        vec![ACTIVE_CONFIG_DOC.to_string(), "active_2026-06-01".to_string()]
    );
    let history = service.history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].fields.project_id, "beta");
    assert_eq!(history[0].updated_by, "admin-2");
}

#[test]
fn test_history_is_newest_first_and_excludes_active() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(SledDocumentStore::new(temp.path()).unwrap());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store, clock.clone());

    for project in ["one", "two", "three", "four"] {
        service.save(candidate(project), "admin-1").unwrap();
        clock.advance(ChronoDuration::days(1));
    }

    let history = service.history(10).unwrap();
    let projects: Vec<&str> = history
        .iter()
        .map(|c| c.fields.project_id.as_str())
        .collect();
    assert_eq!(projects, vec!["four", "three", "two", "one"]);

    let limited = service.history(2).unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].fields.project_id, "four");
    assert_eq!(limited[1].fields.project_id, "three");

    assert!(service.history(0).unwrap().is_empty());
}

#[test]
fn test_history_ids_follow_save_dates() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store.clone(), clock.clone());

    service.save(candidate("one"), "admin-1").unwrap();
    clock.advance(ChronoDuration::days(2));
    service.save(candidate("two"), "admin-1").unwrap();

    let ids = store.ids(CONNECTION_COLLECTION);
    assert!(ids.contains(&history_doc_id(start().date_naive())));
    assert!(ids.contains(&history_doc_id(clock.now().date_naive())));
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_unreachable_store_falls_back_to_environment() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store.clone(), clock);
    service.save(candidate("alpha"), "admin-1").unwrap();

    store.set_fail_reads(true);
    let config = service.load_active();
    assert_eq!(config.updated_by, SYSTEM_ACTOR);
    assert_eq!(config.fields.project_id, "env-proj");
    assert!(service.history(5).is_err());
}

#[test]
fn test_failed_write_surfaces_storage_error() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store.clone(), clock);

    store.set_fail_writes(true);
    let err = service.save(candidate("alpha"), "admin-1").unwrap_err();
    assert!(matches!(err, ApiError::StorageError(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_slow_store_degrades_to_environment_within_timeout() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store.clone(), clock);
    service.save(candidate("alpha"), "admin-1").unwrap();

    store.set_read_delay(Some(Duration::from_millis(500)));
    let config = service.load_active_within(Duration::from_millis(20)).await;
    assert_eq!(config.updated_by, SYSTEM_ACTOR);

    store.set_read_delay(None);
    let config = service.load_active_within(Duration::from_secs(5)).await;
    assert_eq!(config.fields.project_id, "alpha");
}

#[test]
fn test_handle_caches_until_reinitialized() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let handle = ConnectionHandle::new(service(store.clone(), clock.clone()));
    assert_eq!(handle.state(), HandleState::Uninitialized);

    let first = handle.get().unwrap();
    assert_eq!(first.updated_by, SYSTEM_ACTOR);
    assert_eq!(handle.state(), HandleState::Ready);

    // A save behind the handle's back is not visible until reinitialize
    service(store, clock).save(candidate("alpha"), "admin-1").unwrap();
    assert_eq!(handle.get().unwrap().updated_by, SYSTEM_ACTOR);

    handle.reinitialize();
    assert_eq!(handle.state(), HandleState::Uninitialized);
    assert_eq!(handle.get().unwrap().fields.project_id, "alpha");
}

#[test]
fn test_handle_without_credentials_errors() {
    let clock = Arc::new(FixedClock::new(start()));
    let service = ConnectionConfigService::new(
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(MapEnv::new()),
        clock,
    );
    let handle = ConnectionHandle::new(service);

    assert!(matches!(handle.get(), Err(ApiError::NoCredentials)));
    assert_eq!(handle.state(), HandleState::Uninitialized);
}

#[test]
fn test_api_save_refreshes_shared_handle() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let handle = Arc::new(ConnectionHandle::new(service(store.clone(), clock.clone())));
    let api = SiteApi::new(SiteConfigService::new(store, clock), Arc::clone(&handle));

    assert_eq!(handle.get().unwrap().updated_by, SYSTEM_ACTOR);

    let caller = Caller {
        id: None,
        email: Some("owner@example.com".to_string()),
        role: Role::Admin,
    };
    api.save_connection_config(&caller, candidate("alpha")).unwrap();

    let live = handle.get().unwrap();
    assert_eq!(live.fields.project_id, "alpha");
    assert_eq!(live.updated_by, "owner@example.com");
}

#[test]
fn test_api_gates_admin_operations() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let handle = Arc::new(ConnectionHandle::new(service(store.clone(), clock.clone())));
    let api = SiteApi::new(SiteConfigService::new(store.clone(), clock), handle);

    let member = Caller {
        id: Some("m-1".to_string()),
        email: None,
        role: Role::Member,
    };
    assert!(matches!(
        api.save_connection_config(&member, candidate("alpha")),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(
        api.connection_history(&member, None),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(
        api.connection_config(&Caller::anonymous()),
        Err(ApiError::Unauthorized(_))
    ));
    assert_eq!(store.write_count(), 0);

    // Public reads never need a role
    assert_eq!(api.public_connection_config().project_id, "env-proj");
}

fn put_active(store: &dyn DocumentStore, fields: ConnectionFields) {
    let record = ConnectionConfiguration {
        fields,
        updated_at: start(),
        updated_by: "admin-1".to_string(),
    };
    store
        .put_document(
            CONNECTION_COLLECTION,
            ACTIVE_CONFIG_DOC,
            &to_document(&record).unwrap(),
        )
        .unwrap();
}

#[test]
fn test_empty_stored_record_with_env_credentials_connects_from_env() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(SledDocumentStore::new(temp.path()).unwrap());
    let clock = Arc::new(FixedClock::new(start()));
    put_active(store.as_ref(), ConnectionFields::default());

    let service = service(store, clock);
    // The admin view still shows what is stored
    assert_eq!(service.load_active().updated_by, "admin-1");

    let handle = ConnectionHandle::new(service);
    let live = handle.get().unwrap();
    assert_eq!(live.updated_by, SYSTEM_ACTOR);
    assert_eq!(live.fields.api_key, "AIzaSyEnvironmentKey");
    assert_eq!(handle.state(), HandleState::Ready);
}

#[test]
fn test_empty_stored_record_and_empty_env_has_no_credentials() {
    let store = Arc::new(MemoryDocumentStore::new());
    put_active(store.as_ref(), ConnectionFields::default());
    let service = ConnectionConfigService::new(
        store,
        Arc::new(MapEnv::new()),
        Arc::new(FixedClock::new(start())),
    );
    let handle = ConnectionHandle::new(service);

    assert!(matches!(handle.get(), Err(ApiError::NoCredentials)));
    assert_eq!(handle.state(), HandleState::Uninitialized);
}

#[test]
fn test_history_with_oversized_limits() {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock = Arc::new(FixedClock::new(start()));
    let service = service(store, clock.clone());
    for project in ["one", "two"] {
        service.save(candidate(project), "admin-1").unwrap();
        clock.advance(ChronoDuration::days(1));
    }

    assert_eq!(service.history(usize::MAX).unwrap().len(), 2);
    assert_eq!(service.history(usize::MAX - 1).unwrap().len(), 2);
}
