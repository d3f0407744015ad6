mod support;

use std::sync::Arc;

use storedesk_app::{
    GuardState, Navigation, Notice, NoticeKind, SettingsFlow, StoreLoadError,
};
use storedesk_core::route::Route;
use storedesk_core::store::StoreId;
use support::{MemoryLog, QueueApi, Reply, app, status, store};

#[test]
fn settings_session_loads_updates_and_refreshes() {
    let api = QueueApi::new(vec![
        Reply::Store(store("s1", "Corner Shop")),
        Reply::Empty,
        Reply::Store(store("s1", "Corner Market")),
    ]);
    let log = Arc::new(MemoryLog::default());
    let app = app(&api, &log);
    let id = StoreId::new("s1");

    let loaded = app.load_store(&id).expect("store");
    let mut flow = SettingsFlow::new(loaded, app.messages());
    flow.set_name("Corner Market");

    let mut navigations: Vec<Navigation> = Vec::new();
    let mut notices: Vec<Notice> = Vec::new();
    app.submit_update(&mut flow, &id, &mut navigations, &mut notices)
        .expect("valid name");
    assert_eq!(navigations, vec![Navigation::Refresh]);
    assert_eq!(notices[0].kind, NoticeKind::Success);

    let refreshed = app.load_store(&id).expect("refreshed store");
    flow.replace_store(refreshed);
    assert_eq!(flow.store().name, "Corner Market");

    assert_eq!(
        api.calls(),
        vec![
            "GET /api/stores/s1".to_string(),
            "PATCH /api/stores/s1 Corner Market".to_string(),
            "GET /api/stores/s1".to_string(),
        ]
    );
}

#[test]
fn delete_blocked_by_dependents_leaves_store_in_place() {
    let api = QueueApi::new(vec![
        Reply::Fail(status("DELETE", "/api/stores/s1", 400, "has products")),
        Reply::Stores(vec![store("s1", "Corner Shop")]),
    ]);
    let log = Arc::new(MemoryLog::default());
    let app = app(&api, &log);
    let id = StoreId::new("s1");

    let mut flow = SettingsFlow::new(store("s1", "Corner Shop"), app.messages());
    assert!(flow.request_delete());
    assert_eq!(flow.guard(), GuardState::Open);

    let mut navigations: Vec<Navigation> = Vec::new();
    let mut notices: Vec<Notice> = Vec::new();
    app.confirm_delete(&mut flow, &id, &mut navigations, &mut notices);

    assert_eq!(flow.guard(), GuardState::Closed);
    assert!(navigations.is_empty());
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert!(notices[0].message.contains("Make sure you removed all products"));

    let stores = app.list_stores().expect("stores");
    assert!(stores.iter().any(|store| store.id == id));
}

#[test]
fn confirmed_delete_returns_to_root() {
    let api = QueueApi::new(vec![Reply::Empty]);
    let log = Arc::new(MemoryLog::default());
    let app = app(&api, &log);
    let id = StoreId::new("s1");

    let mut flow = SettingsFlow::new(store("s1", "Corner Shop"), app.messages());
    flow.request_delete();

    let mut navigations: Vec<Navigation> = Vec::new();
    let mut notices: Vec<Notice> = Vec::new();
    app.confirm_delete(&mut flow, &id, &mut navigations, &mut notices);

    assert_eq!(api.calls(), vec!["DELETE /api/stores/s1".to_string()]);
    assert_eq!(
        navigations,
        vec![Navigation::Refresh, Navigation::Push(Route::Root)]
    );
    assert_eq!(notices[0].message, "Store deleted.");
}

#[test]
fn missing_store_is_reported_as_not_found() {
    let api = QueueApi::new(vec![Reply::Fail(status(
        "GET",
        "/api/stores/gone",
        404,
        "",
    ))]);
    let log = Arc::new(MemoryLog::default());
    let app = app(&api, &log);

    let error = app.load_store(&StoreId::new("gone")).expect_err("missing");
    assert!(matches!(
        error.downcast_ref::<StoreLoadError>(),
        Some(StoreLoadError::NotFound { .. })
    ));
    assert!(log.entries()[1].contains("outcome=not_found"));
}
