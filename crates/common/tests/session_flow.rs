//! End-to-end editing-session scenarios against the in-memory store.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use common::setup_env;

use ::common::format::FormatKind;
use ::common::prefs::PreferenceProvider;
use ::common::session::{NavigationGuard, SaveError, UserInteraction};
use ::common::store::ZNodeStore;
use ::common::zpath::ZPath;

#[tokio::test]
async fn test_load_edit_save_round_trip() {
    let (store, _, ctrl) = setup_env();
    store.insert(ZPath::parse("/config"), "{}");

    ctrl.load("/config").await.unwrap();
    assert!(!ctrl.is_dirty().await);

    ctrl.set_buffer("{\"a\":1}").await;
    assert!(ctrl.is_dirty().await);

    let meta = ctrl.save().await.unwrap();
    assert_eq!(meta.data_version, 1);
    assert!(!ctrl.is_dirty().await);

    // the store agrees with the session's new baseline
    let stored = store
        .get_node(&ZPath::parse("/config"))
        .await
        .unwrap();
    assert_eq!(stored.data, "{\"a\":1}");
    assert_eq!(stored.meta.data_version, 1);
}

#[tokio::test]
async fn test_two_sessions_second_save_conflicts() {
    let (store, prefs, session_a) = setup_env();
    let path = ZPath::parse("/shared");
    store.insert(path.clone(), "original");
    // walk the node up to version 3 before either session loads
    for version in 0..3 {
        store.set_data(&path, version, "original").await.unwrap();
    }

    let session_b = common::second_controller(&store, &prefs);
    session_a.load("/shared").await.unwrap();
    session_b.load("/shared").await.unwrap();
    let shared_version = session_a.baseline().await.unwrap().meta.data_version;
    assert_eq!(
        shared_version,
        session_b.baseline().await.unwrap().meta.data_version
    );

    // A wins the race
    session_a.set_buffer("from A").await;
    let meta_a = session_a.save().await.unwrap();
    assert_eq!(meta_a.data_version, shared_version + 1);

    // B's save against the shared version must conflict, untouched buffer
    session_b.set_buffer("from B").await;
    let err = session_b.save().await.unwrap_err();
    assert_eq!(
        err,
        SaveError::VersionConflict {
            expected: shared_version,
            actual: shared_version + 1,
        }
    );
    assert_eq!(session_b.buffer().await, "from B");
    assert_eq!(session_b.baseline().await.unwrap().data, "original");

    // after reloading, B can save
    session_b.load("/shared").await.unwrap();
    session_b.set_buffer("from B").await;
    let meta_b = session_b.save().await.unwrap();
    assert_eq!(meta_b.data_version, shared_version + 2);
}

#[tokio::test]
async fn test_format_memory_travels_between_sessions() {
    let (store, prefs, first) = setup_env();
    store.insert(ZPath::parse("/config"), "{\"a\":1}");

    first.load("/config").await.unwrap();
    first.switch_format(FormatKind::Json).await;

    // let the fire-and-forget preference write land
    let path = ZPath::parse("/config");
    for _ in 0..50 {
        if prefs.format_for(&path).await.unwrap().is_some() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    // a later visit recalls the remembered format
    let second = common::second_controller(&store, &prefs);
    second.load("/config").await.unwrap();
    second.recall_format().await;
    assert_eq!(second.selected_format().await, FormatKind::Json);
    assert!(second.formatter_available().await);
}

struct CountingUi {
    answer: bool,
    asked: AtomicUsize,
}

#[async_trait]
impl UserInteraction for CountingUi {
    async fn confirm_discard(&self) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }

    fn notify(&self, _message: &str) {}

    fn report_error(&self, _error: &dyn std::error::Error) {}
}

#[tokio::test]
async fn test_navigation_guard_protects_dirty_session() {
    let (store, _, ctrl) = setup_env();
    store.insert(ZPath::parse("/config"), "{}");
    ctrl.load("/config").await.unwrap();
    ctrl.set_buffer("unsaved").await;

    let ui = Arc::new(CountingUi {
        answer: false,
        asked: AtomicUsize::new(0),
    });
    let guard = NavigationGuard::new(ui.clone());

    // declining keeps us on the node, session intact
    assert!(!guard.can_leave(&ctrl).await);
    assert_eq!(ui.asked.load(Ordering::SeqCst), 1);
    assert_eq!(ctrl.buffer().await, "unsaved");

    // saving makes the session clean; leaving no longer asks
    ctrl.save().await.unwrap();
    assert!(guard.can_leave(&ctrl).await);
    assert_eq!(ui.asked.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_queued_saves_serialize_on_one_session() {
    let (store, _, ctrl) = setup_env();
    store.insert(ZPath::parse("/config"), "v0");
    ctrl.load("/config").await.unwrap();

    // two clones of the controller racing to save: the session lock
    // queues one behind the other, and the second runs against the
    // baseline the first brought back, so both succeed
    ctrl.set_buffer("racing").await;
    let a = ctrl.clone();
    let b = ctrl.clone();
    let (ra, rb) = tokio::join!(a.save(), b.save());
    assert!(ra.is_ok());
    assert!(rb.is_ok());

    let stored = store.get_node(&ZPath::parse("/config")).await.unwrap();
    assert_eq!(stored.meta.data_version, 2);
    assert_eq!(stored.data, "racing");
}
