use std::sync::Arc;

use common::format::FormatRegistry;
use common::prefs::MemoryPreferenceProvider;
use common::session::SessionController;
use common::store::MemoryZNodeStore;

/// Shared setup: an in-memory store plus a controller wired to it with
/// the standard registry and a fresh preference provider.
pub fn setup_env() -> (MemoryZNodeStore, MemoryPreferenceProvider, SessionController) {
    let store = MemoryZNodeStore::new();
    let prefs = MemoryPreferenceProvider::new();
    let controller = SessionController::new(
        Arc::new(store.clone()),
        Arc::new(prefs.clone()),
        Arc::new(FormatRegistry::standard()),
    );
    (store, prefs, controller)
}

/// A second controller sharing the same store and preferences,
/// modeling another open view of the tree.
pub fn second_controller(
    store: &MemoryZNodeStore,
    prefs: &MemoryPreferenceProvider,
) -> SessionController {
    SessionController::new(
        Arc::new(store.clone()),
        Arc::new(prefs.clone()),
        Arc::new(FormatRegistry::standard()),
    )
}
