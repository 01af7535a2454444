// Library exports: everything a consumer needs to talk to a tree store
// gateway without going through the binary.

pub mod api;
pub mod prefs;
pub mod state;
pub mod store;
pub mod ui;

pub use prefs::FilePreferenceProvider;
pub use state::{AppConfig, AppState, StateError};
pub use store::HttpZNodeStore;
pub use ui::TerminalInteraction;
