use std::sync::Arc;

use async_trait::async_trait;

use super::SessionController;

/// The user-facing surface the session asks for decisions and pushes
/// messages to. Implementations decide how (dialog, terminal prompt);
/// the session only consumes the eventual answer.
#[async_trait]
pub trait UserInteraction: Send + Sync {
    /// Ask whether unsaved changes may be discarded.
    async fn confirm_discard(&self) -> bool;

    /// Transient, non-blocking message ("Changes saved").
    fn notify(&self, message: &str);

    /// Surface an error to the user. Nothing is consumed back.
    fn report_error(&self, error: &dyn std::error::Error);
}

/// Gates navigation away from a session with unsaved changes.
///
/// An in-flight save is never cancelled here; the guard's only job is
/// to stop new navigation before a new unsaved edit is lost.
#[derive(Clone)]
pub struct NavigationGuard {
    ui: Arc<dyn UserInteraction>,
}

impl NavigationGuard {
    pub fn new(ui: Arc<dyn UserInteraction>) -> Self {
        Self { ui }
    }

    /// Permit navigation immediately if the session is clean; otherwise
    /// return the user's discard decision unmodified.
    pub async fn can_leave(&self, controller: &SessionController) -> bool {
        if !controller.is_dirty().await {
            return true;
        }

        self.ui.confirm_discard().await
    }
}
