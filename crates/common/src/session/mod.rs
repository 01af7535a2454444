mod guard;

pub use guard::{NavigationGuard, UserInteraction};

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::format::{FormatError, FormatKind, FormatRegistry};
use crate::prefs::PreferenceProvider;
use crate::store::{StoreError, ZNodeStore};
use crate::znode::{ZNode, ZNodeMeta};
use crate::zpath::ZPath;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The node fetch failed. The session is unusable: no baseline,
    /// empty buffer, editing and save disabled until a reload succeeds.
    #[error("failed to load node: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("no node loaded")]
    NoNodeLoaded,
    /// The node changed under the editor. The caller must surface this
    /// and reload before retrying; there is no automatic merge.
    #[error("version conflict: expected {expected}, store has {actual}")]
    VersionConflict { expected: i64, actual: i64 },
    /// The node was deleted under the editor.
    #[error("node no longer exists: {0}")]
    NodeGone(ZPath),
    #[error("permission denied: {0}")]
    PermissionDenied(ZPath),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<StoreError> for SaveError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => SaveError::NodeGone(path),
            StoreError::VersionConflict { expected, actual } => {
                SaveError::VersionConflict { expected, actual }
            }
            StoreError::PermissionDenied(path) => SaveError::PermissionDenied(path),
            StoreError::Transport(msg) => SaveError::Transport(msg),
        }
    }
}

/// The in-memory state of one node-data edit.
///
/// `baseline` is the last known-persisted view of the node; `buffer` is
/// what the user is editing. Dirtiness is derived from the two, never
/// stored, so it cannot diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingSession {
    path: ZPath,
    baseline: Option<ZNode>,
    buffer: String,
    selected_format: FormatKind,
    /// Set once the user explicitly picks a format; an async preference
    /// recall resolving later must not override it.
    format_pinned: bool,
}

impl EditingSession {
    /// A session with nothing loaded. Editing and save are disabled
    /// until a load succeeds.
    pub fn detached(path: ZPath, format: FormatKind) -> Self {
        Self {
            path,
            baseline: None,
            buffer: String::new(),
            selected_format: format,
            format_pinned: false,
        }
    }

    pub fn path(&self) -> &ZPath {
        &self.path
    }

    pub fn baseline(&self) -> Option<&ZNode> {
        self.baseline.as_ref()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn selected_format(&self) -> FormatKind {
        self.selected_format
    }

    /// True iff the buffer differs from the baseline data. With no
    /// baseline there is nothing to compare against and nothing to
    /// lose, so the session is never dirty.
    pub fn is_dirty(&self) -> bool {
        match &self.baseline {
            Some(node) => self.buffer != node.data,
            None => false,
        }
    }
}

/// Orchestrates one editing session against the store, the preference
/// provider, and the format registry.
///
/// Cheaply cloneable; all clones share the same session. The session
/// mutex is held across store round-trips, so a save issued while
/// another is pending queues behind it and then runs against the
/// updated baseline — at most one save is ever in flight.
#[derive(Debug, Clone)]
pub struct SessionController {
    store: Arc<dyn ZNodeStore>,
    prefs: Arc<dyn PreferenceProvider>,
    registry: Arc<FormatRegistry>,
    default_format: FormatKind,
    session: Arc<Mutex<EditingSession>>,
}

impl SessionController {
    pub fn new(
        store: Arc<dyn ZNodeStore>,
        prefs: Arc<dyn PreferenceProvider>,
        registry: Arc<FormatRegistry>,
    ) -> Self {
        let default_format = FormatKind::default();
        Self {
            store,
            prefs,
            registry,
            default_format,
            session: Arc::new(Mutex::new(EditingSession::detached(
                ZPath::root(),
                default_format,
            ))),
        }
    }

    /// Format selected when nothing is remembered for a path.
    pub fn with_default_format(mut self, kind: FormatKind) -> Self {
        self.default_format = kind;
        self
    }

    /// Load the node at `raw_path` (parsed leniently; empty resolves to
    /// the root) and reset the session around it.
    ///
    /// On failure the session is left unusable rather than half-stale:
    /// no baseline, empty buffer. Does not wait for the per-path format
    /// recall; run [`recall_format`](Self::recall_format) concurrently.
    pub async fn load(&self, raw_path: &str) -> Result<(), LoadError> {
        let path = ZPath::parse(raw_path);
        let mut session = self.session.lock().await;

        match self.store.get_node(&path).await {
            Ok(node) => {
                tracing::debug!(path = %path, version = node.meta.data_version, "loaded node");
                *session = EditingSession {
                    path,
                    buffer: node.data.clone(),
                    baseline: Some(node),
                    selected_format: self.default_format,
                    format_pinned: false,
                };
                Ok(())
            }
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "node load failed");
                *session = EditingSession::detached(path, self.default_format);
                Err(err.into())
            }
        }
    }

    /// Recall the format this path was last edited under and apply it,
    /// unless the user has pinned a choice in the meantime or the
    /// session has moved to a different path.
    ///
    /// Intended to run concurrently with the first render; either
    /// ordering with respect to `switch_format` is correct. A miss or a
    /// provider failure silently keeps the current selection.
    pub async fn recall_format(&self) {
        let path = self.session.lock().await.path.clone();

        let recalled = match self.prefs.format_for(&path).await {
            Ok(kind) => kind,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "format recall failed");
                None
            }
        };

        if let Some(kind) = recalled {
            let mut session = self.session.lock().await;
            if session.path == path && !session.format_pinned {
                session.selected_format = kind;
            }
        }
    }

    pub async fn is_dirty(&self) -> bool {
        self.session.lock().await.is_dirty()
    }

    pub async fn buffer(&self) -> String {
        self.session.lock().await.buffer.clone()
    }

    pub async fn set_buffer(&self, text: impl Into<String>) {
        self.session.lock().await.buffer = text.into();
    }

    pub async fn selected_format(&self) -> FormatKind {
        self.session.lock().await.selected_format
    }

    pub async fn baseline(&self) -> Option<ZNode> {
        self.session.lock().await.baseline.clone()
    }

    /// A copy of the current session state.
    pub async fn snapshot(&self) -> EditingSession {
        self.session.lock().await.clone()
    }

    /// Write the current buffer to the store against the baseline's
    /// *currently known* data version.
    ///
    /// On success the baseline is replaced wholesale (same path and
    /// ACL, written data, store-assigned stat), which makes the session
    /// clean as of the new baseline. On failure baseline and buffer are
    /// untouched and the typed error is returned; nothing is retried.
    pub async fn save(&self) -> Result<ZNodeMeta, SaveError> {
        let mut session = self.session.lock().await;

        let baseline = session.baseline.as_ref().ok_or(SaveError::NoNodeLoaded)?;
        let expected = baseline.meta.data_version;
        let content = session.buffer.clone();

        // Lock held across the round-trip: concurrent saves serialize
        // here instead of double-spending the version.
        match self
            .store
            .set_data(&session.path, expected, &content)
            .await
        {
            Ok(meta) => {
                tracing::info!(
                    path = %session.path,
                    version = meta.data_version,
                    "saved node data"
                );
                let old = session.baseline.take().ok_or(SaveError::NoNodeLoaded)?;
                session.baseline = Some(old.with_write(content, meta));
                Ok(meta)
            }
            Err(err) => {
                tracing::warn!(path = %session.path, error = %err, "save failed");
                Err(err.into())
            }
        }
    }

    /// True iff the registry has a formatter for the selected format.
    /// Pure predicate; callers use it to gate offering the format
    /// action at all.
    pub async fn formatter_available(&self) -> bool {
        let kind = self.session.lock().await.selected_format;
        self.registry.supports(kind)
    }

    /// Replace the buffer with its canonical rendering under the
    /// selected format. The buffer is untouched unless validation and
    /// re-rendering both succeed.
    pub async fn format_buffer(&self) -> Result<(), FormatError> {
        let mut session = self.session.lock().await;
        let formatted = self
            .registry
            .format(session.selected_format, &session.buffer)?;
        session.buffer = formatted;
        Ok(())
    }

    /// Select a format for this session and remember it for the path.
    ///
    /// Never touches the buffer. Persistence is fire-and-forget: a
    /// failed preference write is logged and otherwise invisible.
    pub async fn switch_format(&self, kind: FormatKind) {
        let path = {
            let mut session = self.session.lock().await;
            session.selected_format = kind;
            session.format_pinned = true;
            session.path.clone()
        };

        let prefs = Arc::clone(&self.prefs);
        tokio::spawn(async move {
            if let Err(err) = prefs.set_format_for(&path, kind).await {
                tracing::warn!(path = %path, error = %err, "failed to remember format");
            }
        });
    }
}
