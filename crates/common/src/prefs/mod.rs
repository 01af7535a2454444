mod memory;

pub use memory::MemoryPreferenceProvider;

use async_trait::async_trait;

use crate::format::FormatKind;
use crate::zpath::ZPath;

/// Preference storage failed. Errors at this boundary are ignorable:
/// the session logs them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("preference store error: {0}")]
pub struct PrefsError(pub String);

/// Per-path memory of the format a node was last edited under.
///
/// Best-effort storage, independent of session correctness: a recall
/// miss falls back to the default format, and a failed write must never
/// fail an edit or a save.
#[async_trait]
pub trait PreferenceProvider: Send + Sync + std::fmt::Debug {
    /// The format last used for `path`, if remembered.
    async fn format_for(&self, path: &ZPath) -> Result<Option<FormatKind>, PrefsError>;

    /// Remember `kind` as the format for `path`.
    async fn set_format_for(&self, path: &ZPath, kind: FormatKind) -> Result<(), PrefsError>;
}
