mod memory;

pub use memory::MemoryZNodeStore;

use async_trait::async_trait;

use crate::znode::{ZNode, ZNodeMeta};
use crate::zpath::ZPath;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("node not found: {0}")]
    NotFound(ZPath),
    /// The caller's believed data version no longer matches the store's.
    /// The write was rejected; nothing was mutated on either side.
    #[error("version conflict: expected {expected}, store has {actual}")]
    VersionConflict { expected: i64, actual: i64 },
    #[error("permission denied: {0}")]
    PermissionDenied(ZPath),
    #[error("transport error: {0}")]
    Transport(String),
}

/// The tree store seam.
///
/// Reads are plain fetches; writes are compare-and-swap on the node's
/// `data_version`. Implementations must reject a write whose expected
/// version is stale and must not mutate anything when they do.
#[async_trait]
pub trait ZNodeStore: Send + Sync + std::fmt::Debug {
    /// Fetch a node: data, ACL, and the store-assigned stat.
    async fn get_node(&self, path: &ZPath) -> Result<ZNode, StoreError>;

    /// Replace a node's data iff `expected_version` matches the store's
    /// current `data_version`. Returns the new stat on success.
    async fn set_data(
        &self,
        path: &ZPath,
        expected_version: i64,
        data: &str,
    ) -> Result<ZNodeMeta, StoreError>;
}
