use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use super::{StoreError, ZNodeStore};
use crate::znode::{ZNode, ZNodeAcl, ZNodeMeta};
use crate::zpath::ZPath;

/// In-memory tree store with full compare-and-swap semantics.
///
/// Backs tests and embedded use. Extra hooks let tests provoke the
/// store-side failure modes (permission denial, transport outage) that
/// a real deployment produces.
#[derive(Debug, Clone, Default)]
pub struct MemoryZNodeStore {
    inner: Arc<RwLock<MemoryZNodeStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryZNodeStoreInner {
    nodes: HashMap<ZPath, ZNode>,
    /// Highest transaction id handed out so far.
    last_zxid: i64,
    /// Paths whose writes fail with PermissionDenied.
    write_denied: HashSet<ZPath>,
    /// When set, every call fails with a transport error.
    offline: bool,
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

impl MemoryZNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with a fresh stat at version zero. Replaces any
    /// existing node at the path.
    pub fn insert(&self, path: ZPath, data: &str) -> ZNode {
        self.insert_with_acl(path, data, Vec::new())
    }

    pub fn insert_with_acl(&self, path: ZPath, data: &str, acl: Vec<ZNodeAcl>) -> ZNode {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.last_zxid += 1;
        let now = now_millis();
        let node = ZNode {
            path: path.clone(),
            data: data.to_string(),
            acl,
            meta: ZNodeMeta {
                czxid: inner.last_zxid,
                mzxid: inner.last_zxid,
                ctime: now,
                mtime: now,
                data_length: data.len() as u32,
                ..Default::default()
            },
        };
        inner.nodes.insert(path, node.clone());
        node
    }

    /// Delete the node at `path`, if any.
    pub fn remove(&self, path: &ZPath) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.nodes.remove(path);
    }

    /// Make writes to `path` fail with `PermissionDenied`.
    pub fn deny_writes(&self, path: &ZPath) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.write_denied.insert(path.clone());
    }

    /// Toggle a simulated transport outage for every call.
    pub fn set_offline(&self, offline: bool) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.offline = offline;
    }
}

#[async_trait]
impl ZNodeStore for MemoryZNodeStore {
    async fn get_node(&self, path: &ZPath) -> Result<ZNode, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| StoreError::Transport(format!("failed to acquire read lock: {}", e)))?;

        if inner.offline {
            return Err(StoreError::Transport("store offline".to_string()));
        }

        inner
            .nodes
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.clone()))
    }

    async fn set_data(
        &self,
        path: &ZPath,
        expected_version: i64,
        data: &str,
    ) -> Result<ZNodeMeta, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| StoreError::Transport(format!("failed to acquire write lock: {}", e)))?;

        if inner.offline {
            return Err(StoreError::Transport("store offline".to_string()));
        }

        if inner.write_denied.contains(path) {
            return Err(StoreError::PermissionDenied(path.clone()));
        }

        let actual = inner
            .nodes
            .get(path)
            .ok_or_else(|| StoreError::NotFound(path.clone()))?
            .meta
            .data_version;

        if actual != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }

        inner.last_zxid += 1;
        let zxid = inner.last_zxid;
        let node = inner.nodes.get_mut(path).expect("checked above");
        node.data = data.to_string();
        node.meta.data_version += 1;
        node.meta.mzxid = zxid;
        node.meta.mtime = now_millis();
        node.meta.data_length = data.len() as u32;

        Ok(node.meta)
    }
}
