use serde::{Deserialize, Serialize};

use crate::zpath::ZPath;

/// A single entry of a znode's access-control list.
///
/// The editing core treats ACLs as an opaque blob: they are read with the
/// node and passed through writes unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZNodeAcl {
    pub scheme: String,
    pub id: String,
    pub perms: u32,
}

/// The store-assigned stat for a znode.
///
/// Everything here is produced by the store; the editing core never
/// fabricates one. The only field it branches on is `data_version`,
/// which the store bumps on every accepted data write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ZNodeMeta {
    /// Transaction id that created the node.
    pub czxid: i64,
    /// Transaction id of the last data write.
    pub mzxid: i64,
    /// Creation time, unix millis.
    pub ctime: i64,
    /// Last data write time, unix millis.
    pub mtime: i64,
    /// Monotonically increasing data version; a write is accepted only
    /// if the caller's believed version matches this at write time.
    pub data_version: i64,
    pub acl_version: i64,
    pub children_version: i64,
    pub data_length: u32,
    pub num_children: u32,
    /// Session id of the owner if the node is ephemeral, zero otherwise.
    pub ephemeral_owner: i64,
}

/// A node in the tree store as last seen by the client.
///
/// `data` is opaque text from the core's perspective; interpreting it is
/// the formatters' concern, and only at the user's request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZNode {
    pub path: ZPath,
    pub data: String,
    pub acl: Vec<ZNodeAcl>,
    pub meta: ZNodeMeta,
}

impl ZNode {
    /// Rebuild the node after an accepted write: same identity and ACL,
    /// new data and store-assigned stat. Replaces the old value
    /// wholesale, never patches it in place.
    pub fn with_write(&self, data: String, meta: ZNodeMeta) -> Self {
        Self {
            path: self.path.clone(),
            data,
            acl: self.acl.clone(),
            meta,
        }
    }
}
