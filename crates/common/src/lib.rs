/**
 * Pluggable text formatters (validate + pretty-print)
 *  keyed by format kind. The registry is a closed,
 *  inspectable map, not a class hierarchy.
 */
pub mod format;
/**
 * Per-path format memory. Best-effort: failures here
 *  must never fail an edit or a save.
 */
pub mod prefs;
/**
 * The node-data editing session: baseline vs buffer,
 *  format negotiation, versioned saves, and the
 *  navigation guard that protects unsaved edits.
 */
pub mod session;
/**
 * The tree store seam: read a node, compare-and-swap
 *  its data. Includes an in-memory implementation with
 *  full CAS semantics.
 */
pub mod store;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;
/**
 * Znode model: opaque data payload, ACL passthrough,
 *  and the store-assigned stat (version counters).
 */
pub mod znode;
/**
 * Hierarchical path parsing. Never fails: malformed
 *  input normalizes toward the root path.
 */
pub mod zpath;

pub mod prelude {
    pub use crate::format::{FormatError, FormatKind, FormatRegistry, Formatter};
    pub use crate::prefs::{MemoryPreferenceProvider, PreferenceProvider, PrefsError};
    pub use crate::session::{
        EditingSession, LoadError, NavigationGuard, SaveError, SessionController,
        UserInteraction,
    };
    pub use crate::store::{MemoryZNodeStore, StoreError, ZNodeStore};
    pub use crate::version::build_info;
    pub use crate::znode::{ZNode, ZNodeAcl, ZNodeMeta};
    pub use crate::zpath::ZPath;
}
