use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{PreferenceProvider, PrefsError};
use crate::format::FormatKind;
use crate::zpath::ZPath;

/// In-memory preference provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceProvider {
    inner: Arc<RwLock<HashMap<ZPath, FormatKind>>>,
}

impl MemoryPreferenceProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceProvider for MemoryPreferenceProvider {
    async fn format_for(&self, path: &ZPath) -> Result<Option<FormatKind>, PrefsError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| PrefsError(format!("failed to acquire read lock: {}", e)))?;
        Ok(inner.get(path).copied())
    }

    async fn set_format_for(&self, path: &ZPath, kind: FormatKind) -> Result<(), PrefsError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| PrefsError(format!("failed to acquire write lock: {}", e)))?;
        inner.insert(path.clone(), kind);
        Ok(())
    }
}
