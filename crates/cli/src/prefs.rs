use std::{collections::BTreeMap, fs, path::PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use common::format::FormatKind;
use common::prefs::{PreferenceProvider, PrefsError};
use common::zpath::ZPath;

/// On-disk shape of the format memory. One entry per path that ever had
/// a format explicitly selected for it.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    formats: BTreeMap<String, FormatKind>,
}

/// Format memory persisted as TOML next to the app config.
///
/// Reads and writes the whole file on each call. The file is small (one
/// line per remembered path) and calls are rare, so no caching.
#[derive(Debug, Clone)]
pub struct FilePreferenceProvider {
    prefs_path: PathBuf,
}

impl FilePreferenceProvider {
    pub fn new(prefs_path: PathBuf) -> Self {
        Self { prefs_path }
    }

    fn read_file(&self) -> Result<PrefsFile, PrefsError> {
        if !self.prefs_path.exists() {
            return Ok(PrefsFile::default());
        }

        let raw = fs::read_to_string(&self.prefs_path)
            .map_err(|e| PrefsError(format!("failed to read {:?}: {}", self.prefs_path, e)))?;
        toml::from_str(&raw)
            .map_err(|e| PrefsError(format!("failed to parse {:?}: {}", self.prefs_path, e)))
    }

    fn write_file(&self, prefs: &PrefsFile) -> Result<(), PrefsError> {
        if let Some(parent) = self.prefs_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PrefsError(format!("failed to create {:?}: {}", parent, e)))?;
        }

        let raw = toml::to_string_pretty(prefs)
            .map_err(|e| PrefsError(format!("failed to serialize preferences: {}", e)))?;
        fs::write(&self.prefs_path, raw)
            .map_err(|e| PrefsError(format!("failed to write {:?}: {}", self.prefs_path, e)))
    }
}

#[async_trait]
impl PreferenceProvider for FilePreferenceProvider {
    async fn format_for(&self, path: &ZPath) -> Result<Option<FormatKind>, PrefsError> {
        let prefs = self.read_file()?;
        Ok(prefs.formats.get(path.as_str()).copied())
    }

    async fn set_format_for(&self, path: &ZPath, kind: FormatKind) -> Result<(), PrefsError> {
        let mut prefs = self.read_file()?;
        prefs.formats.insert(path.as_str().to_string(), kind);
        self.write_file(&prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn provider(temp: &TempDir) -> FilePreferenceProvider {
        FilePreferenceProvider::new(temp.path().join("prefs.toml"))
    }

    #[tokio::test]
    async fn test_missing_file_means_no_preference() {
        let temp = TempDir::new().unwrap();
        let prefs = provider(&temp);

        let recalled = prefs.format_for(&ZPath::parse("/config")).await.unwrap();
        assert_eq!(recalled, None);
    }

    #[tokio::test]
    async fn test_set_then_recall() {
        let temp = TempDir::new().unwrap();
        let prefs = provider(&temp);
        let path = ZPath::parse("/config/app");

        prefs.set_format_for(&path, FormatKind::Json).await.unwrap();
        let recalled = prefs.format_for(&path).await.unwrap();
        assert_eq!(recalled, Some(FormatKind::Json));

        // other paths stay unset
        let other = prefs.format_for(&ZPath::parse("/other")).await.unwrap();
        assert_eq!(other, None);
    }

    #[tokio::test]
    async fn test_preferences_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = ZPath::parse("/config/app");

        provider(&temp)
            .set_format_for(&path, FormatKind::Yaml)
            .await
            .unwrap();

        let reopened = provider(&temp);
        let recalled = reopened.format_for(&path).await.unwrap();
        assert_eq!(recalled, Some(FormatKind::Yaml));
    }

    #[tokio::test]
    async fn test_overwrite_preference() {
        let temp = TempDir::new().unwrap();
        let prefs = provider(&temp);
        let path = ZPath::parse("/config");

        prefs.set_format_for(&path, FormatKind::Json).await.unwrap();
        prefs.set_format_for(&path, FormatKind::Text).await.unwrap();

        let recalled = prefs.format_for(&path).await.unwrap();
        assert_eq!(recalled, Some(FormatKind::Text));
    }
}
