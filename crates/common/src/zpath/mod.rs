use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A canonical znode path.
///
/// Parsing never fails: empty or malformed input normalizes toward the
/// root path `/`. Canonical form has a leading slash, single slashes
/// between segments, no empty segments, and no trailing slash (except
/// for the root itself).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ZPath(String);

// Deserialization goes through `parse` so the canonical-form invariant
// holds even for paths arriving off the wire.
impl<'de> Deserialize<'de> for ZPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ZPath::parse(&raw))
    }
}

impl ZPath {
    /// Parse a raw navigation token into a canonical path.
    pub fn parse(raw: &str) -> Self {
        let segments: Vec<&str> = raw
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            return Self::root();
        }

        Self(format!("/{}", segments.join("/")))
    }

    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final segment, or `/` for the root.
    pub fn name(&self) -> &str {
        if self.is_root() {
            return "/";
        }
        // canonical form guarantees at least one '/'
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// The containing path, or `None` for the root.
    pub fn parent(&self) -> Option<ZPath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// A direct child of this path. The child name itself is normalized.
    pub fn child(&self, name: &str) -> ZPath {
        Self::parse(&format!("{}/{}", self.0, name))
    }
}

impl Default for ZPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for ZPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ZPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_resolves_to_root() {
        assert_eq!(ZPath::parse(""), ZPath::root());
        assert_eq!(ZPath::parse("   "), ZPath::root());
        assert_eq!(ZPath::parse("/"), ZPath::root());
        assert_eq!(ZPath::parse("///"), ZPath::root());
    }

    #[test]
    fn test_normalization() {
        assert_eq!(ZPath::parse("/config").as_str(), "/config");
        assert_eq!(ZPath::parse("config").as_str(), "/config");
        assert_eq!(ZPath::parse("/config/").as_str(), "/config");
        assert_eq!(ZPath::parse("//config///service").as_str(), "/config/service");
        assert_eq!(ZPath::parse(" /a / b ").as_str(), "/a/b");
    }

    #[test]
    fn test_name_and_parent() {
        let path = ZPath::parse("/config/service/timeout");
        assert_eq!(path.name(), "timeout");
        assert_eq!(path.parent().unwrap().as_str(), "/config/service");

        let top = ZPath::parse("/config");
        assert_eq!(top.name(), "config");
        assert_eq!(top.parent().unwrap(), ZPath::root());

        assert_eq!(ZPath::root().name(), "/");
        assert!(ZPath::root().parent().is_none());
    }

    #[test]
    fn test_child() {
        let path = ZPath::parse("/config");
        assert_eq!(path.child("service").as_str(), "/config/service");
        assert_eq!(ZPath::root().child("a").as_str(), "/a");
        assert_eq!(path.child("/nested/").as_str(), "/config/nested");
    }

    #[test]
    fn test_parent_name_round_trip() {
        let path = ZPath::parse("/a/b/c");
        let rebuilt = path.parent().unwrap().child(path.name());
        assert_eq!(rebuilt, path);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let path = ZPath::parse("/config/service");
        let encoded = serde_json::to_string(&path).unwrap();
        assert_eq!(encoded, "\"/config/service\"");
        let decoded: ZPath = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, path);
    }
}
