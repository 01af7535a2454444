mod json;
mod yaml;

pub use json::JsonFormatter;
pub use yaml::YamlFormatter;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The format a buffer is being edited under.
///
/// A kind is just a label; whether it can be validated and
/// pretty-printed depends on the registry having a formatter for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    #[default]
    Text,
    Json,
    Yaml,
    Xml,
}

impl FormatKind {
    pub const ALL: [FormatKind; 4] = [
        FormatKind::Text,
        FormatKind::Json,
        FormatKind::Yaml,
        FormatKind::Xml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Text => "text",
            FormatKind::Json => "json",
            FormatKind::Yaml => "yaml",
            FormatKind::Xml => "xml",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(FormatKind::Text),
            "json" => Ok(FormatKind::Json),
            "yaml" | "yml" => Ok(FormatKind::Yaml),
            "xml" => Ok(FormatKind::Xml),
            other => Err(FormatError::Invalid(format!(
                "unknown format kind: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// No formatter is registered for the kind. Not exceptional control
    /// flow: callers can check `FormatRegistry::supports` up front.
    #[error("no formatter for '{0}'")]
    Unsupported(FormatKind),
    /// The buffer is not valid content for the kind. The message is
    /// meant for the user.
    #[error("{0}")]
    Invalid(String),
}

/// A capability that validates text for one format kind and re-renders
/// it canonically. Formatting is an idempotent normalization, not a
/// semantic edit.
pub trait Formatter: Send + Sync + fmt::Debug {
    fn format(&self, input: &str) -> Result<String, FormatError>;
}

/// Inspectable map from format kind to formatter capability.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formatters: HashMap<FormatKind, Arc<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard registry: JSON and YAML. `Text` and `Xml` are valid
    /// kinds to edit under but ship without a formatter.
    pub fn standard() -> Self {
        Self::new()
            .with_formatter(FormatKind::Json, Arc::new(JsonFormatter))
            .with_formatter(FormatKind::Yaml, Arc::new(YamlFormatter))
    }

    pub fn with_formatter(mut self, kind: FormatKind, formatter: Arc<dyn Formatter>) -> Self {
        self.formatters.insert(kind, formatter);
        self
    }

    pub fn get(&self, kind: FormatKind) -> Option<Arc<dyn Formatter>> {
        self.formatters.get(&kind).cloned()
    }

    pub fn supports(&self, kind: FormatKind) -> bool {
        self.formatters.contains_key(&kind)
    }

    /// Validate and canonically re-render `input` under `kind`.
    pub fn format(&self, kind: FormatKind, input: &str) -> Result<String, FormatError> {
        self.get(kind)
            .ok_or(FormatError::Unsupported(kind))?
            .format(input)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_standard_registry_capabilities() {
        let registry = FormatRegistry::standard();
        assert!(registry.supports(FormatKind::Json));
        assert!(registry.supports(FormatKind::Yaml));
        assert!(!registry.supports(FormatKind::Text));
        assert!(!registry.supports(FormatKind::Xml));
    }

    #[test]
    fn test_unsupported_kind_errors() {
        let registry = FormatRegistry::standard();
        let result = registry.format(FormatKind::Xml, "<a/>");
        assert_eq!(result, Err(FormatError::Unsupported(FormatKind::Xml)));
    }

    #[test]
    fn test_registry_is_extensible() {
        #[derive(Debug)]
        struct Upper;
        impl Formatter for Upper {
            fn format(&self, input: &str) -> Result<String, FormatError> {
                Ok(input.to_ascii_uppercase())
            }
        }

        let registry = FormatRegistry::standard().with_formatter(FormatKind::Text, Arc::new(Upper));
        assert!(registry.supports(FormatKind::Text));
        assert_eq!(registry.format(FormatKind::Text, "ab").unwrap(), "AB");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("json".parse::<FormatKind>().unwrap(), FormatKind::Json);
        assert_eq!("YML".parse::<FormatKind>().unwrap(), FormatKind::Yaml);
        assert_eq!("txt".parse::<FormatKind>().unwrap(), FormatKind::Text);
        assert!("toml".parse::<FormatKind>().is_err());
    }
}
