use super::{FormatError, Formatter};

/// Formats a buffer as canonical YAML.
///
/// Round-trips through `serde_yaml::Value`, which normalizes
/// indentation, flow style, and quoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format(&self, input: &str) -> Result<String, FormatError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(input).map_err(|e| FormatError::Invalid(e.to_string()))?;

        serde_yaml::to_string(&value).map_err(|e| FormatError::Invalid(e.to_string()))
    }
}
