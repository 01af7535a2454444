use super::{FormatError, Formatter};

/// Formats a buffer as pretty-printed JSON.
///
/// Parses to a `serde_json::Value` first, so malformed input fails with
/// the parser's message and the buffer is left to the caller untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, input: &str) -> Result<String, FormatError> {
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(|e| FormatError::Invalid(e.to_string()))?;

        serde_json::to_string_pretty(&value).map_err(|e| FormatError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pretty_prints() {
        let formatted = JsonFormatter.format("{\"a\":1,\"b\":[true,null]}").unwrap();
        assert_eq!(formatted, "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}");
    }

    #[test]
    fn test_idempotent() {
        let once = JsonFormatter.format("{\"a\":{\"b\":2}}").unwrap();
        let twice = JsonFormatter.format(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_malformed_input_reports_message() {
        let err = JsonFormatter.format("{invalid").unwrap_err();
        match err {
            FormatError::Invalid(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_documents_are_valid() {
        assert_eq!(JsonFormatter.format("42").unwrap(), "42");
        assert_eq!(JsonFormatter.format("null").unwrap(), "null");
    }
}
