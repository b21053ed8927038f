//! The parsed JSON value.

use std::fmt;

use crate::convert::escape_json_string;

/// A JSON value as read from text.
///
/// Numbers and booleans keep their literal text so the exact digits (and the
/// original keyword spelling) survive the trip through XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonValue {
    Null,
    String(String),
    Number(String),
    Boolean(String),
    /// Properties in document order.
    Object(Vec<(String, JsonValue)>),
    Array(Vec<JsonValue>),
}

impl JsonValue {
    /// Short name of the value kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::String(_) => "string",
            JsonValue::Number(_) => "number",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Looks up a property of an object by name.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(properties) => properties
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// The literal text of a scalar, as it would be stored in XML.
    pub fn as_scalar_text(&self) -> Option<&str> {
        match self {
            JsonValue::String(text) | JsonValue::Number(text) | JsonValue::Boolean(text) => {
                Some(text)
            }
            _ => None,
        }
    }
}

/// Writes compact JSON with no inserted whitespace.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => f.write_str("null"),
            JsonValue::String(text) => write!(f, "\"{}\"", escape_json_string(text)),
            JsonValue::Number(text) | JsonValue::Boolean(text) => f.write_str(text),
            JsonValue::Object(properties) => {
                f.write_str("{")?;
                for (i, (name, value)) in properties.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{}\":{}", escape_json_string(name), value)?;
                }
                f.write_str("}")
            }
            JsonValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_compact() {
        let value = JsonValue::Object(vec![
            ("a".to_string(), JsonValue::Number("1.50".to_string())),
            (
                "b".to_string(),
                JsonValue::Array(vec![
                    JsonValue::Null,
                    JsonValue::Boolean("TRUE".to_string()),
                    JsonValue::String("x\"y".to_string()),
                ]),
            ),
            ("c".to_string(), JsonValue::Object(vec![])),
        ]);

        assert_eq!(
            value.to_string(),
            r#"{"a":1.50,"b":[null,TRUE,"x\"y"],"c":{}}"#
        );
    }

    #[test]
    fn test_get_and_scalar_text() {
        let value = JsonValue::Object(vec![(
            "n".to_string(),
            JsonValue::Number("-3".to_string()),
        )]);

        assert_eq!(value.get("n").and_then(JsonValue::as_scalar_text), Some("-3"));
        assert_eq!(value.get("missing"), None);
        assert_eq!(value.kind_name(), "object");
        assert!(JsonValue::Null.as_scalar_text().is_none());
    }
}
