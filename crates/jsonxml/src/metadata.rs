//! Reserved metadata attributes shared by both conversion directions.
//!
//! The reader tags elements with `ValueType` and `Nullable` in a private
//! namespace; the writer reads the same attributes back. Neither attribute
//! ever appears in the JSON output.

use std::fmt;

use jsonxml_dom::XmlElement;

/// Namespace of the reserved attributes.
pub const METADATA_NAMESPACE: &str = "http://www.integround.com/json";

/// Prefix declared on the root element for [`METADATA_NAMESPACE`].
pub const METADATA_PREFIX: &str = "json";

/// Default name of the document root element.
pub const ROOT_NAME: &str = "Json";

/// Default name of the element created for each array item.
pub const ITEM_NAME: &str = "Value";

pub const VALUE_TYPE_ATTRIBUTE: &str = "ValueType";
pub const NULLABLE_ATTRIBUTE: &str = "Nullable";

/// Property name under which mixed-content text is written.
pub const TEXT_PROPERTY: &str = "#text";

/// Property name prefix marking an XML attribute.
pub const ATTRIBUTE_MARKER: char = '@';

/// The JSON kind recorded on an element when its children cannot tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Array,
    Object,
    Number,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Array => "Array",
            ValueType::Object => "Object",
            ValueType::Number => "Number",
            ValueType::Boolean => "Boolean",
        }
    }

    /// Parses the attribute text. Unknown values yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "Array" => Some(ValueType::Array),
            "Object" => Some(ValueType::Object),
            "Number" => Some(ValueType::Number),
            "Boolean" => Some(ValueType::Boolean),
            _ => None,
        }
    }

    /// Number and boolean text is written without quotes.
    pub fn is_literal(&self) -> bool {
        matches!(self, ValueType::Number | ValueType::Boolean)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata read back from one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMetadata {
    pub value_type: Option<ValueType>,
    /// False only when `Nullable` is present and equals `false` (any case).
    pub nullable: bool,
}

impl ElementMetadata {
    pub fn read(element: &XmlElement, namespace: &str) -> Self {
        let value_type = element
            .attribute_ns(namespace, VALUE_TYPE_ATTRIBUTE)
            .and_then(ValueType::parse);
        let nullable = !element
            .attribute_ns(namespace, NULLABLE_ATTRIBUTE)
            .is_some_and(|v| v.eq_ignore_ascii_case("false"));

        Self {
            value_type,
            nullable,
        }
    }

    pub fn is_literal(&self) -> bool {
        self.value_type.is_some_and(|t| t.is_literal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_text() {
        for value_type in [
            ValueType::Array,
            ValueType::Object,
            ValueType::Number,
            ValueType::Boolean,
        ] {
            assert_eq!(ValueType::parse(value_type.as_str()), Some(value_type));
        }
        assert_eq!(ValueType::parse("String"), None);
        assert_eq!(ValueType::parse("array"), None);
    }

    #[test]
    fn test_read_metadata() -> jsonxml_dom::Result<()> {
        let mut element = XmlElement::new("E")?;
        let plain = ElementMetadata::read(&element, METADATA_NAMESPACE);
        assert_eq!(plain.value_type, None);
        assert!(plain.nullable);

        element.set_namespaced_attribute(
            METADATA_PREFIX,
            VALUE_TYPE_ATTRIBUTE,
            METADATA_NAMESPACE,
            "Number",
        )?;
        element.set_namespaced_attribute(
            METADATA_PREFIX,
            NULLABLE_ATTRIBUTE,
            METADATA_NAMESPACE,
            "FALSE",
        )?;

        let tagged = ElementMetadata::read(&element, METADATA_NAMESPACE);
        assert_eq!(tagged.value_type, Some(ValueType::Number));
        assert!(!tagged.nullable);
        assert!(tagged.is_literal());
        Ok(())
    }

    #[test]
    fn test_metadata_in_other_namespace_is_ignored() -> jsonxml_dom::Result<()> {
        let mut element = XmlElement::new("E")?;
        element.set_namespaced_attribute("x", NULLABLE_ATTRIBUTE, "urn:other", "false")?;
        element.set_attribute(VALUE_TYPE_ATTRIBUTE, "Array")?;

        let metadata = ElementMetadata::read(&element, METADATA_NAMESPACE);
        assert_eq!(metadata.value_type, None);
        assert!(metadata.nullable);
        Ok(())
    }
}
