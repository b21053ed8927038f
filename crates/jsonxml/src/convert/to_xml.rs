//! Lowering a [`JsonValue`] into an XML element tree.

use jsonxml_dom::{XmlElement, XmlError, XmlNode};
use tracing::trace;

use crate::error::Result;
use crate::json::JsonValue;
use crate::metadata::{
    ATTRIBUTE_MARKER, NULLABLE_ATTRIBUTE, TEXT_PROPERTY, VALUE_TYPE_ATTRIBUTE, ValueType,
};
use crate::options::ConvertOptions;

/// Lower a parsed document into a tree rooted at `options.root_name`.
///
/// The metadata namespace is declared on the root only if some element was
/// tagged.
pub fn json_value_to_xml(value: &JsonValue, options: &ConvertOptions) -> Result<XmlElement> {
    let mut lowering = Lowering {
        options,
        metadata_used: false,
    };

    let mut root = XmlElement::new(options.root_name.as_str())?;
    lowering.lower_value(&mut root, value)?;

    if lowering.metadata_used {
        lowering.ensure_metadata_namespace(&mut root)?;
    }

    Ok(root)
}

struct Lowering<'a> {
    options: &'a ConvertOptions,
    metadata_used: bool,
}

impl Lowering<'_> {
    fn ensure_metadata_namespace(&self, root: &mut XmlElement) -> Result<()> {
        root.declare_namespace(
            Some(self.options.metadata_prefix.as_str()),
            self.options.metadata_namespace.as_str(),
        )?;
        Ok(())
    }

    fn tag(&mut self, element: &mut XmlElement, name: &str, value: &str) -> Result<()> {
        element.set_namespaced_attribute(
            &self.options.metadata_prefix,
            name,
            &self.options.metadata_namespace,
            value,
        )?;
        self.metadata_used = true;
        Ok(())
    }

    fn tag_value_type(&mut self, element: &mut XmlElement, value_type: ValueType) -> Result<()> {
        self.tag(element, VALUE_TYPE_ATTRIBUTE, value_type.as_str())
    }

    /// Writes `value` as the content of `element`.
    fn lower_value(&mut self, element: &mut XmlElement, value: &JsonValue) -> Result<()> {
        match value {
            JsonValue::Null => {}
            JsonValue::String(text) => {
                if text.is_empty() && self.options.mark_empty_strings {
                    self.tag(element, NULLABLE_ATTRIBUTE, "false")?;
                }
                element.append_text(text.as_str());
            }
            JsonValue::Number(text) => {
                self.tag_value_type(element, ValueType::Number)?;
                element.append_text(text.as_str());
            }
            JsonValue::Boolean(text) => {
                self.tag_value_type(element, ValueType::Boolean)?;
                element.append_text(text.as_str());
            }
            JsonValue::Object(properties) if properties.is_empty() => {
                self.tag_value_type(element, ValueType::Object)?;
            }
            JsonValue::Object(properties) => {
                for (name, value) in properties {
                    self.lower_property(element, name, value)?;
                }
                // A lone "#text" member would otherwise read back as a bare string.
                if element.attributes().is_empty()
                    && element.namespaces().is_empty()
                    && matches!(element.children(), [XmlNode::Text(_)])
                {
                    self.tag_value_type(element, ValueType::Object)?;
                }
            }
            JsonValue::Array(items) => {
                self.tag_value_type(element, ValueType::Array)?;
                for item in items {
                    let mut child = XmlElement::new(self.options.item_name.as_str())?;
                    self.lower_value(&mut child, item)?;
                    element.push_element(child);
                }
            }
        }
        Ok(())
    }

    fn lower_property(&mut self, element: &mut XmlElement, name: &str, value: &JsonValue) -> Result<()> {
        // Arrays always become elements, even under an '@' name.
        if !matches!(value, JsonValue::Array(_)) {
            if let Some(attribute) = name.strip_prefix(ATTRIBUTE_MARKER) {
                return self.lower_attribute(element, attribute, value);
            }
            if name == TEXT_PROPERTY
                && let JsonValue::String(text) = value
            {
                element.append_text(text.as_str());
                return Ok(());
            }
        }

        trace!(element = %name, kind = value.kind_name(), "Creating element");
        let mut child = XmlElement::new(name)?;
        self.lower_value(&mut child, value)?;
        element.push_element(child);
        Ok(())
    }

    fn lower_attribute(&mut self, element: &mut XmlElement, name: &str, value: &JsonValue) -> Result<()> {
        let JsonValue::String(text) = value else {
            return Err(XmlError::UnsupportedAttributeValue {
                name: name.to_string(),
                found: format!("a {} value", value.kind_name()),
            }
            .into());
        };

        match name.strip_prefix("xmlns") {
            Some("") => element.declare_namespace(None, text.as_str())?,
            Some(rest) if rest.starts_with(':') => {
                let prefix = &rest[1..];
                if prefix == self.options.metadata_prefix && *text != self.options.metadata_namespace {
                    return Err(XmlError::ReservedPrefix {
                        prefix: prefix.to_string(),
                        reserved: self.options.metadata_namespace.clone(),
                        uri: text.clone(),
                    }
                    .into());
                }
                element.declare_namespace(Some(prefix), text.as_str())?
            }
            _ => element.set_attribute(name, text.as_str())?,
        }
        Ok(())
    }
}
