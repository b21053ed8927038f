//! The element tree.
//!
//! Elements own their namespace declarations, attributes and children.
//! Names are validated when a node is created, so a tree that exists is
//! always serializable.

use std::borrow::Cow;

use crate::error::{Result, XmlError};
use crate::names::{validate_name, validate_ncname};

/// A namespace declaration (`xmlns` or `xmlns:prefix`) stored on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub(crate) prefix: Option<String>,
    pub(crate) uri: String,
}

impl NamespaceDecl {
    /// The declared prefix, or `None` for the default namespace.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The namespace URI bound by this declaration.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The attribute name this declaration is written as.
    pub fn attribute_name(&self) -> Cow<'_, str> {
        match &self.prefix {
            Some(prefix) => Cow::Owned(format!("xmlns:{}", prefix)),
            None => Cow::Borrowed("xmlns"),
        }
    }
}

/// An attribute, optionally qualified by a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub(crate) name: String,
    pub(crate) prefix: Option<String>,
    pub(crate) namespace: Option<String>,
    pub(crate) value: String,
}

impl XmlAttribute {
    /// The local name of the attribute.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The name as written in markup: `prefix:name` or just `name`.
    pub fn qualified_name(&self) -> Cow<'_, str> {
        match &self.prefix {
            Some(prefix) => Cow::Owned(format!("{}:{}", prefix, self.name)),
            None => Cow::Borrowed(&self.name),
        }
    }
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Character data. An empty text node is kept, and is distinct from no child at all.
    Text(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlNode::Text(text) => Some(text),
            XmlNode::Element(_) => None,
        }
    }
}

/// An XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub(crate) name: String,
    pub(crate) namespaces: Vec<NamespaceDecl>,
    pub(crate) attributes: Vec<XmlAttribute>,
    pub(crate) children: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an element without attributes or children.
    ///
    /// Fails with [`XmlError::InvalidName`] if `name` is not a valid XML name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            name,
            namespaces: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespaces(&self) -> &[NamespaceDecl] {
        &self.namespaces
    }

    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Returns true if the element has no child nodes (attributes are not children).
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterates over the child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Concatenates the direct text children.
    pub fn text(&self) -> String {
        self.children.iter().filter_map(XmlNode::as_text).collect()
    }

    /// Appends a child element.
    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Appends a text node.
    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Sets an attribute without a namespace, replacing one of the same name.
    ///
    /// Namespace declarations are not attributes in this model; `xmlns` and
    /// `xmlns:*` names are rejected here and go through [`declare_namespace`](Self::declare_namespace).
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        if name == "xmlns" || name.starts_with("xmlns:") {
            return Err(XmlError::InvalidName {
                name,
                reason: "namespace declarations cannot be set as attributes".to_string(),
            });
        }

        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.is_none() && a.qualified_name() == name.as_str())
        {
            Some(existing) => existing.value = value,
            None => self.attributes.push(XmlAttribute {
                name,
                prefix: None,
                namespace: None,
                value,
            }),
        }

        Ok(())
    }

    /// Sets an attribute in `namespace`, written with `prefix`.
    ///
    /// An existing attribute with the same namespace and local name is replaced.
    pub fn set_namespaced_attribute(
        &mut self,
        prefix: &str,
        name: &str,
        namespace: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        validate_ncname(prefix)?;
        validate_ncname(name)?;

        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.name == name)
        {
            Some(existing) => {
                existing.prefix = Some(prefix.to_string());
                existing.value = value;
            }
            None => self.attributes.push(XmlAttribute {
                name: name.to_string(),
                prefix: Some(prefix.to_string()),
                namespace: Some(namespace.to_string()),
                value,
            }),
        }

        Ok(())
    }

    /// Looks up an un-namespaced attribute by its written name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.qualified_name() == name)
            .map(|a| a.value.as_str())
    }

    /// Looks up an attribute by namespace URI and local name.
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Declares a namespace on this element.
    ///
    /// Declaring the same prefix again replaces its URI, so repeated calls are idempotent.
    pub fn declare_namespace(&mut self, prefix: Option<&str>, uri: impl Into<String>) -> Result<()> {
        if let Some(prefix) = prefix {
            validate_ncname(prefix)?;
            if prefix == "xmlns" {
                return Err(XmlError::InvalidName {
                    name: prefix.to_string(),
                    reason: "the 'xmlns' prefix cannot be declared".to_string(),
                });
            }
        }

        let uri = uri.into();
        match self
            .namespaces
            .iter_mut()
            .find(|d| d.prefix.as_deref() == prefix)
        {
            Some(existing) => existing.uri = uri,
            None => self.namespaces.push(NamespaceDecl {
                prefix: prefix.map(str::to_string),
                uri,
            }),
        }

        Ok(())
    }

    /// Returns the URI this element itself declares for `prefix`.
    pub fn declared_namespace(&self, prefix: Option<&str>) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|d| d.prefix.as_deref() == prefix)
            .map(|d| d.uri.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_name() {
        assert!(XmlElement::new("Json").is_ok());
        assert!(matches!(
            XmlElement::new("Prop<"),
            Err(XmlError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_set_attribute_replaces_existing() -> Result<()> {
        let mut element = XmlElement::new("E")?;
        element.set_attribute("a", "1")?;
        element.set_attribute("b", "2")?;
        element.set_attribute("a", "3")?;

        assert_eq!(element.attributes().len(), 2);
        assert_eq!(element.attribute("a"), Some("3"));
        assert_eq!(element.attributes()[0].name(), "a");
        Ok(())
    }

    #[test]
    fn test_set_attribute_rejects_namespace_declarations() -> Result<()> {
        let mut element = XmlElement::new("E")?;
        assert!(element.set_attribute("xmlns", "http://x/").is_err());
        assert!(element.set_attribute("xmlns:p", "http://x/").is_err());
        Ok(())
    }

    #[test]
    fn test_namespaced_attribute_is_separate_from_plain() -> Result<()> {
        let mut element = XmlElement::new("E")?;
        element.set_attribute("ValueType", "plain")?;
        element.set_namespaced_attribute("json", "ValueType", "urn:meta", "Array")?;

        assert_eq!(element.attribute("ValueType"), Some("plain"));
        assert_eq!(element.attribute_ns("urn:meta", "ValueType"), Some("Array"));
        assert_eq!(
            element.attributes()[1].qualified_name(),
            "json:ValueType"
        );
        Ok(())
    }

    #[test]
    fn test_declare_namespace_is_idempotent() -> Result<()> {
        let mut element = XmlElement::new("Json")?;
        element.declare_namespace(Some("json"), "urn:meta")?;
        element.declare_namespace(Some("json"), "urn:meta")?;
        element.declare_namespace(None, "http://x/")?;

        assert_eq!(element.namespaces().len(), 2);
        assert_eq!(element.declared_namespace(Some("json")), Some("urn:meta"));
        assert_eq!(element.declared_namespace(None), Some("http://x/"));
        assert_eq!(element.namespaces()[0].attribute_name(), "xmlns:json");
        assert!(element.declare_namespace(Some("xmlns"), "urn:x").is_err());
        Ok(())
    }

    #[test]
    fn test_children_and_text() -> Result<()> {
        let mut root = XmlElement::new("Root")?;
        let mut child = XmlElement::new("P")?;
        child.append_text("10");
        root.push_element(child);
        root.append_text("tail");

        assert!(!root.is_empty());
        assert_eq!(root.elements().count(), 1);
        assert_eq!(root.text(), "tail");
        assert_eq!(root.elements().next().map(XmlElement::text), Some("10".to_string()));
        Ok(())
    }

    #[test]
    fn test_empty_text_is_a_child() -> Result<()> {
        let mut element = XmlElement::new("P")?;
        assert!(element.is_empty());
        element.append_text("");
        assert!(!element.is_empty());
        Ok(())
    }
}
