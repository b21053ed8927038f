//! Parsing XML markup into an element tree.
//!
//! The reader walks quick-xml events and builds the tree bottom-up on a
//! stack of open elements. Prefixed attribute names are resolved against the
//! namespace declarations in scope. Adjacent text and references merge into
//! one text node; whitespace-only text is dropped from elements that also
//! contain elements, so indented markup reads the same as compact markup.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};

use crate::error::{Result, XmlError};
use crate::names::{XML_NAMESPACE, is_whitespace_text, split_qualified_name};
use crate::tree::{NamespaceDecl, XmlAttribute, XmlElement, XmlNode};

/// Deepest element nesting the reader accepts, root included.
pub const MAX_DEPTH: usize = 512;

/// Parse an XML document and return its root element.
///
/// # Examples
///
/// ```
/// use jsonxml_dom::from_xml_str;
///
/// let root = from_xml_str("<Root><P>10</P><P>20</P></Root>")?;
/// assert_eq!(root.name(), "Root");
/// assert_eq!(root.elements().count(), 2);
/// # Ok::<(), jsonxml_dom::XmlError>(())
/// ```
pub fn from_xml_str(xml: &str) -> Result<XmlElement> {
    debug!(bytes = xml.len(), "Parsing XML markup");

    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::default();

    loop {
        let event = reader.read_event().map_err(|e| {
            XmlError::Parse(format!("{} at position {}", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => builder.open(&start)?,
            Event::Empty(start) => {
                builder.open(&start)?;
                builder.close(None)?;
            }
            Event::End(end) => {
                let qname = end.name();
                let name = utf8(qname.as_ref())?;
                builder.close(Some(name))?;
            }
            Event::Text(text) => {
                let raw = utf8(text.as_ref())?;
                let unescaped = unescape(raw).map_err(|e| XmlError::Parse(e.to_string()))?;
                builder.text(&unescaped)?;
            }
            Event::GeneralRef(reference) => {
                let name = utf8(reference.as_ref())?;
                let entity = format!("&{};", name);
                let resolved = unescape(&entity).map_err(|e| XmlError::Parse(e.to_string()))?;
                builder.text(&resolved)?;
            }
            Event::CData(cdata) => {
                builder.text(utf8(cdata.as_ref())?)?;
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {
                trace!("Skipping non-element markup");
            }
            Event::Eof => break,
        }
    }

    builder.finish()
}

/// Parse XML bytes, which must be UTF-8.
pub fn from_xml_slice(xml: &[u8]) -> Result<XmlElement> {
    from_xml_str(utf8(xml)?)
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| XmlError::Parse(format!("Invalid UTF-8: {}", e)))
}

/// Builds the tree from a stream of open/close/text calls.
#[derive(Default)]
struct TreeBuilder {
    /// Elements opened but not yet closed, innermost last.
    open: Vec<XmlElement>,
    root: Option<XmlElement>,
}

impl TreeBuilder {
    fn open(&mut self, start: &BytesStart<'_>) -> Result<()> {
        if self.root.is_some() {
            return Err(XmlError::Malformed(
                "document has more than one root element".to_string(),
            ));
        }
        if self.open.len() >= MAX_DEPTH {
            return Err(XmlError::Malformed(format!(
                "elements are nested deeper than {} levels",
                MAX_DEPTH
            )));
        }

        let mut element = XmlElement::new(utf8(start.name().as_ref())?)?;
        let mut pending = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| XmlError::Parse(e.to_string()))?;
            let key = utf8(attr.key.as_ref())?;
            let value = unescape(utf8(&attr.value)?)
                .map_err(|e| XmlError::Parse(e.to_string()))?
                .into_owned();

            match split_qualified_name(key) {
                (None, "xmlns") => element.declare_namespace(None, value)?,
                (Some("xmlns"), prefix) => element.declare_namespace(Some(prefix), value)?,
                (prefix, name) => pending.push((prefix.map(str::to_string), name.to_string(), value)),
            }
        }

        // Attributes may use prefixes declared later on the same start tag.
        for (prefix, name, value) in pending {
            let namespace = match &prefix {
                Some(prefix) => Some(self.resolve_prefix(&element, prefix)?),
                None => None,
            };
            element.attributes.push(XmlAttribute {
                name,
                prefix,
                namespace,
                value,
            });
        }

        self.open.push(element);
        Ok(())
    }

    fn resolve_prefix(&self, element: &XmlElement, prefix: &str) -> Result<String> {
        if prefix == "xml" {
            return Ok(XML_NAMESPACE.to_string());
        }

        std::iter::once(element)
            .chain(self.open.iter().rev())
            .flat_map(|e| e.namespaces.iter())
            .find(|d: &&NamespaceDecl| d.prefix.as_deref() == Some(prefix))
            .map(|d| d.uri.clone())
            .ok_or_else(|| XmlError::Malformed(format!("namespace prefix '{}' is not bound", prefix)))
    }

    fn close(&mut self, name: Option<&str>) -> Result<()> {
        let mut element = self
            .open
            .pop()
            .ok_or_else(|| XmlError::Malformed("unexpected end tag".to_string()))?;

        if let Some(name) = name
            && name != element.name
        {
            return Err(XmlError::Malformed(format!(
                "expected </{}>, found </{}>",
                element.name, name
            )));
        }

        if element.children.iter().any(|c| matches!(c, XmlNode::Element(_))) {
            element
                .children
                .retain(|c| !matches!(c, XmlNode::Text(text) if is_whitespace_text(text)));
        }

        match self.open.last_mut() {
            Some(parent) => parent.push_element(element),
            None => self.root = Some(element),
        }

        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.open.last_mut() {
            Some(parent) => {
                if let Some(XmlNode::Text(last)) = parent.children.last_mut() {
                    last.push_str(text);
                } else if !text.is_empty() {
                    parent.append_text(text);
                }
                Ok(())
            }
            None if is_whitespace_text(text) => Ok(()),
            None => Err(XmlError::Malformed(
                "text is not allowed outside the root element".to_string(),
            )),
        }
    }

    fn finish(self) -> Result<XmlElement> {
        if let Some(element) = self.open.last() {
            return Err(XmlError::Malformed(format!(
                "missing end tag for <{}>",
                element.name
            )));
        }

        self.root
            .ok_or_else(|| XmlError::Malformed("document has no root element".to_string()))
    }
}
