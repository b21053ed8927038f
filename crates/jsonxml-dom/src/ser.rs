//! Serialization of an element tree to compact XML markup.
//!
//! Elements without children are written as `<E/>`. An element whose only
//! child is an empty text node is written as `<E></E>`. Namespace declarations
//! precede attributes. No whitespace is inserted.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Result, XmlError};
use crate::tree::{XmlElement, XmlNode};

/// Serialize an element and its subtree to an XML string.
///
/// # Examples
///
/// ```
/// use jsonxml_dom::{XmlElement, to_xml_string};
///
/// let mut root = XmlElement::new("Json")?;
/// root.set_attribute("a", "x < y")?;
/// assert_eq!(to_xml_string(&root)?, r#"<Json a="x &lt; y"/>"#);
/// # Ok::<(), jsonxml_dom::XmlError>(())
/// ```
pub fn to_xml_string(element: &XmlElement) -> Result<String> {
    let buffer = to_xml_vec(element)?;
    String::from_utf8(buffer).map_err(|e| XmlError::Io(e.to_string()))
}

/// Serialize an element and its subtree to XML bytes.
pub fn to_xml_vec(element: &XmlElement) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(element, &mut buffer)?;
    Ok(buffer)
}

/// Serialize an element and its subtree to a writer.
pub fn to_xml_writer<W: Write>(element: &XmlElement, writer: W) -> Result<()> {
    let mut writer = Writer::new(writer);
    write_element(&mut writer, element)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name());

    for decl in element.namespaces() {
        let key = decl.attribute_name();
        let value = escape_attribute(decl.uri());
        start.push_attribute(Attribute::from((key.as_bytes(), value.as_bytes())));
    }

    for attr in element.attributes() {
        let key = attr.qualified_name();
        let value = escape_attribute(attr.value());
        start.push_attribute(Attribute::from((key.as_bytes(), value.as_bytes())));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;

    for child in element.children() {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) if text.is_empty() => {}
            XmlNode::Text(text) => {
                let escaped = escape_text(text);
                writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new(element.name())))?;

    Ok(())
}

/// Escapes character data.
///
/// `"` and `'` are left as is; carriage returns and control characters become
/// character references so a reader sees them unchanged.
pub(crate) fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\t' | '\n' => escaped.push(c),
            c if (c as u32) < 0x20 => push_char_ref(&mut escaped, c),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escapes an attribute value for a double-quoted attribute.
pub(crate) fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c if (c as u32) < 0x20 => push_char_ref(&mut escaped, c),
            c => escaped.push(c),
        }
    }
    escaped
}

fn push_char_ref(out: &mut String, c: char) {
    out.push_str(&format!("&#x{:X};", c as u32));
}
