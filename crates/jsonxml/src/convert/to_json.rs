//! Writing an XML element tree as compact JSON text.
//!
//! The writer never fails. Shapes that have no exact JSON counterpart are
//! written on a best-effort basis. An element tagged `Object` is always
//! written as an object, even when its only content is text.

use std::borrow::Cow;

use jsonxml_dom::{NamespaceDecl, XmlAttribute, XmlElement, XmlNode};

use crate::metadata::{ATTRIBUTE_MARKER, ElementMetadata, TEXT_PROPERTY, ValueType};
use crate::options::ConvertOptions;

/// Write `element` as a JSON document.
///
/// The root element's own name is not written; its content is the document.
pub fn xml_to_json(element: &XmlElement, options: &ConvertOptions) -> String {
    let mut writer = JsonWriter {
        namespace: &options.metadata_namespace,
        out: String::new(),
    };
    writer.write_value(element, false, true);
    writer.out
}

/// One JSON-visible piece of an element, in output order.
enum Member<'a> {
    Namespace(&'a NamespaceDecl),
    Attribute(&'a XmlAttribute),
    Node(&'a XmlNode),
}

/// Namespace declarations, then attributes, then child nodes, with the
/// metadata namespace left out.
fn members<'a>(element: &'a XmlElement, namespace: &str) -> Vec<Member<'a>> {
    let namespaces = element
        .namespaces()
        .iter()
        .filter(|d| d.uri() != namespace)
        .map(Member::Namespace);
    let attributes = element
        .attributes()
        .iter()
        .filter(|a| a.namespace() != Some(namespace))
        .map(Member::Attribute);
    let nodes = element.children().iter().map(Member::Node);

    namespaces.chain(attributes).chain(nodes).collect()
}

/// The name shared by two or more members that are all elements.
fn shared_element_name<'m>(members: &'m [Member<'_>]) -> Option<&'m str> {
    if members.len() < 2 {
        return None;
    }

    let mut names = members.iter().map(|m| match m {
        Member::Node(XmlNode::Element(e)) => Some(e.name()),
        _ => None,
    });
    let first = names.next()??;
    names.all(|name| name == Some(first)).then_some(first)
}

struct JsonWriter<'a> {
    namespace: &'a str,
    out: String,
}

impl JsonWriter<'_> {
    fn write_value(&mut self, element: &XmlElement, is_array_item: bool, is_root: bool) {
        let metadata = ElementMetadata::read(element, self.namespace);
        let members = members(element, self.namespace);

        if !is_array_item && !is_root {
            self.write_name(element.name());
        }

        if members.is_empty() {
            self.write_empty(&metadata);
            return;
        }

        if metadata.value_type == Some(ValueType::Array) {
            self.out.push('[');
            self.write_members(&members, &metadata, true);
            self.out.push(']');
            return;
        }

        if metadata.value_type == Some(ValueType::Object) {
            self.out.push('{');
            self.write_members(&members, &metadata, false);
            self.out.push('}');
            return;
        }

        if let Some(name) = shared_element_name(&members) {
            self.out.push('{');
            self.write_name(name);
            self.out.push('[');
            self.write_members(&members, &metadata, true);
            self.out.push_str("]}");
            return;
        }

        if let [Member::Node(XmlNode::Text(text))] = members.as_slice() {
            self.write_text(text, &metadata);
            return;
        }

        self.out.push('{');
        self.write_members(&members, &metadata, false);
        self.out.push('}');
    }

    fn write_members(&mut self, members: &[Member<'_>], metadata: &ElementMetadata, as_array: bool) {
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }

            match member {
                Member::Namespace(decl) => self.write_attribute(&decl.attribute_name(), decl.uri()),
                Member::Attribute(attr) => self.write_attribute(&attr.qualified_name(), attr.value()),
                Member::Node(XmlNode::Element(child)) => self.write_value(child, as_array, false),
                Member::Node(XmlNode::Text(text)) => {
                    if !as_array {
                        self.write_name(TEXT_PROPERTY);
                    }
                    self.write_text(text, metadata);
                }
            }
        }
    }

    fn write_empty(&mut self, metadata: &ElementMetadata) {
        let literal = match metadata.value_type {
            Some(ValueType::Object) => "{}",
            Some(ValueType::Array) => "[]",
            _ if metadata.nullable => "null",
            // Nothing sensible to write for an empty typed literal.
            Some(ValueType::Number | ValueType::Boolean) => "null",
            None => "\"\"",
        };
        self.out.push_str(literal);
    }

    fn write_name(&mut self, name: &str) {
        self.write_string(name);
        self.out.push(':');
    }

    fn write_attribute(&mut self, name: &str, value: &str) {
        self.out.push('"');
        self.out.push(ATTRIBUTE_MARKER);
        self.out.push_str(&escape_json_string(name));
        self.out.push_str("\":");
        self.write_string(value);
    }

    fn write_text(&mut self, text: &str, metadata: &ElementMetadata) {
        if metadata.is_literal() {
            self.out.push_str(text);
        } else {
            self.write_string(text);
        }
    }

    fn write_string(&mut self, text: &str) {
        self.out.push('"');
        self.out.push_str(&escape_json_string(text));
        self.out.push('"');
    }
}

/// Escapes `\`, `"`, backspace, form feed, newline, carriage return and tab.
///
/// Every other character, non-ASCII included, is written as is.
pub(crate) fn escape_json_string(text: &str) -> Cow<'_, str> {
    if !text
        .chars()
        .any(|c| matches!(c, '\\' | '"' | '\u{8}' | '\u{c}' | '\n' | '\r' | '\t'))
    {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{METADATA_NAMESPACE, METADATA_PREFIX};
    use jsonxml_dom::{Result, from_xml_str};

    fn json(xml: &str) -> Result<String> {
        Ok(xml_to_json(&from_xml_str(xml)?, &ConvertOptions::default()))
    }

    #[test]
    fn test_escape_json_string() {
        assert!(matches!(escape_json_string("plain ä"), Cow::Borrowed(_)));
        assert_eq!(
            escape_json_string("\" \n \t \u{8} \u{c} \r \\ /"),
            r#"\" \n \t \b \f \r \\ /"#
        );
    }

    #[test]
    fn test_root_forms() -> Result<()> {
        assert_eq!(json("<Root/>")?, "null");
        assert_eq!(json("<Root>Contents</Root>")?, "\"Contents\"");
        assert_eq!(json("<Root><P>1</P></Root>")?, r#"{"P":"1"}"#);
        Ok(())
    }

    #[test]
    fn test_empty_elements() -> Result<()> {
        let xml = concat!(
            r#"<Root xmlns:json="http://www.integround.com/json">"#,
            r#"<E1/><E2 json:Nullable="false"/><E3 json:Nullable="FALSE"></E3><E4 json:Nullable="true"/>"#,
            r#"<E5 json:ValueType="Object"/><E6 json:ValueType="Array"/>"#,
            r#"<E7 json:ValueType="Number" json:Nullable="false"/>"#,
            r#"</Root>"#
        );
        assert_eq!(
            json(xml)?,
            r#"{"E1":null,"E2":"","E3":"","E4":null,"E5":{},"E6":[],"E7":null}"#
        );
        Ok(())
    }

    #[test]
    fn test_repeated_siblings_collapse() -> Result<()> {
        assert_eq!(
            json("<Root><P1>10</P1><P1>20</P1><P1><E1>10</E1><E2/></P1></Root>")?,
            r#"{"P1":["10","20",{"E1":"10","E2":null}]}"#
        );
        assert_eq!(
            json("<Root><Prop><P1>10</P1><P1>20</P1><P1>30</P1></Prop></Root>")?,
            r#"{"Prop":{"P1":["10","20","30"]}}"#
        );
        Ok(())
    }

    #[test]
    fn test_mixed_siblings_do_not_collapse() -> Result<()> {
        assert_eq!(
            json("<Root><P>1</P><Q>2</Q><P>3</P></Root>")?,
            r#"{"P":"1","Q":"2","P":"3"}"#
        );
        assert_eq!(
            json(r#"<Root a="x"><P>1</P><P>2</P></Root>"#)?,
            r#"{"@a":"x","P":"1","P":"2"}"#
        );
        Ok(())
    }

    #[test]
    fn test_array_tag_ignores_item_names() -> Result<()> {
        let xml = concat!(
            r#"<Root xmlns:json="http://www.integround.com/json" json:ValueType="Array">"#,
            r#"<A json:ValueType="Number">1</A><B>x</B></Root>"#
        );
        assert_eq!(json(xml)?, r#"[1,"x"]"#);
        Ok(())
    }

    #[test]
    fn test_object_tag_keeps_object_form() -> Result<()> {
        let xml = r#"<Root xmlns:json="http://www.integround.com/json" json:ValueType="Object">a</Root>"#;
        assert_eq!(json(xml)?, r##"{"#text":"a"}"##);

        let xml = concat!(
            r#"<Root xmlns:json="http://www.integround.com/json">"#,
            r#"<E json:ValueType="Object"><P>1</P><P>2</P></E></Root>"#
        );
        assert_eq!(json(xml)?, r#"{"E":{"P":"1","P":"2"}}"#);
        Ok(())
    }

    #[test]
    fn test_attributes_and_declarations() -> Result<()> {
        let xml = concat!(
            r#"<Root xmlns="http://www.test.com/" xmlns:p="urn:p" xmlns:json="http://www.integround.com/json" "#,
            r#"a="1" p:b="2" json:ValueType="Object"><E/></Root>"#
        );
        assert_eq!(
            json(xml)?,
            r#"{"@xmlns":"http://www.test.com/","@xmlns:p":"urn:p","@a":"1","@p:b":"2","E":null}"#
        );
        Ok(())
    }

    #[test]
    fn test_mixed_content_text() -> Result<()> {
        assert_eq!(
            json("<Root>a<E>1</E>b</Root>")?,
            r##"{"#text":"a","E":"1","#text":"b"}"##
        );
        Ok(())
    }

    #[test]
    fn test_literal_text_is_unquoted() -> Result<()> {
        let mut root = XmlElement::new("Json")?;
        let mut n = XmlElement::new("N")?;
        n.set_namespaced_attribute(METADATA_PREFIX, "ValueType", METADATA_NAMESPACE, "Number")?;
        n.append_text("1e3");
        root.push_element(n);

        assert_eq!(xml_to_json(&root, &ConvertOptions::default()), r#"{"N":1e3}"#);
        Ok(())
    }

    #[test]
    fn test_custom_metadata_namespace() -> Result<()> {
        let options = ConvertOptions {
            metadata_namespace: "urn:meta".to_string(),
            ..Default::default()
        };
        let root = from_xml_str(r#"<R xmlns:m="urn:meta"><E m:Nullable="false"/></R>"#)?;
        assert_eq!(xml_to_json(&root, &options), r#"{"E":""}"#);

        // With the default options the attribute is ordinary.
        assert_eq!(
            xml_to_json(&root, &ConvertOptions::default()),
            r#"{"@xmlns:m":"urn:meta","E":{"@m:Nullable":"false"}}"#
        );
        Ok(())
    }
}
