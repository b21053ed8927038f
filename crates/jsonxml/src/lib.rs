//! # jsonxml
//!
//! Converts JSON text to an annotated XML element tree and back.
//!
//! ## Features
//!
//! - **Round-trip safe**: value kinds that XML cannot express on its own
//!   (numbers, booleans, empty objects and arrays, empty strings) are recorded
//!   in reserved attributes, so `JSON → XML → JSON` returns the original text
//!   for compact input.
//! - **Positioned diagnostics**: malformed JSON fails with a [`ConvertError`]
//!   naming the offending token and its line and column.
//! - **Two passes**: [`parse_json`] builds a [`JsonValue`]; [`json_value_to_xml`]
//!   lowers it into an [`XmlElement`]. Either pass can be used on its own.
//!
//! ## JSON ↔ XML Mapping
//!
//! Reserved attributes live in `http://www.integround.com/json`, declared on
//! the root as `json` only when used.
//!
//! | JSON | XML |
//! |------|-----|
//! | `{"P":"text"}` | `<Json><P>text</P></Json>` |
//! | `{"P":""}` | `<Json><P></P></Json>` |
//! | `{"P":null}` | `<Json><P/></Json>` |
//! | `{"P":10}` | `<P json:ValueType="Number">10</P>` |
//! | `{"P":true}` | `<P json:ValueType="Boolean">true</P>` |
//! | `{"P":{}}` | `<P json:ValueType="Object"/>` |
//! | `{"P":["a","b"]}` | `<P json:ValueType="Array"><Value>a</Value><Value>b</Value></P>` |
//! | `["a"]` | `<Json json:ValueType="Array"><Value>a</Value></Json>` |
//! | `{"@a":"v"}` | `<Json a="v"/>` |
//! | `{"@xmlns":"http://x/"}` | `<Json xmlns="http://x/"/>` |
//!
//! Going back, an element with no children is `null` unless tagged, and two or
//! more same-named sibling elements become an array even without a tag.
//!
//! ## Example
//!
//! ```
//! use jsonxml::{convert_from_xml, convert_to_xml, to_xml_string};
//!
//! let json = r#"{"Prop1":true,"Prop2":[],"Prop3":null}"#;
//! let xml = convert_to_xml(json)?;
//!
//! assert_eq!(
//!     to_xml_string(&xml)?,
//!     concat!(
//!         r#"<Json xmlns:json="http://www.integround.com/json">"#,
//!         r#"<Prop1 json:ValueType="Boolean">true</Prop1>"#,
//!         r#"<Prop2 json:ValueType="Array"/><Prop3/></Json>"#,
//!     )
//! );
//! assert_eq!(convert_from_xml(&xml), json);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod convert;
pub mod error;
pub mod json;
pub mod metadata;
pub mod options;

use tracing::debug;

pub use convert::{json_value_to_xml, xml_to_json};
pub use error::{ConvertError, ErrorKind, Found, Position, Result};
pub use json::{JsonValue, parse_json};
pub use metadata::ValueType;
pub use options::ConvertOptions;

// The tree type and markup I/O, so callers need only this crate.
pub use jsonxml_dom::{XmlElement, XmlError, XmlNode, from_xml_str, to_xml_string};

/// Convert JSON text to an XML tree using the default options.
pub fn convert_to_xml(json: &str) -> Result<XmlElement> {
    convert_to_xml_with(json, &ConvertOptions::default())
}

/// Convert JSON text to an XML tree.
///
/// The text is parsed completely before any XML is built, so a syntax error
/// is reported even when an earlier property name is not a valid XML name.
pub fn convert_to_xml_with(json: &str, options: &ConvertOptions) -> Result<XmlElement> {
    debug!(bytes = json.len(), root = %options.root_name, "Converting JSON to XML");

    let value = parse_json(json)?;
    let root = json_value_to_xml(&value, options)?;

    debug!(children = root.children().len(), "Built XML tree");
    Ok(root)
}

/// Convert an XML element to JSON text using the default options.
pub fn convert_from_xml(element: &XmlElement) -> String {
    convert_from_xml_with(element, &ConvertOptions::default())
}

/// Convert an XML element to compact JSON text.
pub fn convert_from_xml_with(element: &XmlElement, options: &ConvertOptions) -> String {
    debug!(root = %element.name(), "Converting XML to JSON");

    let json = xml_to_json(element, options);

    debug!(bytes = json.len(), "Wrote JSON");
    json
}
