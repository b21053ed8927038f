//! # jsonxml-dom
//!
//! A small, owned XML element tree used as the target and source of the
//! JSON ↔ XML converter.
//!
//! The tree knows about exactly what the converter needs:
//!
//! - **Elements** with a validated name, ordered attributes and ordered children
//! - **Text nodes**, where an empty text node is distinct from having no children
//! - **Attributes**, optionally bound to a namespace URI and written with a prefix
//! - **Namespace declarations** (`xmlns`, `xmlns:prefix`), stored apart from attributes
//!
//! Markup I/O is built on `quick-xml`: [`to_xml_string`] writes compact markup and
//! [`from_xml_str`] reads markup back into a tree. Comments, processing
//! instructions and doctypes are not represented.
//!
//! ## Example
//!
//! ```
//! use jsonxml_dom::{XmlElement, from_xml_str, to_xml_string};
//!
//! let mut root = XmlElement::new("Root")?;
//! let mut child = XmlElement::new("P")?;
//! child.append_text("10");
//! root.push_element(child);
//!
//! let markup = to_xml_string(&root)?;
//! assert_eq!(markup, "<Root><P>10</P></Root>");
//! assert_eq!(from_xml_str(&markup)?, root);
//! # Ok::<(), jsonxml_dom::XmlError>(())
//! ```

pub mod de;
pub mod error;
pub mod names;
pub mod ser;
pub mod tree;

pub use de::{MAX_DEPTH, from_xml_slice, from_xml_str};
pub use error::{Result, XmlError};
pub use names::{XML_NAMESPACE, is_valid_name, validate_name, validate_ncname};
pub use ser::{to_xml_string, to_xml_vec, to_xml_writer};
pub use tree::{NamespaceDecl, XmlAttribute, XmlElement, XmlNode};
