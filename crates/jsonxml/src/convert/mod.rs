//! The two conversion passes between [`JsonValue`](crate::JsonValue) and the XML tree.

mod to_json;
mod to_xml;

pub use to_json::xml_to_json;
pub use to_xml::json_value_to_xml;

pub(crate) use to_json::escape_json_string;
