//! JSON text reading.
//!
//! [`parse_json`] turns text into a [`JsonValue`] without touching XML;
//! lowering the value into a tree is a separate pass in [`crate::convert`].

mod reader;
mod stream;
mod value;

pub use reader::{MAX_DEPTH, parse_json};
pub use value::JsonValue;
