//! Conversion options.
//!
//! The defaults reproduce the classic mapping: a `Json` root element,
//! `Value` array items and the `json` metadata prefix. Options are
//! serde-derived so a host can embed them in its own configuration file.

use jsonxml_dom::{validate_name, validate_ncname};
use serde::{Deserialize, Serialize};

use crate::metadata::{ITEM_NAME, METADATA_NAMESPACE, METADATA_PREFIX, ROOT_NAME};

/// Names and flags that control both conversion directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Name of the document root element.
    pub root_name: String,

    /// Name of the element created for each array item.
    pub item_name: String,

    /// Namespace of the reserved `ValueType` and `Nullable` attributes.
    pub metadata_namespace: String,

    /// Prefix declared on the root for the metadata namespace.
    pub metadata_prefix: String,

    /// Tag empty strings with `Nullable=false` so they survive serialized markup.
    pub mark_empty_strings: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            root_name: ROOT_NAME.to_string(),
            item_name: ITEM_NAME.to_string(),
            metadata_namespace: METADATA_NAMESPACE.to_string(),
            metadata_prefix: METADATA_PREFIX.to_string(),
            mark_empty_strings: false,
        }
    }
}

impl ConvertOptions {
    /// Validates the options and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = validate_name(&self.root_name) {
            errors.push(format!("Root name is not usable: {}", e));
        }

        if let Err(e) = validate_name(&self.item_name) {
            errors.push(format!("Item name is not usable: {}", e));
        }

        if self.metadata_namespace.is_empty() {
            errors.push("Metadata namespace cannot be empty".to_string());
        }

        if let Err(e) = validate_ncname(&self.metadata_prefix) {
            errors.push(format!("Metadata prefix is not usable: {}", e));
        } else if self.metadata_prefix.eq_ignore_ascii_case("xmlns") {
            errors.push("Metadata prefix cannot be 'xmlns'".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
