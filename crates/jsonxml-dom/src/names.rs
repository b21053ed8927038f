//! XML name rules and small helpers shared by the tree, reader and writer.
//!
//! Names follow the XML 1.0 (fifth edition) `Name` production. Prefixes and
//! namespaced local names follow `NCName`, which is the same production
//! without the colon.

use crate::error::{Result, XmlError};

/// Namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Checks if a character may start an XML name (colon excluded).
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Checks if a character may appear after the first position of an XML name (colon excluded).
fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

fn check_name(name: &str, allow_colon: bool) -> Result<()> {
    let invalid = |reason: String| XmlError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| invalid("the empty string is not a valid name".to_string()))?;

    if !(is_name_start_char(first) || (allow_colon && first == ':')) {
        return Err(invalid(format!(
            "name cannot begin with the '{}' character, hexadecimal value {:#06X}",
            first, first as u32
        )));
    }

    for c in chars {
        if !(is_name_char(c) || (allow_colon && c == ':')) {
            return Err(invalid(format!(
                "the '{}' character, hexadecimal value {:#06X}, cannot be included in a name",
                c, c as u32
            )));
        }
    }

    Ok(())
}

/// Validates an element or attribute name against the XML `Name` production.
pub fn validate_name(name: &str) -> Result<()> {
    check_name(name, true)
}

/// Validates a prefix or local name against the `NCName` production.
pub fn validate_ncname(name: &str) -> Result<()> {
    check_name(name, false)
}

/// Returns true when `name` is a valid XML name.
pub fn is_valid_name(name: &str) -> bool {
    validate_name(name).is_ok()
}

/// Splits a qualified name into its optional prefix and local part.
///
/// Only the first colon separates the prefix; a leading or trailing colon
/// leaves the name unprefixed.
pub fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => (Some(prefix), local),
        _ => (None, name),
    }
}

/// Checks if text consists solely of XML whitespace.
pub fn is_whitespace_text(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\n' | '\r' | '\t'))
}
