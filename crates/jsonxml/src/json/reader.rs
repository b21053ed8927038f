//! Recursive-descent JSON reader.
//!
//! Reads a whole document into a [`JsonValue`]. The document must be an
//! object or an array, and nothing but whitespace may follow it.

use tracing::trace;

use crate::error::{ConvertError, Position, Result};
use crate::json::stream::CharStream;
use crate::json::value::JsonValue;

/// Objects and arrays nested deeper than this are rejected.
pub const MAX_DEPTH: usize = 256;

const OBJECT_DELIMITERS: &[char] = &[',', '}'];
const ARRAY_DELIMITERS: &[char] = &[',', ']'];

/// Parse JSON text into a [`JsonValue`].
///
/// # Examples
///
/// ```
/// use jsonxml::{JsonValue, parse_json};
///
/// let value = parse_json(r#"{"a": [1, true, null]}"#)?;
/// assert_eq!(value.to_string(), r#"{"a":[1,true,null]}"#);
/// assert!(matches!(value, JsonValue::Object(_)));
/// # Ok::<(), jsonxml::ConvertError>(())
/// ```
pub fn parse_json(text: &str) -> Result<JsonValue> {
    let mut reader = JsonReader {
        stream: CharStream::new(text),
        depth: 0,
    };
    let value = reader.read_document()?;
    reader.finish()?;
    Ok(value)
}

struct JsonReader<'a> {
    stream: CharStream<'a>,
    depth: usize,
}

impl JsonReader<'_> {
    fn read_document(&mut self) -> Result<JsonValue> {
        match self.stream.peek(true) {
            Some('{') => self.read_object(),
            Some('[') => self.read_array(),
            found => Err(ConvertError::ExpectedObjectOrArray {
                found: found.into(),
                position: self.stream.position(),
            }),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self.stream.peek(true) {
            None => Ok(()),
            found => Err(ConvertError::TrailingCharacters {
                found: found.into(),
                position: self.stream.position(),
            }),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ConvertError::NestingTooDeep {
                limit: MAX_DEPTH,
                position: self.stream.position(),
            });
        }
        Ok(())
    }

    fn read_object(&mut self) -> Result<JsonValue> {
        self.enter()?;
        self.stream.read_required(&['{'], true)?;

        let mut properties: Vec<(String, JsonValue)> = Vec::new();
        if self.stream.peek(true) == Some('}') {
            self.stream.next_char();
            self.depth -= 1;
            return Ok(JsonValue::Object(properties));
        }

        loop {
            self.stream.read_required(&['"'], true)?;
            let name_position = self.stream.position();
            let name = self.read_string()?;

            if name.chars().all(char::is_whitespace) {
                return Err(ConvertError::EmptyPropertyName {
                    position: name_position,
                });
            }
            if name.chars().any(char::is_whitespace) {
                return Err(ConvertError::WhitespaceInPropertyName {
                    name,
                    position: name_position,
                });
            }
            self.stream.read_required(&['"'], false)?;

            if properties.iter().any(|(existing, _)| *existing == name) {
                return Err(ConvertError::DuplicatePropertyName {
                    name,
                    position: name_position,
                });
            }

            self.stream.read_required(&[':'], true)?;
            trace!(property = %name, "Reading property value");
            let value = self.read_value(OBJECT_DELIMITERS)?;
            properties.push((name, value));

            if self.stream.read_required(OBJECT_DELIMITERS, true)? == '}' {
                break;
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Object(properties))
    }

    fn read_array(&mut self) -> Result<JsonValue> {
        self.enter()?;
        self.stream.read_required(&['['], true)?;

        let mut items = Vec::new();
        if self.stream.peek(true) == Some(']') {
            self.stream.next_char();
            self.depth -= 1;
            return Ok(JsonValue::Array(items));
        }

        loop {
            items.push(self.read_value(ARRAY_DELIMITERS)?);

            if self.stream.read_required(ARRAY_DELIMITERS, true)? == ']' {
                break;
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Array(items))
    }

    fn read_value(&mut self, delimiters: &[char]) -> Result<JsonValue> {
        match self.stream.peek(true) {
            None => Err(ConvertError::UnexpectedEndOfInput {
                expected: "a value".to_string(),
                position: self.stream.position(),
            }),
            Some('{') => self.read_object(),
            Some('[') => self.read_array(),
            Some('"') => {
                self.stream.next_char();
                let text = self.read_string()?;
                self.stream.read_required(&['"'], false)?;
                Ok(JsonValue::String(text))
            }
            Some(_) => self.read_literal(delimiters),
        }
    }

    /// Reads string content up to, but not including, the closing quote.
    fn read_string(&mut self) -> Result<String> {
        let mut text = String::new();
        // A high surrogate waiting for its low half, with the digits that encoded it.
        let mut pending: Option<(u16, String)> = None;

        loop {
            let position = self.stream.position();
            let c = match self.stream.peek(false) {
                None => return Err(ConvertError::UnterminatedString { position }),
                Some(c) => c,
            };

            if c != '\\' {
                take_lone_surrogate(&mut pending, position)?;
                if c == '"' {
                    return Ok(text);
                }
                self.stream.next_char();
                text.push(c);
                continue;
            }

            self.stream.next_char();
            let escape = match self.stream.next_char() {
                None => {
                    return Err(ConvertError::UnterminatedString {
                        position: self.stream.position(),
                    });
                }
                Some(escape) => escape,
            };

            let decoded = match escape {
                'b' => '\u{8}',
                'f' => '\u{c}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                '"' | '\\' | '/' => escape,
                'u' => {
                    let (unit, digits) = self.read_code_unit(position)?;
                    match unit {
                        0xD800..=0xDBFF => {
                            take_lone_surrogate(&mut pending, position)?;
                            pending = Some((unit, digits));
                            continue;
                        }
                        0xDC00..=0xDFFF => match pending.take() {
                            Some((high, _)) => combine_surrogates(high, unit),
                            None => {
                                return Err(ConvertError::InvalidUnicodeEscape { digits, position });
                            }
                        },
                        _ => {
                            take_lone_surrogate(&mut pending, position)?;
                            // Every unit outside the surrogate range is a scalar value.
                            char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
                        }
                    }
                }
                other => {
                    return Err(ConvertError::UnknownEscapeSequence {
                        escape: other,
                        position,
                    });
                }
            };

            if escape != 'u' {
                take_lone_surrogate(&mut pending, position)?;
            }
            text.push(decoded);
        }
    }

    /// Reads the four characters after `\u` as one UTF-16 code unit.
    fn read_code_unit(&mut self, position: Position) -> Result<(u16, String)> {
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            match self.stream.next_char() {
                Some(c) => digits.push(c),
                None => {
                    return Err(ConvertError::UnexpectedEndOfInput {
                        expected: "four hex digits after '\\u'".to_string(),
                        position: self.stream.position(),
                    });
                }
            }
        }

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConvertError::InvalidUnicodeEscape { digits, position });
        }

        match u16::from_str_radix(&digits, 16) {
            Ok(unit) => Ok((unit, digits)),
            Err(_) => Err(ConvertError::InvalidUnicodeEscape { digits, position }),
        }
    }

    /// Reads a bare token: `true`, `false`, `null` or a number.
    fn read_literal(&mut self, delimiters: &[char]) -> Result<JsonValue> {
        let position = self.stream.position();
        let mut literal = String::new();
        let mut reached_end = false;

        loop {
            match self.stream.peek(false) {
                None => {
                    reached_end = true;
                    break;
                }
                Some(c) if c.is_whitespace() || delimiters.contains(&c) => break,
                Some(c) => {
                    self.stream.next_char();
                    literal.push(c);
                }
            }

            if let Some(keyword) = match_keyword(&literal) {
                return Ok(keyword);
            }
        }

        if is_json_number(&literal) {
            return Ok(JsonValue::Number(literal));
        }

        if reached_end {
            return Err(ConvertError::UnexpectedEndOfInput {
                expected: "a boolean, numeric or null value".to_string(),
                position: self.stream.position(),
            });
        }

        Err(ConvertError::InvalidLiteral { literal, position })
    }
}

fn take_lone_surrogate(
    pending: &mut Option<(u16, String)>,
    position: Position,
) -> Result<()> {
    match pending.take() {
        Some((_, digits)) => Err(ConvertError::InvalidUnicodeEscape { digits, position }),
        None => Ok(()),
    }
}

fn combine_surrogates(high: u16, low: u16) -> char {
    let scalar = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Case-insensitive keyword match, keeping the literal spelling.
fn match_keyword(literal: &str) -> Option<JsonValue> {
    if !matches!(literal.len(), 4 | 5) {
        return None;
    }

    if literal.eq_ignore_ascii_case("true") || literal.eq_ignore_ascii_case("false") {
        Some(JsonValue::Boolean(literal.to_string()))
    } else if literal.eq_ignore_ascii_case("null") {
        Some(JsonValue::Null)
    } else {
        None
    }
}

/// A float-parseable literal bounded by digits: `1`, `-0.5`, `2e10`.
///
/// The digit bounds reject `.5`, `5.` and `-.5`, which a float parser accepts.
fn is_json_number(literal: &str) -> bool {
    let starts_with_digit = matches!(
        literal.as_bytes(),
        [b'0'..=b'9', ..] | [b'-', b'0'..=b'9', ..]
    );
    let ends_with_digit = literal.as_bytes().last().is_some_and(u8::is_ascii_digit);

    starts_with_digit && ends_with_digit && literal.parse::<f64>().is_ok()
}
