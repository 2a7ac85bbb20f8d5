// src/doc/escape.rs

//! Printable labels for byte symbols.
//!
//! Every byte value gets a distinct printable label so that symbol-keyed
//! documents survive a text transport:
//!
//! | byte                     | label            |
//! |--------------------------|------------------|
//! | `0x20`                   | `[space]`        |
//! | `\`                      | `\\`             |
//! | `"`                      | `\"`             |
//! | LF, TAB, CR, BS, FF      | `\n` `\t` `\r` `\b` `\f` |
//! | other `< 0x20`, `0x7f`   | `\u00XX`         |
//! | `0x80..=0xff`            | `\xXX`           |
//! | other printable ASCII    | the character    |
//!
//! Hex digits are written lower-case and accepted in either case.

use std::borrow::Cow;

use thiserror::Error;

pub const SPACE_LABEL: &str = "[space]";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EscapeError {
    #[error("Empty symbol label")]
    Empty,

    #[error("Unknown escape sequence: {0}")]
    UnknownEscape(String),

    #[error("Invalid hex digits in escape: {0}")]
    InvalidHex(String),

    #[error("Label does not name a single byte: {0}")]
    NotASymbol(String),
}

/// Label for one byte.
pub fn escape_symbol(symbol: u8) -> Cow<'static, str> {
    match symbol {
        b' ' => Cow::Borrowed(SPACE_LABEL),
        b'\\' => Cow::Borrowed("\\\\"),
        b'"' => Cow::Borrowed("\\\""),
        b'\n' => Cow::Borrowed("\\n"),
        b'\t' => Cow::Borrowed("\\t"),
        b'\r' => Cow::Borrowed("\\r"),
        0x08 => Cow::Borrowed("\\b"),
        0x0c => Cow::Borrowed("\\f"),
        0x00..=0x1f | 0x7f => Cow::Owned(format!("\\u{:04x}", symbol)),
        0x80..=0xff => Cow::Owned(format!("\\x{:02x}", symbol)),
        printable => Cow::Owned((printable as char).to_string()),
    }
}

/// Parses a label produced by [`escape_symbol`] back into its byte.
pub fn unescape_symbol(label: &str) -> Result<u8, EscapeError> {
    if label.is_empty() {
        return Err(EscapeError::Empty);
    }
    if label == SPACE_LABEL {
        return Ok(b' ');
    }

    if let Some(rest) = label.strip_prefix('\\') {
        return match rest {
            "\\" => Ok(b'\\'),
            "\"" => Ok(b'"'),
            "n" => Ok(b'\n'),
            "t" => Ok(b'\t'),
            "r" => Ok(b'\r'),
            "b" => Ok(0x08),
            "f" => Ok(0x0c),
            _ if rest.starts_with('u') && rest.len() == 5 => {
                let value = parse_hex(label, &rest[1..])?;
                if value < 0x20 || value == 0x7f {
                    Ok(value)
                } else {
                    Err(EscapeError::NotASymbol(label.to_owned()))
                }
            }
            _ if rest.starts_with('x') && rest.len() == 3 => {
                let value = parse_hex(label, &rest[1..])?;
                if value >= 0x80 {
                    Ok(value)
                } else {
                    Err(EscapeError::NotASymbol(label.to_owned()))
                }
            }
            _ => Err(EscapeError::UnknownEscape(label.to_owned())),
        };
    }

    match label.as_bytes() {
        [byte] if byte.is_ascii_graphic() && *byte != b'\\' && *byte != b'"' => Ok(*byte),
        _ => Err(EscapeError::NotASymbol(label.to_owned())),
    }
}

fn parse_hex(label: &str, digits: &str) -> Result<u8, EscapeError> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EscapeError::InvalidHex(label.to_owned()));
    }
    u16::from_str_radix(digits, 16)
        .ok()
        .and_then(|value| u8::try_from(value).ok())
        .ok_or_else(|| EscapeError::InvalidHex(label.to_owned()))
}
