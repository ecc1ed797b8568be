//! # Tokenizer
//!
//! Low-level helpers shared by every codec: percent encoding, a forward-only
//! literal cursor, and delimiter splitting.

use crate::error::{ParamError, ParamResult};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Everything except RFC 3986 unreserved characters is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// `COMPONENT` plus `.`, the label style's own delimiter.
const LABEL: &AsciiSet = &COMPONENT.add(b'.');

/// `COMPONENT` minus the RFC 3986 reserved set (`allowReserved: true`).
///
/// `&` and `,` stay escaped: they separate items and pairs in every query
/// style, so an unescaped one could not be read back.
const COMPONENT_ALLOW_RESERVED: &AsciiSet = &COMPONENT
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b';')
    .remove(b'=');

/// How values (and embedded parameter names) are escaped on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// RFC 3986 percent-encoding of everything but unreserved characters.
    #[default]
    Percent,
    /// `Percent` that also escapes `.` (label style).
    Label,
    /// Percent-encoding that leaves RFC 3986 reserved characters untouched,
    /// except the `&` and `,` delimiters.
    AllowReserved,
    /// Values pass through untouched.
    Raw,
}

impl Escaping {
    /// Encodes a value for the wire.
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Escaping::Percent => utf8_percent_encode(value, COMPONENT).into(),
            Escaping::Label => utf8_percent_encode(value, LABEL).into(),
            Escaping::AllowReserved => utf8_percent_encode(value, COMPONENT_ALLOW_RESERVED).into(),
            Escaping::Raw => Cow::Borrowed(value),
        }
    }

    /// Decodes a wire token.
    pub fn decode<'a>(&self, token: &'a str) -> ParamResult<Cow<'a, str>> {
        match self {
            Escaping::Raw => Ok(Cow::Borrowed(token)),
            Escaping::Percent | Escaping::Label | Escaping::AllowReserved => percent_decode(token),
        }
    }
}

/// Decodes `%XX` sequences, failing when the result is not UTF-8.
pub fn percent_decode(token: &str) -> ParamResult<Cow<'_, str>> {
    percent_decode_str(token).decode_utf8().map_err(|_| {
        ParamError::Parse(format!(
            "Value '{}' is not valid percent-encoded UTF-8",
            token
        ))
    })
}

/// Encodes with the default component set.
pub fn percent_encode(value: &str) -> Cow<'_, str> {
    Escaping::Percent.encode(value)
}

/// A forward-only scanner over a wire string.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// The unconsumed suffix.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Byte offset of the unconsumed suffix.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Asserts that the unconsumed suffix starts with `literal` and skips it.
    pub fn expect_literal(&mut self, literal: &str) -> ParamResult<()> {
        let rest = self.rest();
        if rest.starts_with(literal) {
            self.position += literal.len();
            return Ok(());
        }
        Err(ParamError::Parse(format!(
            "Expected '{}' at position {} but found '{}'",
            literal, self.position, rest
        )))
    }

    /// Consumes everything up to (not including) `delimiter`.
    pub fn take_until(&mut self, delimiter: &str) -> ParamResult<&'a str> {
        let rest = self.rest();
        match rest.find(delimiter) {
            Some(idx) => {
                self.position += idx;
                Ok(&rest[..idx])
            }
            None => Err(ParamError::Parse(format!(
                "Expected '{}' after position {} in '{}'",
                delimiter, self.position, self.input
            ))),
        }
    }

    /// Consumes and returns the rest of the input.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.position = self.input.len();
        rest
    }
}

/// Splits on a single designated separator. No nesting awareness.
pub fn split_delimited<'a>(input: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    input.split(separator)
}

/// Splits `key=value` at the first `=`.
pub fn split_key_value(token: &str) -> ParamResult<(&str, &str)> {
    token.split_once('=').ok_or_else(|| {
        ParamError::Parse(format!(
            "Expected '=' in '{}' to separate a key from its value",
            token
        ))
    })
}
