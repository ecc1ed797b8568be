//! # Array Codec
//!
//! Every array style is described by three literals:
//!
//! - a `lead` opening the value (`.`, `;`, `name=`, `;name=` or nothing),
//! - an `item_prefix` repeated before each item (`name=` when exploded into
//!   repeated pairs, otherwise nothing),
//! - a `separator` between items (`,`, `.`, `;`, `&`, `|`, `%20`, `; `, ...).
//!
//! Items are converted with the primitive converter using the item type.

use super::convert;
use super::ValueCodec;
use crate::error::{ParamError, ParamResult};
use crate::schema::InstanceType;
use crate::tokenizer::{split_delimited, Cursor, Escaping};
use serde_json::Value as JsonValue;

/// Wire layout of an array parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLayout {
    /// `lead` + `item_prefix item` joined by `separator`.
    Delimited {
        /// Literal opening the value.
        lead: String,
        /// Literal preceding every item.
        item_prefix: String,
        /// Literal between items.
        separator: &'static str,
    },
    /// A style that cannot carry an array.
    Unsupported(String),
}

impl ArrayLayout {
    /// Items joined by `separator` after `lead`.
    pub fn joined(lead: impl Into<String>, separator: &'static str) -> Self {
        ArrayLayout::Delimited {
            lead: lead.into(),
            item_prefix: String::new(),
            separator,
        }
    }

    /// Items each preceded by `item_prefix`, joined by `separator` after `lead`.
    pub fn repeated(
        lead: impl Into<String>,
        item_prefix: impl Into<String>,
        separator: &'static str,
    ) -> Self {
        ArrayLayout::Delimited {
            lead: lead.into(),
            item_prefix: item_prefix.into(),
            separator,
        }
    }
}

/// Codec for array parameters.
#[derive(Debug, Clone)]
pub struct ArrayCodec {
    layout: ArrayLayout,
    item_type: Option<InstanceType>,
    escaping: Escaping,
    includes_name: bool,
}

impl ArrayCodec {
    /// Binds a layout to an item type. Items without a declared type are strings.
    pub fn new(
        layout: ArrayLayout,
        item_type: Option<InstanceType>,
        escaping: Escaping,
        includes_name: bool,
    ) -> Self {
        Self {
            layout,
            item_type,
            escaping,
            includes_name,
        }
    }

    /// The wire layout.
    pub fn layout(&self) -> &ArrayLayout {
        &self.layout
    }

    fn parse_item(&self, token: &str, item_prefix: &str) -> ParamResult<JsonValue> {
        let mut cursor = Cursor::new(token);
        cursor.expect_literal(item_prefix)?;
        let decoded = self.escaping.decode(cursor.take_rest())?;
        convert::to_json(&decoded, self.item_type)
    }
}

impl ValueCodec for ArrayCodec {
    fn try_parse(&self, wire: Option<&str>) -> ParamResult<Option<JsonValue>> {
        let Some(wire) = wire.filter(|w| !w.is_empty()) else {
            return Ok(None);
        };
        let (lead, item_prefix, separator) = match &self.layout {
            ArrayLayout::Delimited {
                lead,
                item_prefix,
                separator,
            } => (lead, item_prefix, *separator),
            ArrayLayout::Unsupported(message) => {
                return Err(ParamError::Unsupported(message.clone()))
            }
        };

        let mut cursor = Cursor::new(wire);
        cursor.expect_literal(lead)?;
        let items = split_delimited(cursor.take_rest(), separator)
            .map(|token| self.parse_item(token, item_prefix))
            .collect::<ParamResult<Vec<_>>>()?;
        Ok(Some(JsonValue::Array(items)))
    }

    fn serialize(&self, instance: Option<&JsonValue>) -> ParamResult<Option<String>> {
        let Some(instance) = instance.filter(|value| !value.is_null()) else {
            return Ok(None);
        };
        let (lead, item_prefix, separator) = match &self.layout {
            ArrayLayout::Delimited {
                lead,
                item_prefix,
                separator,
            } => (lead, item_prefix, *separator),
            ArrayLayout::Unsupported(message) => {
                return Err(ParamError::Unsupported(message.clone()))
            }
        };
        let JsonValue::Array(items) = instance else {
            return Err(ParamError::Unsupported(format!(
                "Expected an array but found '{}'",
                instance
            )));
        };
        if items.is_empty() {
            return Ok(None);
        }

        let tokens = items
            .iter()
            .map(|item| {
                let token = convert::to_token(item)?;
                Ok(format!("{}{}", item_prefix, self.escaping.encode(&token)))
            })
            .collect::<ParamResult<Vec<_>>>()?;
        Ok(Some(format!("{}{}", lead, tokens.join(separator))))
    }

    fn value_includes_parameter_name(&self) -> bool {
        self.includes_name
    }
}
