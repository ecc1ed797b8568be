//! # Object Codec
//!
//! Key/value pairs with per-property types taken from the schema
//! (`properties`, then `patternProperties`, then `additionalProperties`,
//! defaulting to string).

use super::convert;
use super::ValueCodec;
use crate::error::{ParamError, ParamResult};
use crate::schema::Schema;
use crate::tokenizer::{split_delimited, split_key_value, Cursor, Escaping};
use serde_json::{Map, Value as JsonValue};

/// Wire layout of an object parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectLayout {
    /// `lead` + `k,v,k,v` with keys and values alternating around `separator`.
    Flat {
        /// Literal opening the value.
        lead: String,
        /// Literal between keys and values.
        separator: &'static str,
    },
    /// `lead` + `k=v` entries joined by `separator`.
    Entries {
        /// Literal opening the value.
        lead: String,
        /// Literal between entries.
        separator: &'static str,
    },
    /// `name[k]=v&name[k2]=v2`.
    DeepObject {
        /// The parameter name as it appears on the wire.
        name: String,
    },
    /// A style/explode combination that cannot carry an object.
    Unsupported(String),
}

/// Codec for object parameters.
#[derive(Debug, Clone)]
pub struct ObjectCodec {
    layout: ObjectLayout,
    schema: Schema,
    escaping: Escaping,
    includes_name: bool,
}

impl ObjectCodec {
    /// Binds a layout to the object schema used for property types.
    pub fn new(layout: ObjectLayout, schema: Schema, escaping: Escaping, includes_name: bool) -> Self {
        Self {
            layout,
            schema,
            escaping,
            includes_name,
        }
    }

    /// The wire layout.
    pub fn layout(&self) -> &ObjectLayout {
        &self.layout
    }

    fn insert(&self, object: &mut Map<String, JsonValue>, key: &str, value: &str) -> ParamResult<()> {
        let key = self.escaping.decode(key)?.into_owned();
        let value = self.escaping.decode(value)?;
        let converted = convert::to_json(&value, self.schema.property_type(&key))?;
        object.insert(key, converted);
        Ok(())
    }

    fn parse_flat(&self, wire: &str, lead: &str, separator: &str) -> ParamResult<Map<String, JsonValue>> {
        let mut cursor = Cursor::new(wire);
        cursor.expect_literal(lead)?;
        let elements: Vec<&str> = split_delimited(cursor.take_rest(), separator).collect();
        if elements.len() % 2 != 0 {
            return Err(ParamError::Parse(format!(
                "Expected an even number of key/value elements but found {} in '{}'",
                elements.len(),
                wire
            )));
        }

        let mut object = Map::new();
        for pair in elements.chunks(2) {
            self.insert(&mut object, pair[0], pair[1])?;
        }
        Ok(object)
    }

    fn parse_entries(&self, wire: &str, lead: &str, separator: &str) -> ParamResult<Map<String, JsonValue>> {
        let mut cursor = Cursor::new(wire);
        cursor.expect_literal(lead)?;

        let mut object = Map::new();
        for entry in split_delimited(cursor.take_rest(), separator) {
            let (key, value) = split_key_value(entry)?;
            self.insert(&mut object, key, value)?;
        }
        Ok(object)
    }

    fn parse_deep_object(&self, wire: &str, name: &str) -> ParamResult<Map<String, JsonValue>> {
        let open = format!("{}[", name);
        let mut object = Map::new();
        for segment in split_delimited(wire, "&") {
            let mut cursor = Cursor::new(segment);
            cursor.expect_literal(&open)?;
            let key = cursor.take_until("]")?;
            cursor.expect_literal("]=")?;
            self.insert(&mut object, key, cursor.take_rest())?;
        }
        Ok(object)
    }

    fn encoded_pairs(&self, object: &Map<String, JsonValue>) -> ParamResult<Vec<(String, String)>> {
        object
            .iter()
            .map(|(key, value)| {
                let token = convert::to_token(value)?;
                Ok((
                    self.escaping.encode(key).into_owned(),
                    self.escaping.encode(&token).into_owned(),
                ))
            })
            .collect()
    }
}

impl ValueCodec for ObjectCodec {
    fn try_parse(&self, wire: Option<&str>) -> ParamResult<Option<JsonValue>> {
        let Some(wire) = wire.filter(|w| !w.is_empty()) else {
            return Ok(None);
        };
        let object = match &self.layout {
            ObjectLayout::Flat { lead, separator } => self.parse_flat(wire, lead, separator)?,
            ObjectLayout::Entries { lead, separator } => self.parse_entries(wire, lead, separator)?,
            ObjectLayout::DeepObject { name } => self.parse_deep_object(wire, name)?,
            ObjectLayout::Unsupported(message) => {
                return Err(ParamError::Unsupported(message.clone()))
            }
        };
        Ok(Some(JsonValue::Object(object)))
    }

    fn serialize(&self, instance: Option<&JsonValue>) -> ParamResult<Option<String>> {
        let Some(instance) = instance.filter(|value| !value.is_null()) else {
            return Ok(None);
        };
        if let ObjectLayout::Unsupported(message) = &self.layout {
            return Err(ParamError::Unsupported(message.clone()));
        }
        let JsonValue::Object(object) = instance else {
            return Err(ParamError::Unsupported(format!(
                "Expected an object but found '{}'",
                instance
            )));
        };
        if object.is_empty() {
            return Ok(None);
        }

        let pairs = self.encoded_pairs(object)?;
        let wire = match &self.layout {
            ObjectLayout::Flat { lead, separator } => {
                let elements: Vec<String> = pairs
                    .into_iter()
                    .flat_map(|(key, value)| [key, value])
                    .collect();
                format!("{}{}", lead, elements.join(*separator))
            }
            ObjectLayout::Entries { lead, separator } => {
                let entries: Vec<String> = pairs
                    .into_iter()
                    .map(|(key, value)| format!("{}={}", key, value))
                    .collect();
                format!("{}{}", lead, entries.join(*separator))
            }
            ObjectLayout::DeepObject { name } => pairs
                .into_iter()
                .map(|(key, value)| format!("{}[{}]={}", name, key, value))
                .collect::<Vec<_>>()
                .join("&"),
            ObjectLayout::Unsupported(message) => {
                return Err(ParamError::Unsupported(message.clone()))
            }
        };
        Ok(Some(wire))
    }

    fn value_includes_parameter_name(&self) -> bool {
        self.includes_name
    }
}
