//! # Schema Dialects
//!
//! Builds [`Schema`] nodes from the three schema flavours parameters use:
//!
//! - Swagger 2.0: no JSON Schema, just `type` / `items` on the parameter.
//! - OpenAPI 3.0: a Draft-05 flavoured subset (`nullable`, single `type`).
//! - OpenAPI 3.1 / 3.2: JSON Schema 2020-12 (`type` arrays, boolean schemas,
//!   `patternProperties`, `$ref` with sibling keywords).
//!
//! Resolution is eager and bounded: the parameter schema and its direct
//! `items` / property schemas are read, which is everything the codecs use.

use super::refs::resolve_ref;
use super::{InstanceType, Schema};
use crate::error::{ParamError, ParamResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Levels below the parameter schema that are resolved.
const NESTING_DEPTH: usize = 1;

/// Longest `$ref` chain followed before assuming a cycle.
const MAX_REF_HOPS: usize = 32;

/// Which JSON Schema flavour a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// OpenAPI 3.0 Schema Object (Draft-05 based).
    OpenApi30,
    /// JSON Schema 2020-12 (OpenAPI 3.1 and 3.2).
    Draft202012,
}

/// Legacy Swagger 2.0 array item declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swagger2Items {
    /// Item type (string, integer, ...).
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    /// Item format (int64, date-time, ...). Informational only.
    pub format: Option<String>,
    /// Nested item declaration for multi-dimensional arrays.
    pub items: Option<Box<Swagger2Items>>,
    /// Collection format of a nested array.
    #[serde(rename = "collectionFormat")]
    pub collection_format: Option<String>,
}

/// Builds a schema from Swagger 2.0 `type` / `items` fields.
pub fn read_swagger2(schema_type: &str, items: Option<&Swagger2Items>) -> ParamResult<Schema> {
    let instance_type = swagger2_type(schema_type)?;
    let mut schema = Schema::of(instance_type);

    if instance_type == InstanceType::ARRAY {
        let items = items.ok_or_else(|| {
            ParamError::Spec("Array parameters must declare 'items'".to_string())
        })?;
        let item_type = items.schema_type.as_deref().ok_or_else(|| {
            ParamError::Spec("Array 'items' must declare a 'type'".to_string())
        })?;
        schema = schema.with_items(Schema::of(swagger2_type(item_type)?));
    }
    Ok(schema)
}

fn swagger2_type(name: &str) -> ParamResult<InstanceType> {
    match name {
        "string" | "number" | "integer" | "boolean" | "array" => InstanceType::from_name(name)
            .ok_or_else(|| ParamError::Spec(format!("Unknown type '{}'", name))),
        "file" => Err(ParamError::Spec(
            "Parameters of type 'file' carry binary content and have no wire style".to_string(),
        )),
        other => Err(ParamError::Spec(format!(
            "Unknown type '{}'. Supported types: string, number, integer, boolean, array",
            other
        ))),
    }
}

/// Reads OpenAPI 3.x schemas, resolving `$ref` against a document.
#[derive(Debug, Clone, Copy)]
pub struct SchemaReader<'a> {
    dialect: Dialect,
    document: &'a JsonValue,
    self_uri: Option<&'a str>,
}

impl<'a> SchemaReader<'a> {
    /// Creates a reader resolving references inside `document`.
    pub fn new(dialect: Dialect, document: &'a JsonValue, self_uri: Option<&'a str>) -> Self {
        Self {
            dialect,
            document,
            self_uri,
        }
    }

    /// Reads a parameter schema.
    pub fn read(&self, value: &JsonValue) -> ParamResult<Schema> {
        self.read_node(value, NESTING_DEPTH, 0)
    }

    fn read_node(&self, value: &JsonValue, depth: usize, hops: usize) -> ParamResult<Schema> {
        let map = match value {
            JsonValue::Object(map) => map,
            JsonValue::Bool(_) if self.dialect == Dialect::Draft202012 => {
                return Ok(Schema::default())
            }
            _ => {
                return Err(ParamError::Spec(format!(
                    "Schema must be an object, found '{}'",
                    value
                )))
            }
        };

        let Some(reference) = map.get("$ref").and_then(JsonValue::as_str) else {
            return self.read_keywords(map, depth);
        };

        if hops >= MAX_REF_HOPS {
            return Err(ParamError::Spec(format!(
                "Reference '{}' exceeds {} hops; the chain is likely circular",
                reference, MAX_REF_HOPS
            )));
        }
        let target = resolve_ref(self.document, reference, self.self_uri)?;
        let resolved = self.read_node(target, depth, hops + 1)?;

        match self.dialect {
            // Siblings of `$ref` are ignored before 2020-12.
            Dialect::OpenApi30 => Ok(resolved),
            Dialect::Draft202012 => Ok(resolved.overlay(self.read_keywords(map, depth)?)),
        }
    }

    fn read_keywords(&self, map: &Map<String, JsonValue>, depth: usize) -> ParamResult<Schema> {
        let mut schema = match self.read_type(map)? {
            Some(instance_type) => Schema::of(instance_type),
            None => Schema::default(),
        };
        if depth == 0 {
            return Ok(schema);
        }

        if let Some(items) = map.get("items") {
            schema = schema.with_items(self.read_node(items, depth - 1, 0)?);
        }

        if let Some(properties) = map.get("properties").and_then(JsonValue::as_object) {
            for (name, property) in properties {
                schema = schema.with_property(name.clone(), self.read_node(property, depth - 1, 0)?);
            }
        }

        if self.dialect == Dialect::Draft202012 {
            if let Some(patterns) = map.get("patternProperties").and_then(JsonValue::as_object) {
                for (pattern, property) in patterns {
                    schema = schema
                        .with_pattern_property(pattern, self.read_node(property, depth - 1, 0)?)?;
                }
            }
        }

        match map.get("additionalProperties") {
            None | Some(JsonValue::Bool(false)) => {}
            Some(JsonValue::Bool(true)) => {
                schema = schema.with_additional_properties(Schema::default());
            }
            Some(additional) => {
                schema = schema.with_additional_properties(self.read_node(additional, depth - 1, 0)?);
            }
        }

        Ok(schema)
    }

    fn read_type(&self, map: &Map<String, JsonValue>) -> ParamResult<Option<InstanceType>> {
        let declared = match (map.get("type"), self.dialect) {
            (None, _) => None,
            (Some(JsonValue::String(name)), _) => Some(type_from_name(name)?),
            (Some(JsonValue::Array(names)), Dialect::Draft202012) => {
                let mut union = InstanceType::empty();
                for name in names {
                    let name = name.as_str().ok_or_else(|| {
                        ParamError::Spec(format!("Type entries must be strings, found '{}'", name))
                    })?;
                    union = union | type_from_name(name)?;
                }
                (!union.is_empty()).then_some(union)
            }
            (Some(other), Dialect::OpenApi30) => {
                return Err(ParamError::Spec(format!(
                    "Schema 'type' must be a single string in OpenAPI 3.0, found '{}'",
                    other
                )))
            }
            (Some(other), Dialect::Draft202012) => {
                return Err(ParamError::Spec(format!(
                    "Schema 'type' must be a string or an array of strings, found '{}'",
                    other
                )))
            }
        };

        let nullable = self.dialect == Dialect::OpenApi30
            && map.get("nullable").and_then(JsonValue::as_bool) == Some(true);
        Ok(match declared {
            Some(instance_type) if nullable => Some(instance_type | InstanceType::NULL),
            other => other,
        })
    }
}

fn type_from_name(name: &str) -> ParamResult<InstanceType> {
    InstanceType::from_name(name)
        .ok_or_else(|| ParamError::Spec(format!("Unknown schema type '{}'", name)))
}
