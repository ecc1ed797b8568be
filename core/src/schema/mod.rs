//! # Schema Facade
//!
//! The slice of JSON Schema that codecs consume: the instance type of a
//! parameter, its array item schema, and its property schemas.
//!
//! Schemas are resolved eagerly when the parameter specification is parsed
//! (see [`dialect`]), so a [`Schema`] is immutable and can be shared across
//! threads without any lazy caching.

pub mod dialect;
pub mod refs;

use crate::error::ParamResult;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::ops::BitOr;

/// A set of JSON instance types.
///
/// 2020-12 schemas may declare `type: ["string", "null"]`, so a schema type is
/// a union rather than a single kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InstanceType(u8);

impl InstanceType {
    /// `string`
    pub const STRING: Self = Self(1);
    /// `number`
    pub const NUMBER: Self = Self(1 << 1);
    /// `integer`
    pub const INTEGER: Self = Self(1 << 2);
    /// `boolean`
    pub const BOOLEAN: Self = Self(1 << 3);
    /// `null`
    pub const NULL: Self = Self(1 << 4);
    /// `array`
    pub const ARRAY: Self = Self(1 << 5);
    /// `object`
    pub const OBJECT: Self = Self(1 << 6);

    const NAMED: [(Self, &'static str); 7] = [
        (Self::STRING, "string"),
        (Self::NUMBER, "number"),
        (Self::INTEGER, "integer"),
        (Self::BOOLEAN, "boolean"),
        (Self::NULL, "null"),
        (Self::ARRAY, "array"),
        (Self::OBJECT, "object"),
    ];

    /// Scalar kinds a primitive codec can produce.
    pub const SCALARS: Self = Self(0b001_1111);

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Looks up a JSON Schema type keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(flag, _)| *flag)
    }

    /// Whether every flag of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share at least one flag.
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no flag is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether only scalar flags are set.
    pub fn is_scalar(self) -> bool {
        !self.is_empty() && self.0 & !Self::SCALARS.0 == 0
    }

    /// Names of the flags that are set, in declaration order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for InstanceType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        write!(f, "{}", names.join(" or "))
    }
}

impl fmt::Debug for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        write!(f, "InstanceType({})", names.join(" | "))
    }
}

/// A property schema keyed by a regular expression (`patternProperties`).
#[derive(Debug, Clone)]
pub struct PatternProperty {
    pattern: Regex,
    schema: Schema,
}

impl PatternProperty {
    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The schema applied to matching property names.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// A resolved schema node.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    instance_type: Option<InstanceType>,
    items: Option<Box<Schema>>,
    properties: IndexMap<String, Schema>,
    pattern_properties: Vec<PatternProperty>,
    additional_properties: Option<Box<Schema>>,
}

impl Schema {
    /// A schema declaring only an instance type.
    pub fn of(instance_type: InstanceType) -> Self {
        Self {
            instance_type: Some(instance_type),
            ..Self::default()
        }
    }

    /// Sets the array item schema.
    pub fn with_items(mut self, items: Schema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Adds a named property schema.
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Adds a pattern property schema.
    pub fn with_pattern_property(mut self, pattern: &str, schema: Schema) -> ParamResult<Self> {
        self.pattern_properties.push(PatternProperty {
            pattern: Regex::new(pattern)?,
            schema,
        });
        Ok(self)
    }

    /// Sets the schema applied to properties matched by neither
    /// `properties` nor `patternProperties`.
    pub fn with_additional_properties(mut self, schema: Schema) -> Self {
        self.additional_properties = Some(Box::new(schema));
        self
    }

    /// The declared instance type, `None` when the schema has no `type`.
    pub fn instance_type(&self) -> Option<InstanceType> {
        self.instance_type
    }

    /// The array item schema.
    pub fn items(&self) -> Option<&Schema> {
        self.items.as_deref()
    }

    /// Named property schemas, in declaration order.
    pub fn properties(&self) -> &IndexMap<String, Schema> {
        &self.properties
    }

    /// Pattern property schemas, in declaration order.
    pub fn pattern_properties(&self) -> &[PatternProperty] {
        &self.pattern_properties
    }

    /// The additional properties schema.
    pub fn additional_properties(&self) -> Option<&Schema> {
        self.additional_properties.as_deref()
    }

    /// Resolves the schema governing a property: named properties first,
    /// then the first matching pattern, then additional properties.
    pub fn property_schema(&self, name: &str) -> Option<&Schema> {
        if let Some(schema) = self.properties.get(name) {
            return Some(schema);
        }
        if let Some(pattern) = self
            .pattern_properties
            .iter()
            .find(|p| p.pattern.is_match(name))
        {
            return Some(&pattern.schema);
        }
        self.additional_properties()
    }

    /// The instance type of a property, `None` when nothing declares one.
    pub fn property_type(&self, name: &str) -> Option<InstanceType> {
        self.property_schema(name).and_then(Schema::instance_type)
    }

    /// The instance type of array items, `None` when undeclared.
    pub fn item_type(&self) -> Option<InstanceType> {
        self.items().and_then(Schema::instance_type)
    }

    /// Merges `overlay` on top of `self`; keywords present in `overlay` win.
    pub(crate) fn overlay(mut self, overlay: Schema) -> Self {
        if overlay.instance_type.is_some() {
            self.instance_type = overlay.instance_type;
        }
        if overlay.items.is_some() {
            self.items = overlay.items;
        }
        self.properties.extend(overlay.properties);
        self.pattern_properties.extend(overlay.pattern_properties);
        if overlay.additional_properties.is_some() {
            self.additional_properties = overlay.additional_properties;
        }
        self
    }
}
