//! # Parameter Codecs
//!
//! Converts between style-encoded wire strings and JSON values.
//!
//! - **convert**: scalar token <-> JSON leaf conversion.
//! - **primitive** / **array** / **object**: per-shape codecs.
//! - **cookie**: the OAS 3.2 `cookie` style layouts.
//! - **dispatch**: picks a shape and layout for a parameter.

pub mod array;
pub mod convert;
pub mod cookie;
pub mod dispatch;
pub mod object;
pub mod primitive;

pub use array::{ArrayCodec, ArrayLayout};
pub use dispatch::Binding;
pub use object::{ObjectCodec, ObjectLayout};
pub use primitive::{PrimitiveCodec, PrimitiveLayout};

use crate::error::ParamResult;
use serde_json::Value as JsonValue;
use std::fmt;

/// The capability shared by every codec.
///
/// Codecs hold no mutable state; one instance can be reused across calls and
/// threads.
pub trait ValueCodec {
    /// Parses a wire value. `None` (parameter absent) parses to `Ok(None)`.
    fn try_parse(&self, wire: Option<&str>) -> ParamResult<Option<JsonValue>>;

    /// Serializes an instance. `None` and JSON `null` serialize to `Ok(None)`,
    /// meaning the parameter is omitted.
    fn serialize(&self, instance: Option<&JsonValue>) -> ParamResult<Option<String>>;

    /// Whether the wire form already embeds the parameter name, so callers
    /// must not prepend `name=` themselves.
    fn value_includes_parameter_name(&self) -> bool;
}

/// The JSON shape a codec produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// string, number, integer, boolean or null.
    Primitive,
    /// array of primitives.
    Array,
    /// object with primitive properties.
    Object,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Primitive => "primitive",
            Shape::Array => "array",
            Shape::Object => "object",
        })
    }
}

/// A codec bound to one parameter.
#[derive(Debug, Clone)]
pub enum Codec {
    /// Scalar parameter.
    Primitive(PrimitiveCodec),
    /// Array parameter.
    Array(ArrayCodec),
    /// Object parameter.
    Object(ObjectCodec),
}

impl Codec {
    /// The JSON shape this codec produces.
    pub fn shape(&self) -> Shape {
        match self {
            Codec::Primitive(_) => Shape::Primitive,
            Codec::Array(_) => Shape::Array,
            Codec::Object(_) => Shape::Object,
        }
    }

    fn inner(&self) -> &dyn ValueCodec {
        match self {
            Codec::Primitive(codec) => codec,
            Codec::Array(codec) => codec,
            Codec::Object(codec) => codec,
        }
    }
}

impl ValueCodec for Codec {
    fn try_parse(&self, wire: Option<&str>) -> ParamResult<Option<JsonValue>> {
        let result = self.inner().try_parse(wire);
        if let Err(err) = &result {
            tracing::trace!(shape = %self.shape(), error = %err, "Failed to parse parameter value");
        }
        result
    }

    fn serialize(&self, instance: Option<&JsonValue>) -> ParamResult<Option<String>> {
        let result = self.inner().serialize(instance);
        if let Err(err) = &result {
            tracing::trace!(shape = %self.shape(), error = %err, "Failed to serialize parameter value");
        }
        result
    }

    fn value_includes_parameter_name(&self) -> bool {
        self.inner().value_includes_parameter_name()
    }
}
