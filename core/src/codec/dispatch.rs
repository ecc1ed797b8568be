//! # Shape Dispatcher
//!
//! Resolves a parameter's JSON shape from its schema type and looks up the
//! wire layout for `(shape, style, explode)`.
//!
//! The tables are exhaustive matches so every style has an explicit row for
//! every shape; combinations that cannot be expressed map to an `Unsupported`
//! layout whose codec reports a fixed message on use.

use super::cookie;
use super::{ArrayCodec, ArrayLayout, Codec, ObjectCodec, ObjectLayout, PrimitiveCodec, PrimitiveLayout, Shape};
use crate::error::{ParamError, ParamResult};
use crate::models::{CollectionFormat, Location, Style};
use crate::schema::{InstanceType, Schema};
use crate::tokenizer::Escaping;

/// Everything a codec is bound to at construction time.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    /// Parameter name.
    pub name: &'a str,
    /// Resolved style.
    pub style: Style,
    /// Resolved explode flag.
    pub explode: bool,
    /// Escaping applied to values and the embedded name.
    pub escaping: Escaping,
    /// Parameter schema.
    pub schema: &'a Schema,
}

/// The name-bearing literals of a parameter, escaped for the wire.
#[derive(Debug, Clone)]
pub struct Leads {
    name: String,
}

impl Leads {
    /// Escapes `name` once for every lead built from it.
    pub fn new(name: &str, escaping: Escaping) -> Self {
        Self {
            name: escaping.encode(name).into_owned(),
        }
    }

    /// The escaped name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `name=`
    pub fn key(&self) -> String {
        format!("{}=", self.name)
    }

    /// `;name=`
    pub fn matrix(&self) -> String {
        format!(";{}=", self.name)
    }
}

/// Picks the shape for a schema type.
///
/// Without any `type` the style decides: `deepObject` implies an object,
/// everything else an array.
pub fn resolve_shape(instance_type: Option<InstanceType>, style: Style) -> ParamResult<Shape> {
    let Some(ty) = instance_type.filter(|ty| !ty.is_empty()) else {
        return Ok(match style {
            Style::DeepObject => Shape::Object,
            _ => Shape::Array,
        });
    };

    let array = ty.contains(InstanceType::ARRAY);
    let object = ty.contains(InstanceType::OBJECT);
    match (array, object) {
        (true, true) => Err(ParamError::Unsupported(format!(
            "Unsupported type '{}': a parameter cannot be both an array and an object",
            ty
        ))),
        (true, false) => Ok(Shape::Array),
        (false, true) => Ok(Shape::Object),
        (false, false) if ty.is_scalar() => Ok(Shape::Primitive),
        (false, false) => Err(ParamError::Unsupported(format!("Unsupported type '{}'", ty))),
    }
}

/// Primitive layout for an OAS 3.x style.
pub fn primitive_layout(style: Style, leads: &Leads) -> (PrimitiveLayout, bool) {
    let prefixed = |lead: String, includes_name| (PrimitiveLayout::Prefixed { lead }, includes_name);
    match style {
        Style::Simple => prefixed(String::new(), false),
        Style::Label => prefixed(".".to_string(), false),
        Style::Matrix => prefixed(leads.matrix(), true),
        Style::Form => prefixed(leads.key(), true),
        Style::Cookie => cookie::primitive_layout(leads),
        Style::SpaceDelimited | Style::PipeDelimited | Style::DeepObject => (
            PrimitiveLayout::Unsupported(format!("{} style not supported for primitives", style)),
            false,
        ),
    }
}

/// Array layout for an OAS 3.x style.
pub fn array_layout(style: Style, explode: bool, leads: &Leads) -> (ArrayLayout, bool) {
    match (style, explode) {
        (Style::Simple, _) => (ArrayLayout::joined("", ","), false),
        (Style::Label, _) => (ArrayLayout::joined(".", "."), false),
        (Style::Matrix, false) => (ArrayLayout::joined(leads.matrix(), ","), false),
        (Style::Matrix, true) => (ArrayLayout::repeated(";", leads.key(), ";"), true),
        (Style::Form, false) => (ArrayLayout::joined(leads.key(), ","), true),
        (Style::SpaceDelimited, false) => (ArrayLayout::joined(leads.key(), "%20"), true),
        (Style::PipeDelimited, false) => (ArrayLayout::joined(leads.key(), "|"), true),
        (Style::Form | Style::SpaceDelimited | Style::PipeDelimited, true) => {
            (ArrayLayout::repeated("", leads.key(), "&"), true)
        }
        (Style::Cookie, explode) => cookie::array_layout(explode, leads),
        (Style::DeepObject, _) => (
            ArrayLayout::Unsupported(format!("{} style not supported for arrays", style)),
            false,
        ),
    }
}

/// Object layout for an OAS 3.x style.
pub fn object_layout(style: Style, explode: bool, leads: &Leads) -> (ObjectLayout, bool) {
    let flat = |lead: String, separator| ObjectLayout::Flat { lead, separator };
    let entries = |lead: &str, separator| ObjectLayout::Entries {
        lead: lead.to_string(),
        separator,
    };
    match (style, explode) {
        (Style::Simple, false) => (flat(String::new(), ","), false),
        (Style::Simple, true) => (entries("", ","), false),
        (Style::Label, false) => (flat(".".to_string(), "."), false),
        (Style::Label, true) => (entries(".", "."), false),
        (Style::Matrix, false) => (flat(leads.matrix(), ","), true),
        (Style::Matrix, true) => (entries(";", ";"), false),
        (Style::Form, false) => (flat(leads.key(), ","), true),
        (Style::SpaceDelimited, false) => (flat(leads.key(), "%20"), true),
        (Style::PipeDelimited, false) => (flat(leads.key(), "|"), true),
        (Style::Form | Style::SpaceDelimited | Style::PipeDelimited, true) => (
            ObjectLayout::Unsupported(format!(
                "{} style with explode not supported for objects as the parameter name cannot be determined",
                style
            )),
            false,
        ),
        (Style::DeepObject, true) => (
            ObjectLayout::DeepObject {
                name: leads.name().to_string(),
            },
            true,
        ),
        (Style::DeepObject, false) => (
            ObjectLayout::Unsupported(
                "deepObject style without explode not supported for objects".to_string(),
            ),
            false,
        ),
        (Style::Cookie, explode) => cookie::object_layout(explode, leads),
    }
}

/// Narrows percent-encoding to the label set so `.` inside values cannot be
/// mistaken for the label delimiter.
pub fn style_escaping(style: Style, escaping: Escaping) -> Escaping {
    match (style, escaping) {
        (Style::Label, Escaping::Percent) => Escaping::Label,
        (_, escaping) => escaping,
    }
}

/// Builds the codec for an OAS 3.x parameter.
pub fn build_styled(binding: &Binding<'_>) -> ParamResult<Codec> {
    let schema = binding.schema;
    let shape = resolve_shape(schema.instance_type(), binding.style)?;
    let escaping = style_escaping(binding.style, binding.escaping);
    let leads = Leads::new(binding.name, escaping);

    let codec = match shape {
        Shape::Primitive => {
            let (layout, includes_name) = primitive_layout(binding.style, &leads);
            Codec::Primitive(PrimitiveCodec::new(
                layout,
                schema.instance_type(),
                escaping,
                includes_name,
            ))
        }
        Shape::Array => {
            let item_type = scalar_item_type(binding)?;
            let (layout, includes_name) = array_layout(binding.style, binding.explode, &leads);
            Codec::Array(ArrayCodec::new(layout, item_type, escaping, includes_name))
        }
        Shape::Object => {
            let (layout, includes_name) = object_layout(binding.style, binding.explode, &leads);
            Codec::Object(ObjectCodec::new(
                layout,
                schema.clone(),
                escaping,
                includes_name,
            ))
        }
    };

    tracing::debug!(
        parameter = binding.name,
        style = %binding.style,
        explode = binding.explode,
        shape = %shape,
        escaping = ?escaping,
        "Built parameter codec"
    );
    Ok(codec)
}

/// Builds the codec for a Swagger 2.0 parameter.
///
/// Swagger 2.0 has no styles: path and header values are bare, query and
/// formData values carry `name=`, and arrays follow `collectionFormat`.
pub fn build_swagger2(
    binding: &Binding<'_>,
    location: Location,
    collection_format: CollectionFormat,
) -> ParamResult<Codec> {
    let schema = binding.schema;
    let leads = Leads::new(binding.name, binding.escaping);
    let key_value = matches!(location, Location::Query | Location::FormData);
    let lead = if key_value { leads.key() } else { String::new() };

    let codec = match resolve_shape(schema.instance_type(), binding.style)? {
        Shape::Primitive => Codec::Primitive(PrimitiveCodec::new(
            PrimitiveLayout::Prefixed { lead },
            schema.instance_type(),
            binding.escaping,
            key_value,
        )),
        Shape::Array => {
            let item_type = scalar_item_type(binding)?;
            let layout = match collection_format.separator() {
                Some(separator) => ArrayLayout::joined(lead, separator),
                None => ArrayLayout::repeated("", leads.key(), "&"),
            };
            let includes_name = key_value || collection_format == CollectionFormat::Multi;
            Codec::Array(ArrayCodec::new(layout, item_type, binding.escaping, includes_name))
        }
        Shape::Object => {
            return Err(ParamError::Unsupported(format!(
                "Swagger 2.0 parameter '{}' cannot be an object outside of 'body'",
                binding.name
            )))
        }
    };

    tracing::debug!(
        parameter = binding.name,
        location = %location,
        collection_format = %collection_format,
        shape = %codec.shape(),
        "Built Swagger 2.0 parameter codec"
    );
    Ok(codec)
}

fn scalar_item_type(binding: &Binding<'_>) -> ParamResult<Option<InstanceType>> {
    match binding.schema.item_type() {
        Some(ty) if !ty.is_empty() && !ty.is_scalar() => Err(ParamError::Unsupported(format!(
            "Array parameter '{}' has items of type '{}'; only primitive items are supported",
            binding.name, ty
        ))),
        other => Ok(other),
    }
}
