//! # OpenAPI 3.1
//!
//! Named styles over JSON Schema 2020-12 schemas. Values are percent-encoded
//! unless a query parameter sets `allowReserved`.
//!
//! | Location | Styles | Default |
//! |---|---|---|
//! | path | matrix, label, simple | simple |
//! | query | form, spaceDelimited, pipeDelimited, deepObject | form |
//! | header | simple | simple |
//! | cookie | form | form |
//!
//! The same rules serve 3.0 (with its own schema dialect) and are extended by
//! 3.2.

use super::{RawParameter, SpecVersion};
use crate::codec::dispatch::build_styled;
use crate::codec::{Binding, Codec};
use crate::error::{ParamError, ParamResult};
use crate::models::{Location, ParameterSpec, Style};
use crate::schema::dialect::{Dialect, SchemaReader};
use crate::schema::refs::document_self_uri;
use crate::tokenizer::Escaping;
use serde_json::Value as JsonValue;

/// What distinguishes one 3.x minor version from another.
#[derive(Debug, Clone, Copy)]
pub struct Rules {
    /// The version recorded on the resulting spec.
    pub version: SpecVersion,
    /// Schema flavour.
    pub dialect: Dialect,
    /// Styles allowed per location; empty for locations the version lacks.
    pub allowed_styles: fn(Location) -> &'static [Style],
}

/// The 3.1 rule set.
pub const RULES: Rules = Rules {
    version: SpecVersion::V3_1,
    dialect: Dialect::Draft202012,
    allowed_styles,
};

/// Styles a 3.1 location accepts.
pub fn allowed_styles(location: Location) -> &'static [Style] {
    match location {
        Location::Path => &[Style::Matrix, Style::Label, Style::Simple],
        Location::Query => &[
            Style::Form,
            Style::SpaceDelimited,
            Style::PipeDelimited,
            Style::DeepObject,
        ],
        Location::Header => &[Style::Simple],
        Location::Cookie => &[Style::Form],
        Location::FormData | Location::Body => &[],
    }
}

/// `simple` for path and header, `form` for query and cookie.
pub fn default_style(location: Location) -> Style {
    match location {
        Location::Path | Location::Header => Style::Simple,
        Location::Query | Location::Cookie | Location::FormData | Location::Body => Style::Form,
    }
}

/// Validates a 3.1 Parameter Object.
pub fn parse(raw: RawParameter, document: &JsonValue) -> ParamResult<ParameterSpec> {
    parse_with(&RULES, raw, document)
}

/// Validates a 3.x Parameter Object against `rules`.
pub fn parse_with(rules: &Rules, raw: RawParameter, document: &JsonValue) -> ParamResult<ParameterSpec> {
    let location = read_location(rules, &raw)?;

    if raw.content.is_some() {
        return Err(ParamError::Spec(format!(
            "Parameter '{}' uses 'content'; only 'schema' parameters have a wire style",
            raw.name
        )));
    }
    let schema = raw.schema.as_ref().ok_or_else(|| {
        ParamError::Spec(format!("Parameter '{}' must declare a 'schema'", raw.name))
    })?;

    let style = match raw.style.as_deref() {
        None => default_style(location),
        Some(name) => Style::from_name(name)
            .ok_or_else(|| ParamError::Spec(format!("Unknown style '{}'", name)))?,
    };
    let allowed = (rules.allowed_styles)(location);
    if !allowed.contains(&style) {
        let names: Vec<&str> = allowed.iter().map(Style::name).collect();
        return Err(ParamError::Spec(format!(
            "Style '{}' is not allowed for {} parameter '{}' in OpenAPI {}. Allowed styles: {}",
            style,
            location,
            raw.name,
            rules.version,
            names.join(", ")
        )));
    }

    let schema = SchemaReader::new(rules.dialect, document, document_self_uri(document)).read(schema)?;

    Ok(ParameterSpec::from_parts(
        rules.version,
        raw.name,
        location,
        style,
        raw.explode.unwrap_or_else(|| style.default_explode()),
        raw.allow_reserved.unwrap_or(false),
        None,
        schema,
    ))
}

fn read_location(rules: &Rules, raw: &RawParameter) -> ParamResult<Location> {
    if raw.parameter_in == "querystring" {
        return Err(ParamError::Spec(format!(
            "Parameter '{}' is in 'querystring'; the whole query string is content-serialized and has no wire style",
            raw.name
        )));
    }
    Location::from_name(&raw.parameter_in)
        .filter(|location| !(rules.allowed_styles)(*location).is_empty())
        .ok_or_else(|| {
            ParamError::Spec(format!(
                "Unsupported location '{}' for parameter '{}' in OpenAPI {}",
                raw.parameter_in, raw.name, rules.version
            ))
        })
}

/// Percent-encoding, relaxed to reserved characters for `allowReserved` query parameters.
pub fn escaping(spec: &ParameterSpec) -> Escaping {
    if spec.location() == Location::Query && spec.allow_reserved() {
        Escaping::AllowReserved
    } else {
        Escaping::Percent
    }
}

/// Builds the codec for a 3.1 parameter.
pub fn build_codec(spec: &ParameterSpec) -> ParamResult<Codec> {
    build_with_escaping(spec, escaping(spec))
}

pub(crate) fn build_with_escaping(spec: &ParameterSpec, escaping: Escaping) -> ParamResult<Codec> {
    build_styled(&Binding {
        name: spec.name(),
        style: spec.style(),
        explode: spec.explode(),
        escaping,
        schema: spec.schema(),
    })
}
