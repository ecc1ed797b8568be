//! # Swagger 2.0
//!
//! No styles: the location alone decides whether the value carries `name=`,
//! and arrays are joined per `collectionFormat`. Values are never escaped.

use super::{RawParameter, SpecVersion};
use crate::codec::dispatch::build_swagger2;
use crate::codec::{Binding, Codec};
use crate::error::{ParamError, ParamResult};
use crate::models::{CollectionFormat, Location, ParameterSpec, Style};
use crate::schema::dialect::{read_swagger2, Dialect, SchemaReader};
use crate::schema::refs::document_self_uri;
use crate::schema::InstanceType;
use crate::tokenizer::Escaping;
use serde_json::Value as JsonValue;

/// Validates a Swagger 2.0 Parameter Object.
pub fn parse(raw: RawParameter, document: &JsonValue) -> ParamResult<ParameterSpec> {
    let location = match Location::from_name(&raw.parameter_in) {
        Some(Location::Cookie) | None => {
            return Err(ParamError::Spec(format!(
                "Unsupported location '{}' for parameter '{}' in Swagger 2.0",
                raw.parameter_in, raw.name
            )))
        }
        Some(location) => location,
    };

    if location == Location::Body {
        return parse_body(raw, document);
    }

    let schema_type = raw.schema_type.as_deref().ok_or_else(|| {
        ParamError::Spec(format!("Parameter '{}' must declare a 'type'", raw.name))
    })?;
    let schema = read_swagger2(schema_type, raw.items.as_ref())?;

    let collection_format = if schema.instance_type() == Some(InstanceType::ARRAY) {
        Some(read_collection_format(&raw, location)?)
    } else {
        None
    };
    let style = match location {
        Location::Path | Location::Header => Style::Simple,
        _ => Style::Form,
    };

    Ok(ParameterSpec::from_parts(
        SpecVersion::V2_0,
        raw.name,
        location,
        style,
        collection_format == Some(CollectionFormat::Multi),
        false,
        collection_format,
        schema,
    ))
}

fn parse_body(raw: RawParameter, document: &JsonValue) -> ParamResult<ParameterSpec> {
    let schema = raw.schema.as_ref().ok_or_else(|| {
        ParamError::Spec(format!("Body parameter '{}' must declare a 'schema'", raw.name))
    })?;
    let schema =
        SchemaReader::new(Dialect::OpenApi30, document, document_self_uri(document)).read(schema)?;
    Ok(ParameterSpec::from_parts(
        SpecVersion::V2_0,
        raw.name,
        Location::Body,
        Style::Form,
        false,
        false,
        None,
        schema,
    ))
}

fn read_collection_format(raw: &RawParameter, location: Location) -> ParamResult<CollectionFormat> {
    let format = match raw.collection_format.as_deref() {
        None => CollectionFormat::default(),
        Some(name) => CollectionFormat::from_name(name).ok_or_else(|| {
            ParamError::Spec(format!(
                "Unknown collectionFormat '{}'. Supported formats: csv, ssv, tsv, pipes, multi",
                name
            ))
        })?,
    };
    if format == CollectionFormat::Multi && !matches!(location, Location::Query | Location::FormData) {
        return Err(ParamError::Spec(format!(
            "collectionFormat 'multi' is only valid for query or formData parameters, not {} parameter '{}'",
            location, raw.name
        )));
    }
    Ok(format)
}

/// Builds the codec for a Swagger 2.0 parameter.
pub fn build_codec(spec: &ParameterSpec) -> ParamResult<Codec> {
    if spec.location() == Location::Body {
        return Err(ParamError::Spec(format!(
            "Body parameter '{}' is a request body and has no wire style",
            spec.name()
        )));
    }
    let binding = Binding {
        name: spec.name(),
        style: spec.style(),
        explode: spec.explode(),
        escaping: Escaping::Raw,
        schema: spec.schema(),
    };
    build_swagger2(
        &binding,
        spec.location(),
        spec.collection_format().unwrap_or_default(),
    )
}
