#![deny(missing_docs)]

//! # Version Adapters
//!
//! Each OpenAPI version has its own location/style compatibility table,
//! default inference and schema dialect. The adapters validate a raw
//! parameter object into a [`ParameterSpec`] and pick the codec family.
//!
//! - **v2**: Swagger 2.0 (`type` / `items` / `collectionFormat`, no styles).
//! - **v3_0**: maps onto the 3.1 rules with the 3.0 schema dialect.
//! - **v3_1**: named styles, percent escaping, JSON Schema 2020-12.
//! - **v3_2**: 3.1 plus the `cookie` style and raw header values.

pub mod v2;
pub mod v3_0;
pub mod v3_1;
pub mod v3_2;

use crate::codec::Codec;
use crate::error::{ParamError, ParamResult};
use crate::models::ParameterSpec;
use crate::schema::dialect::Swagger2Items;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// The OpenAPI versions parameters can be read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecVersion {
    /// Swagger 2.0.
    V2_0,
    /// OpenAPI 3.0.x.
    V3_0,
    /// OpenAPI 3.1.x.
    V3_1,
    /// OpenAPI 3.2.x.
    V3_2,
}

impl SpecVersion {
    /// Canonical `major.minor` form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecVersion::V2_0 => "2.0",
            SpecVersion::V3_0 => "3.0",
            SpecVersion::V3_1 => "3.1",
            SpecVersion::V3_2 => "3.2",
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecVersion {
    type Err = ParamError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let minor_line = |prefix: &str| {
            version == prefix
                || version
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .is_some_and(|patch| !patch.is_empty())
        };
        match version {
            "2" | "2.0" => Ok(SpecVersion::V2_0),
            "3" => Ok(SpecVersion::V3_0),
            _ if minor_line("3.0") => Ok(SpecVersion::V3_0),
            _ if minor_line("3.1") => Ok(SpecVersion::V3_1),
            _ if minor_line("3.2") => Ok(SpecVersion::V3_2),
            _ => Err(ParamError::Spec(format!(
                "Unsupported OpenAPI version '{}'. Supported versions: 2.0, 3.0, 3.1, 3.2",
                version
            ))),
        }
    }
}

/// A local shim for a Parameter Object, covering the fields of every version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawParameter {
    /// Name of the parameter.
    pub name: String,
    /// Location of the parameter (path, query, header, cookie, formData, body, querystring).
    #[serde(rename = "in")]
    pub parameter_in: String,
    /// Serialization style (OAS 3.x).
    pub style: Option<String>,
    /// Explode modifier (OAS 3.x).
    pub explode: Option<bool>,
    /// Allow reserved characters (OAS 3.x query parameters).
    #[serde(rename = "allowReserved", default)]
    pub allow_reserved: Option<bool>,
    /// Schema definition (OAS 3.x, Swagger 2.0 body).
    pub schema: Option<JsonValue>,
    /// Content map (OAS 3.x). Mutually exclusive with `schema`.
    pub content: Option<JsonValue>,
    /// Legacy Swagger 2.0 primitive type.
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    /// Legacy Swagger 2.0 array item declaration.
    pub items: Option<Swagger2Items>,
    /// Collection format (Swagger 2.0).
    #[serde(rename = "collectionFormat")]
    pub collection_format: Option<String>,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
}

impl RawParameter {
    /// Deserializes a Parameter Object.
    pub fn from_json(parameter: &JsonValue) -> ParamResult<Self> {
        let raw = RawParameter::deserialize(parameter)?;
        if raw.name.is_empty() {
            return Err(ParamError::Spec("Parameter name must not be empty".to_string()));
        }
        Ok(raw)
    }
}

impl ParameterSpec {
    /// Validates a Parameter Object for `version`, resolving `$ref` inside its
    /// schema against the parameter object itself.
    pub fn parse(version: &str, parameter: &JsonValue) -> ParamResult<Self> {
        Self::parse_with_document(version, parameter, parameter)
    }

    /// Validates a Parameter Object for `version`, resolving `$ref` inside its
    /// schema against the enclosing `document`.
    pub fn parse_with_document(
        version: &str,
        parameter: &JsonValue,
        document: &JsonValue,
    ) -> ParamResult<Self> {
        let version = version.parse::<SpecVersion>()?;
        let raw = RawParameter::from_json(parameter)?;
        let spec = match version {
            SpecVersion::V2_0 => v2::parse(raw, document)?,
            SpecVersion::V3_0 => v3_0::parse(raw, document)?,
            SpecVersion::V3_1 => v3_1::parse(raw, document)?,
            SpecVersion::V3_2 => v3_2::parse(raw, document)?,
        };

        tracing::debug!(
            version = %spec.version(),
            parameter = spec.name(),
            location = %spec.location(),
            style = %spec.style(),
            explode = spec.explode(),
            "Parsed parameter specification"
        );
        Ok(spec)
    }

    /// Builds the codec for this parameter.
    pub fn build_codec(&self) -> ParamResult<Codec> {
        match self.version() {
            SpecVersion::V2_0 => v2::build_codec(self),
            SpecVersion::V3_0 => v3_0::build_codec(self),
            SpecVersion::V3_1 => v3_1::build_codec(self),
            SpecVersion::V3_2 => v3_2::build_codec(self),
        }
    }
}
