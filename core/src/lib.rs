#![deny(missing_docs)]

//! # OpenAPI Parameter Codec
//!
//! Parses style-encoded parameter values (path segments, query strings,
//! headers, cookies) into JSON and serializes JSON back, following the
//! serialization rules of OpenAPI 2.0, 3.0, 3.1 and 3.2.
//!
//! ```
//! use openapi_param_codec::{build_codec, parse_parameter_spec, ValueCodec};
//! use serde_json::json;
//!
//! let spec = parse_parameter_spec(
//!     "3.1",
//!     &json!({"name": "color", "in": "query", "explode": false,
//!             "schema": {"type": "array", "items": {"type": "string"}}}),
//! )?;
//! let codec = build_codec(&spec)?;
//! assert_eq!(codec.try_parse(Some("color=blue,black"))?, Some(json!(["blue", "black"])));
//! assert_eq!(codec.serialize(Some(&json!(["blue"])))?.as_deref(), Some("color=blue"));
//! # Ok::<(), openapi_param_codec::ParamError>(())
//! ```

/// Shared error types.
pub mod error;

/// Percent encoding, literal cursor and delimiter splitting.
pub mod tokenizer;

/// Locations, styles and the validated parameter specification.
pub mod models;

/// Eagerly resolved schema nodes and schema dialects.
pub mod schema;

/// Per-shape codecs and the shape dispatcher.
pub mod codec;

/// Per-version parameter validation and codec selection.
pub mod versions;

pub use codec::{Codec, Shape, ValueCodec};
pub use error::{ParamError, ParamResult};
pub use models::{CollectionFormat, Location, ParameterSpec, Style};
pub use schema::{InstanceType, Schema};
pub use tokenizer::Escaping;
pub use versions::SpecVersion;

use serde_json::Value as JsonValue;

/// Validates a Parameter Object for an OpenAPI version string
/// (`2`, `2.0`, `3`, `3.0[.x]`, `3.1[.x]`, `3.2[.x]`).
pub fn parse_parameter_spec(version: &str, parameter: &JsonValue) -> ParamResult<ParameterSpec> {
    ParameterSpec::parse(version, parameter)
}

/// Builds the codec for a validated parameter.
pub fn build_codec(spec: &ParameterSpec) -> ParamResult<Codec> {
    spec.build_codec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_through_public_api() {
        let spec = parse_parameter_spec(
            "3.2",
            &json!({"name": "id", "in": "path", "style": "label", "schema": {"type": "integer"}}),
        )
        .unwrap();
        let codec = build_codec(&spec).unwrap();
        assert_eq!(codec.try_parse(Some(".5")).unwrap(), Some(json!(5)));
        assert_eq!(codec.serialize(Some(&json!(5))).unwrap().as_deref(), Some(".5"));
    }
}
