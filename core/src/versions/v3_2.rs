//! # OpenAPI 3.2
//!
//! 3.1 plus the `cookie` style for cookie parameters. Header values and
//! `cookie`-style values are carried verbatim; every other parameter keeps the
//! 3.1 escaping.

use super::v3_1::{self, Rules};
use super::{RawParameter, SpecVersion};
use crate::codec::Codec;
use crate::error::ParamResult;
use crate::models::{Location, ParameterSpec, Style};
use crate::schema::dialect::Dialect;
use crate::tokenizer::Escaping;
use serde_json::Value as JsonValue;

/// The 3.2 rule set.
pub const RULES: Rules = Rules {
    version: SpecVersion::V3_2,
    dialect: Dialect::Draft202012,
    allowed_styles,
};

/// Styles a 3.2 location accepts.
pub fn allowed_styles(location: Location) -> &'static [Style] {
    match location {
        Location::Cookie => &[Style::Form, Style::Cookie],
        other => v3_1::allowed_styles(other),
    }
}

/// Validates a 3.2 Parameter Object.
pub fn parse(raw: RawParameter, document: &JsonValue) -> ParamResult<ParameterSpec> {
    v3_1::parse_with(&RULES, raw, document)
}

/// Raw for headers and the `cookie` style, 3.1 escaping otherwise.
pub fn escaping(spec: &ParameterSpec) -> Escaping {
    if spec.location() == Location::Header || spec.style() == Style::Cookie {
        Escaping::Raw
    } else {
        v3_1::escaping(spec)
    }
}

/// Builds the codec for a 3.2 parameter.
pub fn build_codec(spec: &ParameterSpec) -> ParamResult<Codec> {
    v3_1::build_with_escaping(spec, escaping(spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ValueCodec;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn codec(parameter: JsonValue) -> Codec {
        ParameterSpec::parse("3.2", &parameter)
            .unwrap()
            .build_codec()
            .unwrap()
    }

    #[test]
    fn test_cookie_style_defaults_to_explode() {
        let spec = ParameterSpec::parse(
            "3.2",
            &json!({"name": "ids", "in": "cookie", "style": "cookie", "schema": {"type": "array"}}),
        )
        .unwrap();
        assert!(spec.explode());
        assert_eq!(escaping(&spec), Escaping::Raw);
    }

    #[test]
    fn test_cookie_array() {
        let exploded = codec(json!({
            "name": "ids", "in": "cookie", "style": "cookie", "explode": true,
            "schema": {"type": "array", "items": {"type": "string"}}
        }));
        assert_eq!(
            exploded.try_parse(Some("ids=a; ids=b; ids=c")).unwrap(),
            Some(json!(["a", "b", "c"]))
        );

        let joined = codec(json!({
            "name": "ids", "in": "cookie", "style": "cookie", "explode": false,
            "schema": {"type": "array", "items": {"type": "string"}}
        }));
        assert_eq!(
            joined.try_parse(Some("ids=a,b,c")).unwrap(),
            Some(json!(["a", "b", "c"]))
        );
        assert!(joined.value_includes_parameter_name());
    }

    #[test]
    fn test_cookie_values_are_not_escaped() {
        let codec = codec(json!({
            "name": "session", "in": "cookie", "style": "cookie",
            "schema": {"type": "string"}
        }));
        assert_eq!(
            codec.serialize(Some(&json!("a b%"))).unwrap().as_deref(),
            Some("session=a b%")
        );
        assert_eq!(codec.try_parse(Some("session=a%20b")).unwrap(), Some(json!("a%20b")));
    }

    #[test]
    fn test_cookie_object() {
        let schema = json!({"type": "object", "properties": {"R": {"type": "integer"}}});
        let exploded = codec(json!({
            "name": "color", "in": "cookie", "style": "cookie", "explode": true, "schema": schema
        }));
        assert!(!exploded.value_includes_parameter_name());
        assert_eq!(
            exploded.try_parse(Some("R=100; G=200")).unwrap(),
            Some(json!({"R": 100, "G": "200"}))
        );
    }

    #[test]
    fn test_headers_are_raw() {
        let codec = codec(json!({
            "name": "X-Ids", "in": "header", "schema": {"type": "array", "items": {"type": "string"}}
        }));
        assert_eq!(
            codec.try_parse(Some("a%2C,b")).unwrap(),
            Some(json!(["a%2C", "b"]))
        );
    }

    #[test]
    fn test_form_cookie_keeps_percent_encoding() {
        let codec = codec(json!({
            "name": "q", "in": "cookie", "style": "form", "schema": {"type": "string"}
        }));
        assert_eq!(codec.serialize(Some(&json!("a b"))).unwrap().as_deref(), Some("q=a%20b"));
    }

    #[test]
    fn test_cookie_style_rejected_outside_cookie() {
        let err = ParameterSpec::parse(
            "3.2",
            &json!({"name": "q", "in": "query", "style": "cookie", "schema": {}}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not allowed for query"));
    }
}
