//! # OpenAPI 3.0
//!
//! Wire rules are identical to 3.1; only the schema dialect differs
//! (`nullable`, single-string `type`, `$ref` replacing its siblings).

use super::v3_1::{self, Rules};
use super::{RawParameter, SpecVersion};
use crate::codec::Codec;
use crate::error::ParamResult;
use crate::models::ParameterSpec;
use crate::schema::dialect::Dialect;
use serde_json::Value as JsonValue;

/// The 3.0 rule set: 3.1 styles over the 3.0 schema dialect.
pub const RULES: Rules = Rules {
    version: SpecVersion::V3_0,
    dialect: Dialect::OpenApi30,
    allowed_styles: v3_1::allowed_styles,
};

/// Validates a 3.0 Parameter Object.
pub fn parse(raw: RawParameter, document: &JsonValue) -> ParamResult<ParameterSpec> {
    v3_1::parse_with(&RULES, raw, document)
}

/// Builds the codec for a 3.0 parameter using the 3.1 codec set.
pub fn build_codec(spec: &ParameterSpec) -> ParamResult<Codec> {
    v3_1::build_codec(spec)
}
