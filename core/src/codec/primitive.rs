//! # Primitive Codec
//!
//! A single scalar per parameter. Every supported style is a literal lead
//! followed by the value: `` (simple), `.` (label), `;name=` (matrix),
//! `name=` (form, cookie, Swagger 2.0 query/formData).

use super::convert;
use super::ValueCodec;
use crate::error::{ParamError, ParamResult};
use crate::schema::InstanceType;
use crate::tokenizer::{Cursor, Escaping};
use serde_json::Value as JsonValue;

/// Wire layout of a primitive parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveLayout {
    /// `lead` followed by the escaped value.
    Prefixed {
        /// Literal preceding the value.
        lead: String,
    },
    /// A style that cannot carry a primitive.
    Unsupported(String),
}

/// Codec for string, number, integer, boolean and null parameters.
#[derive(Debug, Clone)]
pub struct PrimitiveCodec {
    layout: PrimitiveLayout,
    instance_type: Option<InstanceType>,
    escaping: Escaping,
    includes_name: bool,
}

impl PrimitiveCodec {
    /// Binds a layout to a declared instance type.
    pub fn new(
        layout: PrimitiveLayout,
        instance_type: Option<InstanceType>,
        escaping: Escaping,
        includes_name: bool,
    ) -> Self {
        Self {
            layout,
            instance_type,
            escaping,
            includes_name,
        }
    }

    /// The wire layout.
    pub fn layout(&self) -> &PrimitiveLayout {
        &self.layout
    }

    fn lead(&self) -> ParamResult<&str> {
        match &self.layout {
            PrimitiveLayout::Prefixed { lead } => Ok(lead),
            PrimitiveLayout::Unsupported(message) => Err(ParamError::Unsupported(message.clone())),
        }
    }
}

impl ValueCodec for PrimitiveCodec {
    fn try_parse(&self, wire: Option<&str>) -> ParamResult<Option<JsonValue>> {
        let Some(wire) = wire else {
            return Ok(None);
        };
        let lead = self.lead()?;

        let mut cursor = Cursor::new(wire);
        cursor.expect_literal(lead)?;
        let token = self.escaping.decode(cursor.take_rest())?;
        convert::to_json(&token, self.instance_type).map(Some)
    }

    fn serialize(&self, instance: Option<&JsonValue>) -> ParamResult<Option<String>> {
        let Some(instance) = instance.filter(|value| !value.is_null()) else {
            return Ok(None);
        };
        let lead = self.lead()?;

        let token = convert::to_token(instance)?;
        Ok(Some(format!("{}{}", lead, self.escaping.encode(&token))))
    }

    fn value_includes_parameter_name(&self) -> bool {
        self.includes_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codec(lead: &str, ty: InstanceType) -> PrimitiveCodec {
        PrimitiveCodec::new(
            PrimitiveLayout::Prefixed {
                lead: lead.to_string(),
            },
            Some(ty),
            Escaping::Percent,
            false,
        )
    }

    #[test]
    fn test_absent_value() {
        let codec = codec(";color=", InstanceType::STRING);
        assert_eq!(codec.try_parse(None).unwrap(), None);
        assert_eq!(codec.serialize(None).unwrap(), None);
        assert_eq!(codec.serialize(Some(&JsonValue::Null)).unwrap(), None);
    }

    #[test]
    fn test_matrix_lead() {
        let codec = codec(";color=", InstanceType::STRING);
        assert_eq!(codec.try_parse(Some(";color=blue")).unwrap(), Some(json!("blue")));
        assert_eq!(codec.serialize(Some(&json!("blue"))).unwrap().as_deref(), Some(";color=blue"));
    }

    #[test]
    fn test_missing_separator_names_literal() {
        let codec = codec(";color=", InstanceType::STRING);
        let err = codec.try_parse(Some(";color")).unwrap_err();
        assert_eq!(err.to_string(), "Expected ';color=' at position 0 but found ';color'");
    }

    #[test]
    fn test_escaping() {
        let codec = codec(".", InstanceType::STRING);
        assert_eq!(codec.serialize(Some(&json!("a b"))).unwrap().as_deref(), Some(".a%20b"));
        assert_eq!(codec.try_parse(Some(".a%20b")).unwrap(), Some(json!("a b")));
    }

    #[test]
    fn test_simple_empty_string() {
        let codec = codec("", InstanceType::STRING);
        assert_eq!(codec.try_parse(Some("")).unwrap(), Some(json!("")));
    }

    #[test]
    fn test_type_error() {
        let codec = codec("", InstanceType::NUMBER);
        let err = codec.try_parse(Some("abc")).unwrap_err();
        assert_eq!(err.to_string(), "Value 'abc' is not a number");
    }

    #[test]
    fn test_unsupported_layout() {
        let codec = PrimitiveCodec::new(
            PrimitiveLayout::Unsupported("deepObject style not supported for primitives".into()),
            Some(InstanceType::STRING),
            Escaping::Percent,
            false,
        );
        assert_eq!(codec.try_parse(None).unwrap(), None);
        let err = codec.try_parse(Some("x")).unwrap_err();
        assert!(err.is_unsupported());
        assert!(codec.serialize(Some(&json!("x"))).unwrap_err().is_unsupported());
    }
}
