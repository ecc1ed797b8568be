//! # Primitive Type Converter
//!
//! Converts a single decoded wire token to a JSON leaf for a declared
//! instance type, and a JSON leaf back to its token text.

use crate::error::{ParamError, ParamResult};
use crate::schema::InstanceType;
use serde_json::{Number, Value as JsonValue};

/// Converts `token` to JSON according to `instance_type`.
///
/// Undeclared types read as strings. Union types try boolean, then numbers,
/// then string, then null. A numeric-looking token is never coerced when only
/// `string` is declared.
pub fn to_json(token: &str, instance_type: Option<InstanceType>) -> ParamResult<JsonValue> {
    let Some(ty) = instance_type.filter(|ty| !ty.is_empty()) else {
        return Ok(JsonValue::String(token.to_string()));
    };

    if ty == InstanceType::NULL {
        return Ok(JsonValue::Null);
    }

    if ty.contains(InstanceType::BOOLEAN) {
        match token {
            "true" => return Ok(JsonValue::Bool(true)),
            "false" => return Ok(JsonValue::Bool(false)),
            _ => {}
        }
    }

    if ty.intersects(InstanceType::INTEGER | InstanceType::NUMBER) {
        if let Some(number) = parse_number(token) {
            if ty.contains(InstanceType::NUMBER) || is_integral(&number) {
                return Ok(JsonValue::Number(number));
            }
        }
    }

    if ty.contains(InstanceType::STRING) {
        return Ok(JsonValue::String(token.to_string()));
    }

    if ty.contains(InstanceType::NULL) && (token.is_empty() || token == "null") {
        return Ok(JsonValue::Null);
    }

    Err(ParamError::Parse(format!(
        "Value '{}' is not a {}",
        token, ty
    )))
}

/// Renders a JSON leaf as token text.
pub fn to_token(value: &JsonValue) -> ParamResult<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Null => Ok("null".to_string()),
        JsonValue::Array(_) | JsonValue::Object(_) => Err(ParamError::Unsupported(format!(
            "Nested value '{}' cannot be serialized as a single parameter token",
            value
        ))),
    }
}

/// Strict JSON number literal: no surrounding whitespace, no leading `+`.
fn parse_number(token: &str) -> Option<Number> {
    if token.is_empty() || token.trim() != token {
        return None;
    }
    serde_json::from_str::<Number>(token).ok()
}

fn is_integral(number: &Number) -> bool {
    number.is_i64()
        || number.is_u64()
        || number
            .as_f64()
            .is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_undeclared_type_reads_string() {
        assert_eq!(to_json("1", None).unwrap(), json!("1"));
        assert_eq!(to_json("1", Some(InstanceType::empty())).unwrap(), json!("1"));
    }

    #[test]
    fn test_string_is_never_coerced() {
        assert_eq!(to_json("1", Some(InstanceType::STRING)).unwrap(), json!("1"));
        assert_eq!(to_json("true", Some(InstanceType::STRING)).unwrap(), json!("true"));
    }

    #[test]
    fn test_integer() {
        assert_eq!(to_json("42", Some(InstanceType::INTEGER)).unwrap(), json!(42));
        assert_eq!(to_json("-7", Some(InstanceType::INTEGER)).unwrap(), json!(-7));
        let err = to_json("abc", Some(InstanceType::INTEGER)).unwrap_err();
        assert_eq!(err.to_string(), "Value 'abc' is not a integer");
        assert!(to_json("1.5", Some(InstanceType::INTEGER)).is_err());
    }

    #[test]
    fn test_out_of_range_integer_is_accepted() {
        let value = to_json("123456789012345678901234567890", Some(InstanceType::INTEGER)).unwrap();
        assert!(value.is_number());
    }

    #[test]
    fn test_number_is_strict_json() {
        assert_eq!(to_json("1.5", Some(InstanceType::NUMBER)).unwrap(), json!(1.5));
        assert_eq!(to_json("1e3", Some(InstanceType::NUMBER)).unwrap(), json!(1000.0));
        assert!(to_json("+1", Some(InstanceType::NUMBER)).is_err());
        assert!(to_json(" 1", Some(InstanceType::NUMBER)).is_err());
        assert!(to_json("", Some(InstanceType::NUMBER)).is_err());
        assert!(to_json("NaN", Some(InstanceType::NUMBER)).is_err());
    }

    #[test]
    fn test_boolean() {
        assert_eq!(to_json("true", Some(InstanceType::BOOLEAN)).unwrap(), json!(true));
        let err = to_json("yes", Some(InstanceType::BOOLEAN)).unwrap_err();
        assert_eq!(err.to_string(), "Value 'yes' is not a boolean");
    }

    #[test]
    fn test_null_ignores_token() {
        assert_eq!(to_json("whatever", Some(InstanceType::NULL)).unwrap(), JsonValue::Null);
    }

    #[test]
    fn test_unions() {
        let ty = InstanceType::INTEGER | InstanceType::STRING;
        assert_eq!(to_json("5", Some(ty)).unwrap(), json!(5));
        assert_eq!(to_json("five", Some(ty)).unwrap(), json!("five"));

        let ty = InstanceType::INTEGER | InstanceType::NULL;
        assert_eq!(to_json("null", Some(ty)).unwrap(), JsonValue::Null);
        let err = to_json("x", Some(ty)).unwrap_err();
        assert_eq!(err.to_string(), "Value 'x' is not a integer or null");

        let ty = InstanceType::STRING | InstanceType::NULL;
        assert_eq!(to_json("null", Some(ty)).unwrap(), json!("null"));
    }

    #[test]
    fn test_to_token() {
        assert_eq!(to_token(&json!("a b")).unwrap(), "a b");
        assert_eq!(to_token(&json!(100)).unwrap(), "100");
        assert_eq!(to_token(&json!(1.5)).unwrap(), "1.5");
        assert_eq!(to_token(&json!(false)).unwrap(), "false");
        assert_eq!(to_token(&JsonValue::Null).unwrap(), "null");
        assert!(to_token(&json!([1])).unwrap_err().is_unsupported());
    }
}
