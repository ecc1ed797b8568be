//! # Error Handling
//!
//! Provides the `ParamError` enum shared by specification parsing, codec
//! construction, parsing and serialization.

use derive_more::{Display, From};

/// The crate-wide error enum.
///
/// `Parse` and `Unsupported` display as their bare message so callers can
/// compare them against literal strings.
#[derive(Debug, Display, From)]
pub enum ParamError {
    /// The parameter specification is malformed or incompatible with its version.
    #[from(ignore)]
    #[display("Invalid parameter specification: {_0}")]
    Spec(String),

    /// A wire value does not have the expected shape or scalar type.
    #[from(ignore)]
    #[display("{_0}")]
    Parse(String),

    /// A structurally valid but unsupported style/explode/shape combination.
    #[from(ignore)]
    #[display("{_0}")]
    Unsupported(String),

    /// Wrapper for JSON deserialization errors of the parameter object.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for invalid `patternProperties` expressions.
    #[display("Regex Error: {_0}")]
    Regex(regex::Error),
}

impl ParamError {
    /// Returns `true` for errors raised while reading a wire value.
    pub fn is_parse(&self) -> bool {
        matches!(self, ParamError::Parse(_))
    }

    /// Returns `true` for unsupported style/explode/shape combinations.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ParamError::Unsupported(_))
    }
}

impl std::error::Error for ParamError {}

/// Helper type alias for Result using ParamError.
pub type ParamResult<T> = Result<T, ParamError>;
