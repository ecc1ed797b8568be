//! # `$ref` Resolution
//!
//! Only references into the document holding the parameter are followed.
//! A reference with a document part is accepted when that part names the
//! current document through its `$self` (OAS 3.2) or `$id` URI.

use crate::error::{ParamError, ParamResult};
use percent_encoding::percent_decode_str;
use serde_json::Value as JsonValue;
use url::Url;

/// Returns the URI the document identifies itself with, if any.
pub fn document_self_uri(document: &JsonValue) -> Option<&str> {
    document
        .get("$self")
        .or_else(|| document.get("$id"))
        .and_then(JsonValue::as_str)
}

/// Resolves `reference` against `document`.
///
/// The fragment is a URI-escaped JSON Pointer: percent escapes are decoded
/// first, then `~1` and `~0` per segment.
pub fn resolve_ref<'a>(
    document: &'a JsonValue,
    reference: &str,
    self_uri: Option<&str>,
) -> ParamResult<&'a JsonValue> {
    let (target_document, fragment) = reference.split_once('#').unwrap_or((reference, ""));
    let local = target_document.is_empty()
        || self_uri.is_some_and(|uri| names_document(target_document, uri));
    if !local || !reference.contains('#') {
        return Err(ParamError::Spec(format!(
            "Reference '{}' does not point into the current document",
            reference
        )));
    }

    let pointer = percent_decode_str(fragment).decode_utf8().map_err(|_| {
        ParamError::Spec(format!("Reference '{}' is not valid UTF-8", reference))
    })?;
    document
        .pointer(&pointer)
        .ok_or_else(|| ParamError::Spec(format!("Reference '{}' cannot be resolved", reference)))
}

/// Whether `target` and `self_uri` identify the same document.
///
/// A relative `self_uri` is resolved against an absolute `target`, so
/// `/api/openapi.yaml` names `https://host/api/openapi.yaml`.
fn names_document(target: &str, self_uri: &str) -> bool {
    if target == self_uri {
        return true;
    }
    let Ok(target) = Url::parse(target) else {
        return false;
    };
    let own = Url::parse(self_uri).or_else(|_| target.join(self_uri));
    match own {
        Ok(own) => {
            target.scheme() == own.scheme()
                && target.host() == own.host()
                && target.port_or_known_default() == own.port_or_known_default()
                && target.path() == own.path()
        }
        Err(_) => false,
    }
}
