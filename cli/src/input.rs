#![deny(missing_docs)]

//! # Input Loading
//!
//! Reads parameter objects and OpenAPI documents from JSON or YAML files.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{CliError, CliResult};

/// Reads `path` as JSON when it has a `.json` extension, YAML otherwise.
pub fn load_value(path: &Path) -> CliResult<Value> {
    if !path.exists() {
        return Err(CliError::General(format!("File not found: {:?}", path)));
    }
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    tracing::debug!(path = %path.display(), json = is_json, "Loading input file");
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}
