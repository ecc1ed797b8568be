#![deny(missing_docs)]

//! # Codec Commands
//!
//! `parse`, `serialize` and `describe` over one parameter specification.
//! Each command returns its output so `main` decides where it goes.

use std::path::PathBuf;

use openapi_param_codec::{Codec, ParameterSpec, ValueCodec};
use serde_json::Value;

use crate::error::CliResult;
use crate::input::load_value;

/// Where the parameter comes from and which version reads it.
#[derive(clap::Args, Debug, Clone)]
pub struct SpecArgs {
    /// OpenAPI version (2.0, 3.0, 3.1, 3.2 or a full x.y.z version).
    #[clap(long, env = "PARAM_CODEC_OAS_VERSION", default_value = "3.1")]
    pub oas_version: String,

    /// Parameter Object file (JSON or YAML).
    #[clap(long)]
    pub parameter: PathBuf,

    /// Enclosing OpenAPI document used to resolve `$ref` in the parameter schema.
    #[clap(long)]
    pub document: Option<PathBuf>,
}

impl SpecArgs {
    /// Loads and validates the parameter.
    pub fn load(&self) -> CliResult<ParameterSpec> {
        let parameter = load_value(&self.parameter)?;
        let spec = match &self.document {
            Some(path) => {
                let document = load_value(path)?;
                ParameterSpec::parse_with_document(&self.oas_version, &parameter, &document)?
            }
            None => ParameterSpec::parse(&self.oas_version, &parameter)?,
        };
        Ok(spec)
    }

    fn codec(&self) -> CliResult<(ParameterSpec, Codec)> {
        let spec = self.load()?;
        let codec = spec.build_codec()?;
        Ok((spec, codec))
    }
}

/// Parses a wire value; an omitted value means the parameter is absent.
pub fn parse(args: &SpecArgs, wire: Option<&str>) -> CliResult<String> {
    let (_, codec) = args.codec()?;
    let value = codec.try_parse(wire)?.unwrap_or(Value::Null);
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Serializes a JSON instance; an absent result prints nothing.
pub fn serialize(args: &SpecArgs, instance: &str) -> CliResult<String> {
    let (_, codec) = args.codec()?;
    let instance: Value = serde_json::from_str(instance)?;
    Ok(codec.serialize(Some(&instance))?.unwrap_or_default())
}

/// Describes the resolved parameter and its codec.
pub fn describe(args: &SpecArgs) -> CliResult<String> {
    let (spec, codec) = args.codec()?;
    let mut lines = vec![
        format!("version: {}", spec.version()),
        format!("name: {}", spec.name()),
        format!("location: {}", spec.location()),
        format!("style: {}", spec.style()),
        format!("explode: {}", spec.explode()),
    ];
    if let Some(format) = spec.collection_format() {
        lines.push(format!("collectionFormat: {}", format));
    }
    lines.push(format!("shape: {}", codec.shape()));
    lines.push(format!(
        "includes name: {}",
        codec.value_includes_parameter_name()
    ));
    Ok(lines.join("\n"))
}
