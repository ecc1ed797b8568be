//! # Parameter Models
//!
//! The validated, immutable description of a parameter that codecs are built
//! from. Instances come from [`ParameterSpec::parse`] and the per-version
//! adapters in [`crate::versions`].

use crate::schema::Schema;
use crate::versions::SpecVersion;
use std::fmt;

/// The location of a parameter (`in`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Path.
    Path,
    /// Header.
    Header,
    /// Query.
    Query,
    /// Cookie (OAS 3.x).
    Cookie,
    /// Form data (Swagger 2.0).
    FormData,
    /// Request body (Swagger 2.0).
    Body,
}

impl Location {
    /// Maps an `in` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "path" => Some(Location::Path),
            "header" => Some(Location::Header),
            "query" => Some(Location::Query),
            "cookie" => Some(Location::Cookie),
            "formData" => Some(Location::FormData),
            "body" => Some(Location::Body),
            _ => None,
        }
    }

    /// The `in` keyword.
    pub fn name(&self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Header => "header",
            Location::Query => "query",
            Location::Cookie => "cookie",
            Location::FormData => "formData",
            Location::Body => "body",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameter serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// `matrix`
    Matrix,
    /// `label`
    Label,
    /// `simple`
    Simple,
    /// `form`
    Form,
    /// `spaceDelimited`
    SpaceDelimited,
    /// `pipeDelimited`
    PipeDelimited,
    /// `deepObject`
    DeepObject,
    /// `cookie` (OAS 3.2)
    Cookie,
}

impl Style {
    /// Maps a `style` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "matrix" => Some(Style::Matrix),
            "label" => Some(Style::Label),
            "simple" => Some(Style::Simple),
            "form" => Some(Style::Form),
            "spaceDelimited" => Some(Style::SpaceDelimited),
            "pipeDelimited" => Some(Style::PipeDelimited),
            "deepObject" => Some(Style::DeepObject),
            "cookie" => Some(Style::Cookie),
            _ => None,
        }
    }

    /// The `style` keyword.
    pub fn name(&self) -> &'static str {
        match self {
            Style::Matrix => "matrix",
            Style::Label => "label",
            Style::Simple => "simple",
            Style::Form => "form",
            Style::SpaceDelimited => "spaceDelimited",
            Style::PipeDelimited => "pipeDelimited",
            Style::DeepObject => "deepObject",
            Style::Cookie => "cookie",
        }
    }

    /// `explode` defaults to true for `form` and `cookie`, false otherwise.
    pub fn default_explode(&self) -> bool {
        matches!(self, Style::Form | Style::Cookie)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Swagger 2.0 array serialization (`collectionFormat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollectionFormat {
    /// Comma separated (`a,b`).
    #[default]
    Csv,
    /// Space separated (`a b`).
    Ssv,
    /// Tab separated (`a\tb`).
    Tsv,
    /// Pipe separated (`a|b`).
    Pipes,
    /// Repeated parameter (`name=a&name=b`).
    Multi,
}

impl CollectionFormat {
    /// Maps a `collectionFormat` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "csv" => Some(CollectionFormat::Csv),
            "ssv" => Some(CollectionFormat::Ssv),
            "tsv" => Some(CollectionFormat::Tsv),
            "pipes" => Some(CollectionFormat::Pipes),
            "multi" => Some(CollectionFormat::Multi),
            _ => None,
        }
    }

    /// The `collectionFormat` keyword.
    pub fn name(&self) -> &'static str {
        match self {
            CollectionFormat::Csv => "csv",
            CollectionFormat::Ssv => "ssv",
            CollectionFormat::Tsv => "tsv",
            CollectionFormat::Pipes => "pipes",
            CollectionFormat::Multi => "multi",
        }
    }

    /// The single separator joining items; `None` for `multi`.
    pub fn separator(&self) -> Option<&'static str> {
        match self {
            CollectionFormat::Csv => Some(","),
            CollectionFormat::Ssv => Some(" "),
            CollectionFormat::Tsv => Some("\t"),
            CollectionFormat::Pipes => Some("|"),
            CollectionFormat::Multi => None,
        }
    }
}

impl fmt::Display for CollectionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated parameter specification.
///
/// Swagger 2.0 parameters carry no `style`; they report `simple` for path and
/// header parameters and `form` otherwise, and keep their `collectionFormat`.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    version: SpecVersion,
    name: String,
    location: Location,
    style: Style,
    explode: bool,
    allow_reserved: bool,
    collection_format: Option<CollectionFormat>,
    schema: Schema,
}

impl ParameterSpec {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        version: SpecVersion,
        name: String,
        location: Location,
        style: Style,
        explode: bool,
        allow_reserved: bool,
        collection_format: Option<CollectionFormat>,
        schema: Schema,
    ) -> Self {
        Self {
            version,
            name,
            location,
            style,
            explode,
            allow_reserved,
            collection_format,
            schema,
        }
    }

    /// The specification version the parameter was read with.
    pub fn version(&self) -> SpecVersion {
        self.version
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Resolved style (explicit or defaulted).
    pub fn style(&self) -> Style {
        self.style
    }

    /// Resolved explode flag (explicit or defaulted).
    pub fn explode(&self) -> bool {
        self.explode
    }

    /// `allowReserved` (OAS 3.x query parameters).
    pub fn allow_reserved(&self) -> bool {
        self.allow_reserved
    }

    /// Swagger 2.0 `collectionFormat`, defaulted to `csv` for arrays.
    pub fn collection_format(&self) -> Option<CollectionFormat> {
        self.collection_format
    }

    /// The resolved schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
