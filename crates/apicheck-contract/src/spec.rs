//! # OpenAPI Document Model
//!
//! The subset of a Swagger 2.0 / OpenAPI document that contract validation
//! reads: version strings, `info`, `paths`, and `definitions`. Everything
//! else in the document is ignored on load.
//!
//! `paths` and `definitions` keep document order, so listings come back in
//! the order the spec author wrote them.

use std::path::Path;

use apicheck_core::{parse_document, DocumentFormat};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ContractError;

/// `info` block of the spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "version_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
}

/// A parsed API specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// Swagger version, e.g. `"2.0"`.
    #[serde(
        default,
        deserialize_with = "version_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub swagger: Option<String>,
    /// OpenAPI version, e.g. `"3.0.3"`.
    #[serde(
        default,
        deserialize_with = "version_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub openapi: Option<String>,
    #[serde(default)]
    pub info: Info,
    /// `"/path"` -> `{ method -> operation }`.
    #[serde(default)]
    pub paths: Map<String, Value>,
    /// Schema name -> schema. `None` when the section is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Map<String, Value>>,
}

impl OpenApiSpec {
    /// Build a spec from an already-parsed JSON document.
    pub fn from_value(document: Value) -> Result<Self, ContractError> {
        Self::from_value_at(document, "<value>")
    }

    /// Parse a JSON spec document.
    pub fn from_json_str(content: &str) -> Result<Self, ContractError> {
        Self::parse(content, DocumentFormat::Json, "<json>")
    }

    /// Parse a YAML spec document. Numeric keys such as response codes are
    /// read as strings.
    pub fn from_yaml_str(content: &str) -> Result<Self, ContractError> {
        Self::parse(content, DocumentFormat::Yaml, "<yaml>")
    }

    /// Load a spec from disk; `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::SpecLoad`] if the file cannot be read or is
    /// not a spec document.
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ContractError::SpecLoad {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        let spec = Self::parse(&content, DocumentFormat::from_path(path), &origin)?;
        tracing::debug!(
            path = %origin,
            paths = spec.paths.len(),
            definitions = spec.definitions.as_ref().map_or(0, Map::len),
            "loaded OpenAPI spec"
        );
        Ok(spec)
    }

    fn parse(content: &str, format: DocumentFormat, origin: &str) -> Result<Self, ContractError> {
        let document =
            parse_document(content, format, origin).map_err(|e| ContractError::SpecLoad {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_value_at(document, origin)
    }

    fn from_value_at(document: Value, origin: &str) -> Result<Self, ContractError> {
        let spec: Self =
            serde_json::from_value(document).map_err(|e| ContractError::SpecLoad {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        if spec.swagger.is_none() && spec.openapi.is_none() {
            tracing::warn!(origin, "spec declares neither 'swagger' nor 'openapi' version");
        }
        Ok(spec)
    }

    /// The declared spec version, preferring `swagger` over `openapi`.
    pub fn version(&self) -> Option<&str> {
        self.swagger.as_deref().or(self.openapi.as_deref())
    }

    /// `info.title`, if declared.
    pub fn title(&self) -> Option<&str> {
        self.info.title.as_deref()
    }

    /// Look up the operation object for `path` + lower-case `method`.
    pub fn operation(&self, path: &str, method: &str) -> Option<&Value> {
        self.paths.get(path)?.get(method.to_ascii_lowercase())
    }
}

/// Accept version fields written as strings or bare YAML/JSON numbers
/// (`swagger: 2.0`).
fn version_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
