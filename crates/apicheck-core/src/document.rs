//! # Document Loading
//!
//! Reads JSON or YAML documents (schemas, API specs, captured responses)
//! into `serde_json::Value`. YAML is parsed into a YAML tree first and then
//! converted, so that non-string mapping keys such as Swagger response codes
//! (`200:`) become string keys instead of failing deserialization.

use std::path::Path;

use serde_json::Value;

use crate::error::CoreError;

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick a format from a file extension. Anything that is not
    /// `.yaml`/`.yml` is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse document text in the given format.
///
/// `origin` names the document in error messages.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Value, CoreError> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| CoreError::DocumentLoad {
                path: origin.to_string(),
                reason: format!("invalid JSON: {e}"),
            })
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| CoreError::DocumentLoad {
                    path: origin.to_string(),
                    reason: format!("invalid YAML: {e}"),
                })?;
            yaml_to_json_value(&yaml).map_err(|reason| CoreError::DocumentLoad {
                path: origin.to_string(),
                reason: format!("YAML-to-JSON conversion failed: {reason}"),
            })
        }
    }
}

/// Load a document from disk, choosing the format by extension.
///
/// # Errors
///
/// Returns [`CoreError::Io`] if the file cannot be read and
/// [`CoreError::DocumentLoad`] if it cannot be parsed.
pub fn load_document(path: &Path) -> Result<Value, CoreError> {
    let content = std::fs::read_to_string(path)?;
    parse_document(
        &content,
        DocumentFormat::from_path(path),
        &path.display().to_string(),
    )
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar mapping keys are stringified. Tags are dropped in favor of the
/// tagged value.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                // Swagger response codes are usually written unquoted (`200:`)
                // and YAML reads them as numbers; JSON object keys must be
                // strings, and lookups use the "200" spelling.
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
