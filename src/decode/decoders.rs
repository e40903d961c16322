//! Decoder implementations

use super::types::{RecordDecoder, DEFAULT_RECORD_PATH};
use crate::auth::{extract_jsonpath, lookup_path};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder extracting the record array at a dot path
#[derive(Debug, Clone)]
pub struct JsonDecoder {
    /// Path to the record array; empty means the body itself
    record_path: String,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::with_path(DEFAULT_RECORD_PATH)
    }
}

impl JsonDecoder {
    /// Create a decoder reading records from `value`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: path.into(),
        }
    }

    /// The configured record path
    pub fn record_path(&self) -> &str {
        &self.record_path
    }

    fn extract_records<'a>(&self, body: &'a Value) -> Result<&'a [Value]> {
        let target = lookup_path(body, &self.record_path).ok_or_else(|| {
            Error::RecordExtraction {
                path: self.record_path.clone(),
                message: "path not found in response".to_string(),
            }
        })?;

        match target {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(&[]),
            other => Err(Error::RecordExtraction {
                path: self.record_path.clone(),
                message: format!("expected an array, found {}", type_name(other)),
            }),
        }
    }
}

impl<R: DeserializeOwned> RecordDecoder<R> for JsonDecoder {
    fn decode(&self, body: &Value, page: u32) -> Result<Vec<Option<R>>> {
        let items = self.extract_records(body)?;

        Ok(items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if item.is_null() {
                    return None;
                }
                match R::deserialize(item) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        let err = Error::malformed(page, index, e.to_string());
                        let id = extract_jsonpath(item, "id").unwrap_or_default();
                        warn!(record_id = %id, "Skipping record: {err}");
                        None
                    }
                }
            })
            .collect())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
