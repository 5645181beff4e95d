use std::collections::BTreeMap;
use std::iter::FromIterator;

use psha_core::errors::{ErrorInfo, PshaError, Stage};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

fn serde_error(code: &str, stage: Stage, err: impl ToString) -> PshaError {
    PshaError::Serde(ErrorInfo::new(code, err.to_string()).at(stage))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with sorted object keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, PshaError> {
    let value =
        serde_json::to_value(value).map_err(|err| serde_error("json_serialize", Stage::Export, err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json_write", Stage::Export, err))?;
    Ok(bytes)
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, PshaError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml_serialize", Stage::Export, err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, PshaError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", Stage::Config, err))
}
