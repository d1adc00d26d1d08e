//! Collection payload decoding
//!
//! Each feed endpoint answers with either a bare JSON array of records, or
//! an object holding that array under the collection name:
//!
//! ```text
//! [{"id": 1, "name": "Ann"}]
//! {"customers": [{"id": 1, "name": "Ann"}]}
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::LoadError;

/// Decode a collection body, accepting both the bare and the wrapped shape
pub fn decode_collection<T: DeserializeOwned>(
    body: &[u8],
    collection: &'static str,
) -> Result<Vec<T>, LoadError> {
    let payload_error = |message: String| LoadError::Payload {
        collection,
        message,
    };

    let value: Value = serde_json::from_slice(body).map_err(|e| payload_error(e.to_string()))?;

    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map.remove(collection).ok_or_else(|| {
            payload_error(format!("expected an array or a \"{}\" key", collection))
        })?,
        other => {
            return Err(payload_error(format!(
                "expected an array, found {}",
                kind_of(&other)
            )))
        }
    };

    if !items.is_array() {
        return Err(payload_error(format!(
            "\"{}\" must be an array, found {}",
            collection,
            kind_of(&items)
        )));
    }

    serde_json::from_value(items).map_err(|e| payload_error(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
