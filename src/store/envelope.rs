// store/envelope.rs
//
// Every Permit Store response is `{ "success": bool, "message"?: string, ... }`.
// A response only counts as successful with a 2xx status AND `success: true`.

use crate::store::StoreError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Key holding the record array in list and search responses.
pub const RECORDS_KEY: &str = "permits";

/// Validates the envelope and returns the full JSON object on success.
pub fn accept(status: u16, body: &str) -> Result<Value, StoreError> {
    let parsed: Result<Value, _> = serde_json::from_str(body);

    let message = parsed
        .as_ref()
        .ok()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    if !(200..300).contains(&status) {
        return Err(StoreError::Rejected { status, message });
    }

    let value = parsed.map_err(|e| StoreError::Decode(format!("body is not JSON: {e}")))?;

    match value.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(value),
        _ => Err(StoreError::Rejected { status, message }),
    }
}

/// Extracts and decodes the record array of an accepted envelope.
pub fn records<T: DeserializeOwned>(envelope: &Value) -> Result<Vec<T>, StoreError> {
    let arr = envelope
        .get(RECORDS_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::Decode(format!("'{RECORDS_KEY}' missing")))?;

    let out: Result<Vec<T>, _> = arr
        .iter()
        .map(|v| serde_json::from_value(v.clone()))
        .collect();

    out.map_err(|e| StoreError::Decode(e.to_string()))
}
