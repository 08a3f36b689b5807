//! Input validation for the operations core
//!
//! Guards applied before any parsing or mutation: wizard input length, raw
//! document size, and the shape of structured JSON content.

use crate::error::{OperationsError, OperationsResult};
use serde_json::Value;

/// Maximum number of keys in a JSON object or items in a JSON array
const MAX_JSON_ITEMS: usize = 10_000;

/// Maximum string length for JSON string values
const MAX_JSON_STRING_LENGTH: usize = 100_000;

/// Validates a single wizard input against the configured length limit
pub fn validate_wizard_input(input: &str, max_length: usize) -> OperationsResult<()> {
    let length = input.chars().count();
    if length > max_length {
        return Err(OperationsError::validation([format!(
            "input ({length} chars, max {max_length})"
        )]));
    }
    Ok(())
}

/// Validates raw document content size before sniffing
pub fn validate_content_size(content: &str, max_bytes: usize) -> OperationsResult<()> {
    if content.len() > max_bytes {
        return Err(OperationsError::unsupported_content(format!(
            "content too large: {} bytes (max: {max_bytes})",
            content.len()
        )));
    }
    Ok(())
}

/// Validates structured JSON content for nesting depth and size constraints
pub fn validate_structured_content(value: &Value, max_depth: usize) -> OperationsResult<()> {
    validate_json_depth(value, 0, max_depth)
}

fn validate_json_depth(value: &Value, current_depth: usize, max_depth: usize) -> OperationsResult<()> {
    if current_depth > max_depth {
        return Err(OperationsError::unsupported_content(format!(
            "JSON nesting too deep: {current_depth} (max: {max_depth})"
        )));
    }

    match value {
        Value::Object(map) => {
            if map.len() > MAX_JSON_ITEMS {
                return Err(OperationsError::unsupported_content(format!(
                    "Too many JSON keys: {} (max: {MAX_JSON_ITEMS})",
                    map.len()
                )));
            }
            for val in map.values() {
                validate_json_depth(val, current_depth + 1, max_depth)?;
            }
        }
        Value::Array(arr) => {
            if arr.len() > MAX_JSON_ITEMS {
                return Err(OperationsError::unsupported_content(format!(
                    "JSON array too large: {} items (max: {MAX_JSON_ITEMS})",
                    arr.len()
                )));
            }
            for item in arr {
                validate_json_depth(item, current_depth + 1, max_depth)?;
            }
        }
        Value::String(s) => {
            if s.len() > MAX_JSON_STRING_LENGTH {
                return Err(OperationsError::unsupported_content(format!(
                    "JSON string too long: {} chars (max: {MAX_JSON_STRING_LENGTH})",
                    s.len()
                )));
            }
        }
        _ => {} // Numbers, booleans, null are always safe
    }

    Ok(())
}
