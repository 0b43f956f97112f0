//! Strict JSON parsing for user-supplied documents and option values
//!
//! Parsing happens in two passes so a caller can tell text that is not JSON
//! at all ([`JsonFailure::Syntax`]) from JSON of the wrong structure
//! ([`JsonFailure::Shape`]). Neither pass panics; both come back as
//! [`Error::MalformedJson`] tagged with the field being parsed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::common::{Error, JsonFailure, Result};

/// Parse `text` as any JSON value.
pub fn parse_value(field: &'static str, text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| Error::malformed_json(field, JsonFailure::Syntax(e.to_string())))
}

/// Parse `text` into `T`, reporting syntax and structure problems separately.
pub fn parse<T: DeserializeOwned>(field: &'static str, text: &str) -> Result<T> {
    let value = parse_value(field, text)?;
    serde_json::from_value(value)
        .map_err(|e| Error::malformed_json(field, JsonFailure::Shape(e.to_string())))
}

/// Serialize `value` as compact JSON.
pub fn serialize<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Serialize `value` as indented JSON, for files people will read.
pub fn serialize_pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
