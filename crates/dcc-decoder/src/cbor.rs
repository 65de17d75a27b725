//! Depth-limited CBOR decoding and small `Value` helpers shared by the
//! envelope and payload stages.

use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};
use ciborium::value::Value;

/// Decode exactly one CBOR item from `bytes`.
///
/// Nesting beyond `max_depth` fails with `LimitNestingDepth`; any other
/// failure, including bytes left over after the item, uses `malformed`.
pub(crate) fn decode_item(
    bytes: &[u8],
    max_depth: usize,
    stage: Stage,
    malformed: ErrorCode,
) -> DecodeResult<Value> {
    let mut reader = bytes;
    let value: Value = ciborium::de::from_reader_with_recursion_limit(&mut reader, max_depth)
        .map_err(|e| match e {
            ciborium::de::Error::RecursionLimitExceeded => DecodeError::new(
                stage,
                ErrorCode::LimitNestingDepth,
                format!("CBOR nesting exceeds depth {}", max_depth),
            ),
            other => DecodeError::new(stage, malformed, format!("invalid CBOR: {}", other))
                .with_source(other),
        })?;

    if !reader.is_empty() {
        return Err(DecodeError::new(
            stage,
            malformed,
            format!("{} unexpected bytes after CBOR item", reader.len()),
        ));
    }

    Ok(value)
}

/// Whether `key` is the integer `label`.
pub(crate) fn is_int_key(key: &Value, label: i64) -> bool {
    matches!(key, Value::Integer(i) if i128::from(*i) == i128::from(label))
}

/// Whether `key` is the text `label`.
pub(crate) fn is_text_key(key: &Value, label: &str) -> bool {
    matches!(key, Value::Text(t) if t == label)
}

/// Look up an integer-keyed entry in a CBOR map.
pub(crate) fn int_entry(entries: &[(Value, Value)], label: i64) -> Option<&Value> {
    entries
        .iter()
        .find(|(k, _)| is_int_key(k, label))
        .map(|(_, v)| v)
}

/// Short name of a value's CBOR kind, for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Integer(_) => "integer",
        Value::Bytes(_) => "byte string",
        Value::Float(_) => "float",
        Value::Text(_) => "text",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        Value::Tag(_, _) => "tag",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        _ => "unknown",
    }
}
