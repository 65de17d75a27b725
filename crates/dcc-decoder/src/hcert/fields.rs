//! Typed access to text-keyed CBOR maps, with field paths in errors.

use crate::cbor::{is_text_key, kind};
use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};
use ciborium::value::Value;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    path: &'a str,
    entries: &'a [(Value, Value)],
}

impl<'a> Fields<'a> {
    pub(crate) fn new(path: &'a str, entries: &'a [(Value, Value)]) -> Self {
        Self { path, entries }
    }

    pub(crate) fn path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Raw value; CBOR null counts as absent.
    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.entries
            .iter()
            .find(|(k, _)| is_text_key(k, key))
            .map(|(_, v)| v)
            .filter(|v| !v.is_null())
    }

    pub(crate) fn text(&self, key: &str) -> DecodeResult<&'a str> {
        self.opt_text(key)?
            .ok_or_else(|| DecodeError::missing_field(&self.path(key)))
    }

    pub(crate) fn opt_text(&self, key: &str) -> DecodeResult<Option<&'a str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Text(t)) => Ok(Some(t.as_str())),
            Some(other) => Err(self.wrong_kind(key, "text", other)),
        }
    }

    /// Optional text where an empty string also counts as absent.
    pub(crate) fn non_empty_text(&self, key: &str) -> DecodeResult<Option<&'a str>> {
        Ok(self.opt_text(key)?.filter(|t| !t.is_empty()))
    }

    pub(crate) fn uint(&self, key: &str) -> DecodeResult<u32> {
        match self.get(key) {
            None => Err(DecodeError::missing_field(&self.path(key))),
            Some(Value::Integer(i)) => u32::try_from(*i)
                .map_err(|_| DecodeError::invalid_field(&self.path(key), "an unsigned integer")),
            Some(other) => Err(self.wrong_kind(key, "an unsigned integer", other)),
        }
    }

    pub(crate) fn map(&self, key: &str) -> DecodeResult<&'a [(Value, Value)]> {
        match self.get(key) {
            None => Err(DecodeError::missing_field(&self.path(key))),
            Some(Value::Map(entries)) => Ok(entries.as_slice()),
            Some(other) => Err(self.wrong_kind(key, "a map", other)),
        }
    }

    /// Items of an array field; absent is `None`.
    pub(crate) fn opt_array(&self, key: &str) -> DecodeResult<Option<&'a [Value]>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.as_slice())),
            Some(other) => Err(self.wrong_kind(key, "an array", other)),
        }
    }

    fn wrong_kind(&self, key: &str, expected: &str, found: &Value) -> DecodeError {
        DecodeError::new(
            Stage::Certificate,
            ErrorCode::InvalidField,
            format!(
                "field '{}' is not {} (found {})",
                self.path(key),
                expected,
                kind(found)
            ),
        )
    }
}
