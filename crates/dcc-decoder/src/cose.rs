//! COSE_Sign1 envelope (RFC 9052 section 4.2).
//!
//! The envelope is parsed structurally only. Signatures are not checked;
//! [`SignedEnvelope::canonical_signature_input`] yields the bytes a verifier
//! would hash.

use crate::cbor::{self, int_entry};
use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};
use crate::limits::DecodeLimits;
use ciborium::value::Value;

/// CBOR tag for COSE_Sign1.
pub const COSE_SIGN1_TAG: u64 = 18;

const HEADER_ALG: i64 = 1;
const HEADER_KID: i64 = 4;

/// A structurally valid COSE_Sign1 message.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedEnvelope {
    tag: Option<u64>,
    protected: Vec<u8>,
    unprotected: Vec<(Value, Value)>,
    payload: Vec<u8>,
    signature: Vec<u8>,
}

/// Parse decompressed bytes as a COSE_Sign1 message.
///
/// A leading CBOR tag is accepted whatever its number; it is recorded but
/// not required to be 18.
pub fn decode_envelope(bytes: &[u8], limits: &DecodeLimits) -> DecodeResult<SignedEnvelope> {
    let value = cbor::decode_item(
        bytes,
        limits.max_cbor_depth,
        Stage::Envelope,
        ErrorCode::MalformedEnvelope,
    )?;

    let (tag, inner) = match value {
        Value::Tag(tag, inner) => (Some(tag), *inner),
        other => (None, other),
    };
    if let Some(tag) = tag.filter(|t| *t != COSE_SIGN1_TAG) {
        tracing::debug!(tag, "envelope carries an unexpected CBOR tag");
    }

    let items = match inner {
        Value::Array(items) => items,
        other => {
            return Err(malformed(format!(
                "expected a 4-element array, found {}",
                cbor::kind(&other)
            )))
        }
    };
    let [protected, unprotected, payload, signature]: [Value; 4] =
        items.try_into().map_err(|items: Vec<Value>| {
            malformed(format!("expected 4 elements, found {}", items.len()))
        })?;

    Ok(SignedEnvelope {
        tag,
        protected: expect_bytes(protected, "protected header")?,
        unprotected: match unprotected {
            Value::Map(entries) => entries,
            other => {
                return Err(malformed(format!(
                    "unprotected header is {}, not a map",
                    cbor::kind(&other)
                )))
            }
        },
        payload: expect_bytes(payload, "payload")?,
        signature: expect_bytes(signature, "signature")?,
    })
}

impl SignedEnvelope {
    /// The CBOR tag wrapping the message, if any.
    pub fn tag(&self) -> Option<u64> {
        self.tag
    }

    /// Serialized protected header, exactly as received.
    pub fn protected_bytes(&self) -> &[u8] {
        &self.protected
    }

    pub fn unprotected(&self) -> &[(Value, Value)] {
        &self.unprotected
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Decoded protected header map. Empty when the header is a zero-length
    /// byte string or does not decode to a map.
    pub fn protected_header(&self) -> Vec<(Value, Value)> {
        if self.protected.is_empty() {
            return Vec::new();
        }
        match cbor::decode_item(
            &self.protected,
            DecodeLimits::default().max_cbor_depth,
            Stage::Envelope,
            ErrorCode::MalformedEnvelope,
        ) {
            Ok(Value::Map(entries)) => entries,
            Ok(_) | Err(_) => {
                tracing::debug!("protected header is not a CBOR map");
                Vec::new()
            }
        }
    }

    /// Signature algorithm (header label 1), protected bucket first.
    pub fn algorithm(&self) -> Option<i64> {
        match self.header_param(HEADER_ALG)? {
            Value::Integer(alg) => i64::try_from(alg).ok(),
            _ => None,
        }
    }

    /// Key identifier (header label 4), protected bucket first.
    pub fn key_id(&self) -> Option<Vec<u8>> {
        match self.header_param(HEADER_KID)? {
            Value::Bytes(kid) => Some(kid),
            _ => None,
        }
    }

    fn header_param(&self, label: i64) -> Option<Value> {
        let protected = self.protected_header();
        int_entry(&protected, label)
            .or_else(|| int_entry(&self.unprotected, label))
            .cloned()
    }

    /// Deterministic encoding of
    /// `["Signature1", protected, unprotected, payload]`.
    pub fn canonical_signature_input(&self) -> DecodeResult<Vec<u8>> {
        let structure = Value::Array(vec![
            Value::Text("Signature1".to_string()),
            Value::Bytes(self.protected.clone()),
            Value::Map(self.unprotected.clone()),
            Value::Bytes(self.payload.clone()),
        ]);
        let mut out = Vec::with_capacity(self.protected.len() + self.payload.len() + 32);
        ciborium::ser::into_writer(&structure, &mut out).map_err(|e| {
            malformed(format!("cannot encode signature structure: {}", e)).with_source(e)
        })?;
        Ok(out)
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

fn expect_bytes(value: Value, what: &str) -> DecodeResult<Vec<u8>> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        other => Err(malformed(format!(
            "{} is {}, not a byte string",
            what,
            cbor::kind(&other)
        ))),
    }
}

fn malformed(message: String) -> DecodeError {
    DecodeError::new(Stage::Envelope, ErrorCode::MalformedEnvelope, message)
}
