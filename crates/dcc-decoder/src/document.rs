//! Inner payload: the CWT claim map carrying the health certificate.

use crate::cbor::{self, int_entry};
use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};
use crate::limits::DecodeLimits;
use chrono::{DateTime, Utc};
use ciborium::value::Value;
use serde::Serialize;

/// Claim key of the health certificate container.
pub const HCERT_CLAIM: i64 = -260;
/// Key of the certificate body inside the container.
pub const HCERT_BODY: i64 = 1;

/// Registered CWT claim keys (RFC 8392 section 3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimKey {
    Issuer = 1,
    Subject = 2,
    Audience = 3,
    Expiration = 4,
    NotBefore = 5,
    IssuedAt = 6,
    CwtId = 7,
}

/// Decoded payload map, keys in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateDocument {
    entries: Vec<(Value, Value)>,
}

/// Decode the envelope payload into a claim map.
pub fn decode_payload(bytes: &[u8], limits: &DecodeLimits) -> DecodeResult<CertificateDocument> {
    let value = cbor::decode_item(
        bytes,
        limits.max_cbor_depth,
        Stage::Payload,
        ErrorCode::MalformedPayload,
    )?;
    match value {
        Value::Map(entries) => Ok(CertificateDocument { entries }),
        other => Err(DecodeError::new(
            Stage::Payload,
            ErrorCode::MalformedPayload,
            format!("payload is {}, not a map", cbor::kind(&other)),
        )),
    }
}

impl CertificateDocument {
    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    /// Raw value of an integer-keyed entry.
    pub fn get(&self, key: i64) -> Option<&Value> {
        int_entry(&self.entries, key)
    }

    pub fn claim(&self, key: ClaimKey) -> Option<&Value> {
        self.get(key as i64)
    }

    pub fn issuer(&self) -> Option<&str> {
        match self.claim(ClaimKey::Issuer)? {
            Value::Text(iss) => Some(iss),
            _ => None,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claim(ClaimKey::Expiration).and_then(numeric_date)
    }

    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.claim(ClaimKey::NotBefore).and_then(numeric_date)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.claim(ClaimKey::IssuedAt).and_then(numeric_date)
    }

    /// The certificate body map under `-260` / `1`.
    ///
    /// An array container is read at index 0.
    pub fn hcert_body(&self) -> DecodeResult<&[(Value, Value)]> {
        let container = self.get(HCERT_CLAIM).ok_or_else(|| {
            DecodeError::new(
                Stage::Certificate,
                ErrorCode::UnrecognizedSchema,
                format!("payload has no health certificate claim ({})", HCERT_CLAIM),
            )
        })?;
        let body = match container {
            Value::Map(entries) => int_entry(entries, HCERT_BODY),
            Value::Array(items) => items.first(),
            _ => {
                return Err(DecodeError::invalid_field(
                    &HCERT_CLAIM.to_string(),
                    "a map",
                ))
            }
        };
        match body {
            Some(Value::Map(entries)) => Ok(entries),
            Some(_) => Err(DecodeError::invalid_field(
                &format!("{}.{}", HCERT_CLAIM, HCERT_BODY),
                "a map",
            )),
            None => Err(DecodeError::new(
                Stage::Certificate,
                ErrorCode::UnrecognizedSchema,
                "health certificate claim has no body",
            )),
        }
    }

    /// Typed view of the registered claims, for display.
    pub fn claim_summary(&self) -> ClaimSummary {
        let text = |key| match self.claim(key) {
            Some(Value::Text(t)) => Some(t.clone()),
            _ => None,
        };
        ClaimSummary {
            issuer: text(ClaimKey::Issuer),
            subject: text(ClaimKey::Subject),
            audience: text(ClaimKey::Audience),
            expires_at: self.expires_at(),
            not_before: self.not_before(),
            issued_at: self.issued_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

// NumericDate: seconds since the epoch, integer or float.
fn numeric_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Integer(secs) => DateTime::from_timestamp(i64::try_from(*secs).ok()?, 0),
        Value::Float(secs) if secs.is_finite() => {
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9) as u32;
            DateTime::from_timestamp(whole as i64, nanos)
        }
        _ => None,
    }
}
