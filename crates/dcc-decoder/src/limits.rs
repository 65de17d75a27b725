//! Resource limits for token decoding.
//!
//! A QR-sized token never legitimately needs more than a few kilobytes at
//! any stage; the defaults leave generous headroom while keeping a hostile
//! zlib stream from inflating without bound.

use serde::Deserialize;

/// Resource limits applied across the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum length of the prefixed token text, in bytes.
    pub max_token_bytes: usize,
    /// Maximum Base45-decoded (still compressed) size.
    pub max_compressed_bytes: usize,
    /// Maximum decompressed size.
    pub max_decode_bytes: u64,
    /// Maximum CBOR nesting depth for both decode passes.
    pub max_cbor_depth: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_token_bytes: 8 * 1024,
            max_compressed_bytes: 8 * 1024,
            max_decode_bytes: 64 * 1024,
            max_cbor_depth: 32,
        }
    }
}

/// Partial overrides for `DecodeLimits`. Used for CLI/config JSON parsing.
/// Unknown keys cause deserialization to fail (deny_unknown_fields).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeLimitsOverrides {
    pub max_token_bytes: Option<usize>,
    pub max_compressed_bytes: Option<usize>,
    pub max_decode_bytes: Option<u64>,
    pub max_cbor_depth: Option<usize>,
}

impl DecodeLimits {
    /// Apply overrides onto these limits. Only `Some` values override.
    pub fn apply(self, overrides: DecodeLimitsOverrides) -> Self {
        Self {
            max_token_bytes: overrides.max_token_bytes.unwrap_or(self.max_token_bytes),
            max_compressed_bytes: overrides
                .max_compressed_bytes
                .unwrap_or(self.max_compressed_bytes),
            max_decode_bytes: overrides.max_decode_bytes.unwrap_or(self.max_decode_bytes),
            max_cbor_depth: overrides.max_cbor_depth.unwrap_or(self.max_cbor_depth),
        }
    }

    /// Limits that never trigger. For trusted inputs and tests only.
    pub fn unbounded() -> Self {
        Self {
            max_token_bytes: usize::MAX,
            max_compressed_bytes: usize::MAX,
            max_decode_bytes: u64::MAX,
            max_cbor_depth: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_overrides_some() {
        let overrides: DecodeLimitsOverrides =
            serde_json::from_str(r#"{"max_decode_bytes": 1024}"#).unwrap();
        let limits = DecodeLimits::default().apply(overrides);

        assert_eq!(limits.max_decode_bytes, 1024);
        assert_eq!(
            limits.max_token_bytes,
            DecodeLimits::default().max_token_bytes
        );
        assert_eq!(limits.max_cbor_depth, DecodeLimits::default().max_cbor_depth);
    }

    #[test]
    fn test_overrides_reject_unknown_keys() {
        let result = serde_json::from_str::<DecodeLimitsOverrides>(r#"{"max_events": 3}"#);
        assert!(result.is_err());
    }
}
