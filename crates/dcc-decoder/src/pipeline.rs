//! End-to-end decoding: token text to typed certificate.

use crate::cose::{decode_envelope, SignedEnvelope};
use crate::document::{decode_payload, CertificateDocument};
use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};
use crate::hcert::{resolve_certificate, Certificate};
use crate::limits::DecodeLimits;
use crate::reference::{ReferenceData, ReferenceError, ReferenceLookup};
use crate::{base45, inflate, prefix};
use std::sync::Arc;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Everything recovered from one token.
#[derive(Debug, Clone)]
pub struct DecodedCertificate {
    pub envelope: SignedEnvelope,
    pub document: CertificateDocument,
    pub certificate: Certificate,
}

/// Token body after the text stages: prefix checked, Base45 decoded and
/// inflated, ready for the envelope stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedToken {
    pub type_tag: String,
    pub compressed_len: usize,
    /// Whether the compressed body carried a zlib header (raw DEFLATE if not).
    pub zlib: bool,
    pub cbor: Vec<u8>,
}

/// Reusable decoder. Holds no per-call state; share it across threads
/// freely.
#[derive(Clone)]
pub struct Decoder {
    reference: Arc<dyn ReferenceLookup>,
    limits: DecodeLimits,
    lang: String,
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("limits", &self.limits)
            .field("lang", &self.lang)
            .finish_non_exhaustive()
    }
}

impl Decoder {
    pub fn new(reference: Arc<dyn ReferenceLookup>) -> Self {
        Self {
            reference,
            limits: DecodeLimits::default(),
            lang: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Decoder over the tables compiled into the crate.
    pub fn with_bundled_reference() -> Result<Self, ReferenceError> {
        Ok(Self::new(Arc::new(ReferenceData::bundled()?)))
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    pub fn reference(&self) -> &dyn ReferenceLookup {
        self.reference.as_ref()
    }

    /// Prefix, Base45 and inflate stages.
    pub fn unpack(&self, token: &str) -> DecodeResult<UnpackedToken> {
        if token.len() > self.limits.max_token_bytes {
            return Err(DecodeError::new(
                Stage::Prefix,
                ErrorCode::LimitInputBytes,
                format!(
                    "token length {} exceeds limit {}",
                    token.len(),
                    self.limits.max_token_bytes
                ),
            ));
        }

        let encoded = prefix::split_prefix(token)?;
        let compressed = base45::decode(encoded.encoded_body)?;
        let cbor = inflate::inflate(&compressed, &self.limits)?;
        tracing::debug!(
            compressed = compressed.len(),
            decompressed = cbor.len(),
            "inflated token body"
        );
        Ok(UnpackedToken {
            type_tag: encoded.type_tag.to_string(),
            compressed_len: compressed.len(),
            zlib: inflate::has_zlib_header(&compressed),
            cbor,
        })
    }

    /// Prefix, Base45, inflate and envelope stages only.
    pub fn decode_envelope(&self, token: &str) -> DecodeResult<SignedEnvelope> {
        let unpacked = self.unpack(token)?;
        decode_envelope(&unpacked.cbor, &self.limits)
    }

    /// Decode a prefixed token into its envelope, claims and typed
    /// certificate. Stages run in order; the first failure is returned.
    pub fn decode(&self, token: &str) -> DecodeResult<DecodedCertificate> {
        let envelope = self.decode_envelope(token)?;
        let document = decode_payload(envelope.payload(), &self.limits)?;
        let certificate = resolve_certificate(&document, self.reference.as_ref(), &self.lang)?;

        tracing::debug!(
            kind = %certificate.kind(),
            issuer = document.issuer().unwrap_or_default(),
            "decoded certificate"
        );
        Ok(DecodedCertificate {
            envelope,
            document,
            certificate,
        })
    }
}
