//! Error model for the decode pipeline.
//!
//! Every failure carries the [`Stage`] that produced it and a stable
//! [`ErrorCode`]. Codes are part of the public contract: callers (and the
//! CLI) match on them, messages are for humans only.

use serde::Serialize;

/// Pipeline stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// `HC1:` prefix check.
    Prefix,
    /// Base45 text decoding.
    Base45,
    /// zlib / raw DEFLATE decompression.
    Inflate,
    /// Outer COSE_Sign1 structure.
    Envelope,
    /// Inner CBOR payload (claim map).
    Payload,
    /// Health certificate body resolution.
    Certificate,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Stable error codes for decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    // Format
    UnsupportedFormat,
    InvalidEncoding,
    DecompressionFailure,
    MalformedEnvelope,
    MalformedPayload,
    // Certificate body
    UnrecognizedSchema,
    UnknownCertificateVariant,
    AmbiguousCertificateVariant,
    MissingField,
    InvalidField,
    InvalidTimestamp,
    // Limits
    LimitInputBytes,
    LimitCompressedBytes,
    LimitDecodeBytes,
    LimitNestingDepth,
}

impl ErrorCode {
    pub fn is_limit(self) -> bool {
        matches!(
            self,
            Self::LimitInputBytes
                | Self::LimitCompressedBytes
                | Self::LimitDecodeBytes
                | Self::LimitNestingDepth
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Typed decode error with stable code.
#[derive(Debug, thiserror::Error)]
#[error("{stage}: {message} ({code})")]
pub struct DecodeError {
    pub stage: Stage,
    pub code: ErrorCode,
    pub message: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl DecodeError {
    pub fn new(stage: Stage, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            stage,
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.message = format!("{}: {}", context.into(), self.message);
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn is_limit(&self) -> bool {
        self.code.is_limit()
    }

    pub(crate) fn missing_field(path: &str) -> Self {
        Self::new(
            Stage::Certificate,
            ErrorCode::MissingField,
            format!("required field '{}' is absent", path),
        )
    }

    pub(crate) fn invalid_field(path: &str, expected: &str) -> Self {
        Self::new(
            Stage::Certificate,
            ErrorCode::InvalidField,
            format!("field '{}' is not {}", path, expected),
        )
    }
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
