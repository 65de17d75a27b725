//! Decoder for EU Digital COVID Certificate QR payloads.
//!
//! A token such as `HC1:NCFOXN%TS3DH...` goes through five stages:
//!
//! 1. [`prefix`]: split off and check the `HC1` tag
//! 2. [`base45`]: Base45 text to bytes
//! 3. [`inflate`]: zlib (or raw DEFLATE) decompression, bounded
//! 4. [`cose`]: COSE_Sign1 envelope, then [`document`]: the CWT claim map
//! 5. [`hcert`]: the typed vaccination, test or recovery certificate
//!
//! [`Decoder`] runs all of them. Signatures are never verified.

pub mod base45;
pub(crate) mod cbor;
pub mod cose;
pub mod document;
pub mod error;
pub mod hcert;
pub mod inflate;
pub mod limits;
pub mod pipeline;
pub mod prefix;
pub mod reference;

pub use cose::{decode_envelope, SignedEnvelope};
pub use document::{decode_payload, CertificateDocument, ClaimKey, ClaimSummary};
pub use error::{DecodeError, DecodeResult, ErrorCode, Stage};
pub use hcert::{
    resolve_certificate, Certificate, CertificateKind, HealthCertificate, Person, RecoveryGroup,
    TestGroup, VaccinationGroup,
};
pub use limits::{DecodeLimits, DecodeLimitsOverrides};
pub use pipeline::{DecodedCertificate, Decoder, UnpackedToken, DEFAULT_LANGUAGE};
pub use reference::{
    RapidAntigenTestDevice, ReferenceData, ReferenceError, ReferenceLookup, ResolvedCode,
    ValueSetId,
};
