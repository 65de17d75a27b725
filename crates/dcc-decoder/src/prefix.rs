//! Prefix splitting: `HC1:<base45>` into tag and body.

use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};

/// The only supported format/version tag.
pub const HC1_TAG: &str = "HC1";

/// A token split into its type tag and encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedToken<'a> {
    pub type_tag: &'a str,
    pub encoded_body: &'a str,
}

/// Split a prefixed token.
///
/// Characters 0..3 are the tag, character 3 is the separator (not checked),
/// the rest is the body. Only the tag is validated here; the body is left
/// to the Base45 decoder.
pub fn split_prefix(input: &str) -> DecodeResult<EncodedToken<'_>> {
    let mut boundaries = input.char_indices().map(|(i, _)| i).chain([input.len()]);
    let tag_end = boundaries.nth(3).unwrap_or(input.len());
    let body_start = boundaries.next().unwrap_or(input.len());

    let token = EncodedToken {
        type_tag: &input[..tag_end],
        encoded_body: &input[body_start..],
    };

    if token.type_tag != HC1_TAG {
        return Err(DecodeError::new(
            Stage::Prefix,
            ErrorCode::UnsupportedFormat,
            format!("certificate type '{}' is not supported", token.type_tag),
        ));
    }

    Ok(token)
}
