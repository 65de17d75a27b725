//! Envelope and claim view of a token, for debugging scanner output.
//!
//! Stops before certificate resolution, so tokens with an unusual body can
//! still be examined.

use super::{algorithm_name, read_token, report_decode_error};
use crate::cli::args::InspectArgs;
use crate::exit_codes;
use anyhow::Result;
use base64::Engine;
use dcc_decoder::{decode_envelope, decode_payload, DecodeResult, Decoder};

pub fn cmd_inspect(decoder: &Decoder, args: InspectArgs) -> Result<i32> {
    let token = read_token(&args.token)?;
    match inspect(decoder, &token) {
        Ok(lines) => {
            for (label, value) in lines {
                println!("{:<14}{}", format!("{}:", label), value);
            }
            Ok(exit_codes::OK)
        }
        Err(e) => Ok(report_decode_error(&e)),
    }
}

fn inspect(decoder: &Decoder, token: &str) -> DecodeResult<Vec<(&'static str, String)>> {
    let unpacked = decoder.unpack(token)?;
    let envelope = decode_envelope(&unpacked.cbor, decoder.limits())?;
    let format = if unpacked.zlib { "zlib" } else { "raw deflate" };

    let claims = decode_payload(envelope.payload(), decoder.limits())?.claim_summary();
    let none = || "-".to_string();

    Ok(vec![
        ("type", unpacked.type_tag.clone()),
        ("token", format!("{} chars", token.len())),
        ("compressed", format!("{} bytes ({})", unpacked.compressed_len, format)),
        ("cose", format!("{} bytes", unpacked.cbor.len())),
        ("tag", envelope.tag().map_or_else(none, |t| t.to_string())),
        (
            "algorithm",
            envelope
                .algorithm()
                .map_or_else(none, |alg| format!("{} ({})", alg, algorithm_name(alg))),
        ),
        (
            "key id",
            envelope.key_id().map_or_else(none, |kid| {
                base64::engine::general_purpose::STANDARD.encode(kid)
            }),
        ),
        ("payload", format!("{} bytes", envelope.payload().len())),
        ("signature", format!("{} bytes", envelope.signature().len())),
        ("issuer", claims.issuer.unwrap_or_else(none)),
        ("issued at", claims.issued_at.map_or_else(none, |t| t.to_rfc3339())),
        ("not before", claims.not_before.map_or_else(none, |t| t.to_rfc3339())),
        ("expires", claims.expires_at.map_or_else(none, |t| t.to_rfc3339())),
        (
            "signed bytes",
            hex::encode(envelope.canonical_signature_input()?),
        ),
    ])
}
