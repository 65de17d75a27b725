use super::{read_token, report_decode_error};
use crate::cli::args::DecodeArgs;
use crate::exit_codes;
use anyhow::{Context, Result};
use base64::Engine;
use dcc_decoder::{DecodedCertificate, Decoder};
use serde_json::json;

pub fn cmd_decode(decoder: &Decoder, args: DecodeArgs) -> Result<i32> {
    let token = read_token(&args.token)?;
    let decoded = match decoder.decode(&token) {
        Ok(decoded) => decoded,
        Err(e) => return Ok(report_decode_error(&e)),
    };

    let output = render(&decoded);
    let text = if args.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    }
    .context("failed to serialize certificate")?;
    println!("{}", text);

    Ok(exit_codes::OK)
}

fn render(decoded: &DecodedCertificate) -> serde_json::Value {
    let envelope = &decoded.envelope;
    json!({
        "certificate": decoded.certificate,
        "claims": decoded.document.claim_summary(),
        "envelope": {
            "tag": envelope.tag(),
            "algorithm": envelope.algorithm(),
            "key_id": envelope
                .key_id()
                .map(|kid| base64::engine::general_purpose::STANDARD.encode(kid)),
        },
    })
}
