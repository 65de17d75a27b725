pub mod decode;
pub mod inspect;

use crate::cli::args::{Cli, Command, GlobalArgs};
use crate::exit_codes;
use anyhow::{Context, Result};
use dcc_decoder::{DecodeError, DecodeLimits, DecodeLimitsOverrides, Decoder, ReferenceData};
use std::io::Read;
use std::sync::Arc;

pub fn dispatch(cli: Cli) -> Result<i32> {
    let decoder = build_decoder(&cli.global)?;
    match cli.cmd {
        Command::Decode(args) => decode::cmd_decode(&decoder, args),
        Command::Inspect(args) => inspect::cmd_inspect(&decoder, args),
    }
}

fn build_decoder(global: &GlobalArgs) -> Result<Decoder> {
    let limits = parse_limits(global.limits.as_deref())?;

    let reference = match &global.reference_dir {
        Some(dir) => ReferenceData::from_dir(dir)
            .with_context(|| format!("failed to load reference data from {}", dir.display()))?,
        None => ReferenceData::bundled().context("bundled reference data is corrupt")?,
    };
    tracing::debug!(?limits, lang = %global.lang, "decoder configured");

    Ok(Decoder::new(Arc::new(reference))
        .with_limits(limits)
        .with_language(global.lang.clone()))
}

/// `--limits` takes inline JSON or `@path` to a JSON file.
fn parse_limits(arg: Option<&str>) -> Result<DecodeLimits> {
    let Some(s) = arg else {
        return Ok(DecodeLimits::default());
    };
    let overrides = if let Some(path) = s.strip_prefix('@') {
        let path = path.trim();
        if path.is_empty() {
            anyhow::bail!("--limits @path: path cannot be empty");
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("limits file not found: {}", path))?;
        serde_json::from_str::<DecodeLimitsOverrides>(&content)
            .with_context(|| format!("invalid limits JSON in {}", path))?
    } else {
        serde_json::from_str::<DecodeLimitsOverrides>(s)
            .context("invalid --limits JSON (use --limits @path for a file)")?
    };
    Ok(DecodeLimits::default().apply(overrides))
}

/// Token from the argument, or from stdin when the argument is `-`.
/// Surrounding whitespace (a trailing newline from a QR scanner) is dropped.
pub(crate) fn read_token(arg: &str) -> Result<String> {
    let raw = if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read token from stdin")?;
        buf
    } else {
        arg.to_string()
    };
    Ok(raw.trim().to_string())
}

pub(crate) fn report_decode_error(err: &DecodeError) -> i32 {
    eprintln!("decode failed at {} stage [{}]: {}", err.stage, err.code, err.message);
    exit_codes::DECODE_FAILED
}

/// Conventional names for the COSE algorithms certificates are signed with.
pub(crate) fn algorithm_name(alg: i64) -> &'static str {
    match alg {
        -7 => "ES256",
        -35 => "ES384",
        -36 => "ES512",
        -37 => "PS256",
        -38 => "PS384",
        -39 => "PS512",
        -8 => "EdDSA",
        _ => "unknown",
    }
}
