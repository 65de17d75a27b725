//! Base45 codec (RFC 9285).
//!
//! Every 2 input bytes become 3 characters, least significant digit first;
//! a trailing single byte becomes 2 characters.

use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};

/// Base45 alphabet, indexed by digit value.
pub const ALPHABET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

const INVALID: u8 = 0xff;

const fn build_reverse_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static REVERSE: [u8; 256] = build_reverse_table();

/// Decode Base45 text into bytes.
pub fn decode(encoded: &str) -> DecodeResult<Vec<u8>> {
    let input = encoded.as_bytes();
    if input.len() % 3 == 1 {
        return Err(DecodeError::new(
            Stage::Base45,
            ErrorCode::InvalidEncoding,
            format!(
                "input length {} leaves a dangling single character",
                input.len()
            ),
        ));
    }

    let mut out = Vec::with_capacity(input.len() / 3 * 2 + 1);
    for (chunk_idx, chunk) in input.chunks(3).enumerate() {
        let offset = chunk_idx * 3;
        let mut digits = [0u32; 3];
        for (i, &c) in chunk.iter().enumerate() {
            digits[i] = u32::from(digit(c, offset + i, encoded)?);
        }
        let value = digits[0] + digits[1] * 45 + digits[2] * 45 * 45;

        if chunk.len() == 3 {
            if value > 0xffff {
                return Err(overflow(offset, value));
            }
            out.extend_from_slice(&(value as u16).to_be_bytes());
        } else {
            if value > 0xff {
                return Err(overflow(offset, value));
            }
            out.push(value as u8);
        }
    }

    Ok(out)
}

/// Encode bytes as Base45 text.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(2) * 3);
    for pair in data.chunks(2) {
        let (mut value, width) = match *pair {
            [hi, lo] => (u32::from(u16::from_be_bytes([hi, lo])), 3),
            [single] => (u32::from(single), 2),
            _ => unreachable!("chunks(2) yields one or two bytes"),
        };
        for _ in 0..width {
            out.push(ALPHABET[(value % 45) as usize] as char);
            value /= 45;
        }
    }
    out
}

fn digit(c: u8, position: usize, encoded: &str) -> DecodeResult<u8> {
    match REVERSE[c as usize] {
        INVALID => {
            let shown = encoded
                .get(position..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            Err(DecodeError::new(
                Stage::Base45,
                ErrorCode::InvalidEncoding,
                format!("character {:?} at position {} is not in the alphabet", shown, position),
            ))
        }
        d => Ok(d),
    }
}

fn overflow(offset: usize, value: u32) -> DecodeError {
    DecodeError::new(
        Stage::Base45,
        ErrorCode::InvalidEncoding,
        format!("chunk at position {} overflows: value {}", offset, value),
    )
}
