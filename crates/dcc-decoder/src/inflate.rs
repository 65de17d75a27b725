//! zlib / raw DEFLATE decompression with an output bound.
//!
//! `flate2::read::ZlibDecoder` reports a truncated stream as a clean EOF, so
//! this drives `flate2::Decompress` directly and requires the end-of-stream
//! marker before returning.

use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};
use crate::limits::DecodeLimits;
use flate2::{Decompress, FlushDecompress, Status};

const CHUNK: usize = 16 * 1024;

/// Whether `data` starts with a valid 2-byte zlib header (RFC 1950).
pub fn has_zlib_header(data: &[u8]) -> bool {
    match data {
        [cmf, flg, ..] => {
            let method = cmf & 0x0f;
            let window = cmf >> 4;
            method == 8 && window <= 7 && ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0
        }
        _ => false,
    }
}

/// Decompress a zlib stream, or a raw DEFLATE stream when no zlib header is
/// present.
pub fn inflate(compressed: &[u8], limits: &DecodeLimits) -> DecodeResult<Vec<u8>> {
    if compressed.len() > limits.max_compressed_bytes {
        return Err(DecodeError::new(
            Stage::Inflate,
            ErrorCode::LimitCompressedBytes,
            format!(
                "compressed size {} exceeds limit {}",
                compressed.len(),
                limits.max_compressed_bytes
            ),
        ));
    }

    let zlib = has_zlib_header(compressed);
    let format = if zlib { "zlib" } else { "raw deflate" };
    let max_output = limits.max_decode_bytes;

    let mut inflater = Decompress::new(zlib);
    let initial = compressed
        .len()
        .saturating_mul(4)
        .min(usize::try_from(max_output).unwrap_or(usize::MAX));
    let mut out = Vec::with_capacity(initial);

    loop {
        if out.len() == out.capacity() {
            out.reserve(CHUNK);
        }
        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();

        let status = inflater
            .decompress_vec(&compressed[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| {
                DecodeError::new(
                    Stage::Inflate,
                    ErrorCode::DecompressionFailure,
                    format!("corrupt {} stream: {}", format, e),
                )
                .with_source(e)
            })?;

        if out.len() as u64 > max_output {
            return Err(DecodeError::new(
                Stage::Inflate,
                ErrorCode::LimitDecodeBytes,
                format!("decompressed size exceeds limit of {} bytes", max_output),
            ));
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let stalled =
                    inflater.total_in() as usize == consumed && inflater.total_out() == produced;
                if stalled && out.len() < out.capacity() {
                    return Err(DecodeError::new(
                        Stage::Inflate,
                        ErrorCode::DecompressionFailure,
                        format!(
                            "truncated {} stream after {} input bytes",
                            format,
                            inflater.total_in()
                        ),
                    ));
                }
            }
        }
    }

    let trailing = compressed.len() - inflater.total_in() as usize;
    if trailing > 0 {
        tracing::debug!(trailing, "ignoring bytes after end of {} stream", format);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{DeflateEncoder, ZlibEncoder};
    use flate2::Compression;
    use std::io::Write;

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::best());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn raw_deflate(data: &[u8]) -> Vec<u8> {
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_zlib_header_detection() {
        assert!(has_zlib_header(&[0x78, 0xda]));
        assert!(has_zlib_header(&[0x78, 0x9c]));
        assert!(has_zlib_header(&[0x78, 0x01]));
        assert!(!has_zlib_header(&[0x78, 0x00]));
        assert!(!has_zlib_header(&[0x78]));
        assert!(!has_zlib_header(&[]));
        assert!(has_zlib_header(&zlib(b"payload")));
    }

    #[test]
    fn test_inflates_zlib() {
        let data = b"a signed envelope, more or less".repeat(20);
        let out = inflate(&zlib(&data), &DecodeLimits::default()).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_inflates_raw_deflate() {
        let data = b"headerless stream".repeat(10);
        let compressed = raw_deflate(&data);
        assert!(!has_zlib_header(&compressed));
        assert_eq!(inflate(&compressed, &DecodeLimits::default()).unwrap(), data);
    }

    #[test]
    fn test_rejects_truncated_stream() {
        let compressed = zlib(&b"0123456789".repeat(100));
        let truncated = &compressed[..compressed.len() - 8];
        let err = inflate(truncated, &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DecompressionFailure);
        assert_eq!(err.stage, Stage::Inflate);
    }

    #[test]
    fn test_rejects_empty_input() {
        let err = inflate(&[], &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DecompressionFailure);
    }

    #[test]
    fn test_rejects_corrupt_checksum() {
        let mut compressed = zlib(b"checksummed content");
        let last = compressed.len() - 1;
        compressed[last] ^= 0xff;
        let err = inflate(&compressed, &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DecompressionFailure);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = inflate(&[0x78, 0xda, 0xff, 0xff, 0xff, 0xff], &DecodeLimits::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DecompressionFailure);
    }

    #[test]
    fn test_decompression_bomb_is_bounded() {
        let bomb = zlib(&vec![0u8; 4 * 1024 * 1024]);
        assert!(bomb.len() < DecodeLimits::default().max_compressed_bytes);

        let err = inflate(&bomb, &DecodeLimits::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::LimitDecodeBytes);
        assert!(err.is_limit());
    }

    #[test]
    fn test_output_exactly_at_limit_is_accepted() {
        let data = vec![7u8; 100];
        let limits = DecodeLimits {
            max_decode_bytes: 100,
            ..DecodeLimits::default()
        };
        assert_eq!(inflate(&zlib(&data), &limits).unwrap(), data);

        let limits = DecodeLimits {
            max_decode_bytes: 99,
            ..DecodeLimits::default()
        };
        let err = inflate(&zlib(&data), &limits).unwrap_err();
        assert_eq!(err.code, ErrorCode::LimitDecodeBytes);
    }

    #[test]
    fn test_compressed_size_limit() {
        let limits = DecodeLimits {
            max_compressed_bytes: 4,
            ..DecodeLimits::default()
        };
        let err = inflate(&zlib(b"more than four bytes"), &limits).unwrap_err();
        assert_eq!(err.code, ErrorCode::LimitCompressedBytes);
    }
}
