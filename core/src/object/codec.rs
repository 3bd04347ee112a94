//! Canonical byte encoding of objects, plus the hashing and compression
//! primitives every storage layer shares.
//!
//! An object's canonical encoding is `"<kind> <length>\0<body>"`. Its ID is
//! the SHA-1 of that encoding; what lands in storage is the zlib-compressed
//! encoding.

use std::collections::TryReserveError;
use std::io::{self, Write};
use std::str;

use flate2::{
    write::ZlibEncoder, Compression, Decompress, DecompressError, FlushDecompress, Status,
};
use sha1::{Digest, Sha1};
use thiserror::Error;

use super::{Id, Kind, ID_LEN};

/// Describes why compressed object bytes could not be inflated.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The compressed stream ended before the final block.
    #[error("compressed data is truncated")]
    Truncated,

    /// The stream inflated fully but its Adler-32 checksum didn't match.
    #[error("compressed data failed checksum verification")]
    ChecksumMismatch,

    /// The stream is not valid zlib data.
    #[error("compressed data is corrupt: {0}")]
    BadData(String),

    /// The output buffer could not be grown far enough.
    #[error("out of memory while decompressing")]
    OutOfMemory,

    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl From<TryReserveError> for CodecError {
    fn from(_: TryReserveError) -> Self {
        CodecError::OutOfMemory
    }
}

/// Describes why an uncompressed canonical encoding could not be decoded.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ObjectError {
    #[error("object header has no NUL terminator")]
    MissingNul,

    #[error("object header has no space between kind and length")]
    MissingSpace,

    #[error("unknown object kind `{0}`")]
    UnknownKind(String),

    #[error("object header has invalid length `{0}`")]
    BadLength(String),

    #[error("object header declares {declared} bytes but body has {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}

/// Computes the SHA-1 of `bytes` and returns it as an object ID.
pub fn hash(bytes: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    digest_to_id(hasher)
}

pub(crate) fn digest_to_id(hasher: Sha1) -> Id {
    let mut id = [0u8; ID_LEN];
    id.copy_from_slice(hasher.finalize().as_slice());
    Id::from_digest(id)
}

/// Returns the canonical header `"<kind> <length>\0"`.
///
/// `length` is the byte length of the body alone.
pub fn encode_header(kind: Kind, length: usize) -> Vec<u8> {
    let mut header = Vec::with_capacity(kind.as_str().len() + 22);
    header.extend_from_slice(kind.as_str().as_bytes());
    header.push(b' ');
    header.extend_from_slice(length.to_string().as_bytes());
    header.push(0);
    header
}

/// Returns the complete canonical encoding of an object.
pub fn encode_object(kind: Kind, body: &[u8]) -> Vec<u8> {
    let mut encoded = encode_header(kind, body.len());
    encoded.extend_from_slice(body);
    encoded
}

/// Splits a canonical encoding into its kind and body.
///
/// Fails if the header is malformed or the declared length differs from
/// the number of bytes that follow the header.
pub fn decode_object(bytes: &[u8]) -> Result<(Kind, &[u8]), ObjectError> {
    let nul = bytes
        .iter()
        .position(|b| *b == 0)
        .ok_or(ObjectError::MissingNul)?;

    let (header, body) = (&bytes[..nul], &bytes[nul + 1..]);

    let space = header
        .iter()
        .position(|b| *b == b' ')
        .ok_or(ObjectError::MissingSpace)?;

    let (tag, length) = (&header[..space], &header[space + 1..]);

    let kind = Kind::from_tag(tag)
        .ok_or_else(|| ObjectError::UnknownKind(String::from_utf8_lossy(tag).into_owned()))?;

    let bad_length = || ObjectError::BadLength(String::from_utf8_lossy(length).into_owned());

    if length.is_empty() || (length.len() > 1 && length[0] == b'0') {
        return Err(bad_length());
    }

    let declared: usize = str::from_utf8(length)
        .ok()
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(bad_length)?;

    if declared != body.len() {
        return Err(ObjectError::LengthMismatch {
            declared,
            actual: body.len(),
        });
    }

    Ok((kind, body))
}

/// Compresses `bytes` as a zlib stream.
pub fn compress(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Inflates a zlib stream.
///
/// The expansion ratio is unknown in advance, so the output buffer starts
/// small and doubles whenever the decoder fills it. The decoder verifies
/// the zlib header and the trailing Adler-32 checksum.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut decoder = Decompress::new(true);
    let mut out: Vec<u8> = Vec::new();
    out.try_reserve(bytes.len().saturating_mul(2).max(64))?;

    loop {
        let consumed = decoder.total_in() as usize;
        let status = decoder
            .decompress_vec(&bytes[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(decompress_error)?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                if out.len() < out.capacity() {
                    // The decoder stopped with room left to write:
                    // it ran out of input before the end of the stream.
                    return Err(CodecError::Truncated);
                }
                let grow = out.capacity();
                out.try_reserve(grow)?;
            }
        }
    }
}

fn decompress_error(err: DecompressError) -> CodecError {
    match err.message() {
        Some("incorrect data check") => CodecError::ChecksumMismatch,
        _ => CodecError::BadData(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_known_values() {
        assert_eq!(
            hash(b"blob 2\0hi").to_string(),
            "32f95c0d1244a78b2be1bab8de17906fabb2c4a8"
        );

        // $ echo 'test content' | git hash-object --stdin
        assert_eq!(
            hash(b"blob 13\0test content\n").to_string(),
            "d670460b4b4aece5915caf5c68d12f560a9fe3e4"
        );
    }

    #[test]
    fn header() {
        assert_eq!(encode_header(Kind::Blob, 2), b"blob 2\0".to_vec());
        assert_eq!(encode_header(Kind::Tree, 0), b"tree 0\0".to_vec());
        assert_eq!(encode_header(Kind::Commit, 1234), b"commit 1234\0".to_vec());
    }

    #[test]
    fn decode_round_trip() {
        for (kind, body) in &[
            (Kind::Blob, &b"hi"[..]),
            (Kind::Blob, &b""[..]),
            (Kind::Blob, &b"embedded\0nul"[..]),
            (Kind::Tree, &b"100644 a\0"[..]),
            (Kind::Commit, &b"tree x\n"[..]),
        ] {
            let encoded = encode_object(*kind, body);
            let (k, b) = decode_object(&encoded).unwrap();
            assert_eq!(k, *kind);
            assert_eq!(b, *body);
        }
    }

    #[test]
    fn decode_errors() {
        assert_eq!(decode_object(b"blob 2").unwrap_err(), ObjectError::MissingNul);
        assert_eq!(decode_object(b"blob2\0hi").unwrap_err(), ObjectError::MissingSpace);
        assert_eq!(
            decode_object(b"tag 2\0hi").unwrap_err(),
            ObjectError::UnknownKind("tag".to_string())
        );
        assert_eq!(
            decode_object(b"blob x\0hi").unwrap_err(),
            ObjectError::BadLength("x".to_string())
        );
        assert_eq!(
            decode_object(b"blob \0").unwrap_err(),
            ObjectError::BadLength("".to_string())
        );
        assert_eq!(
            decode_object(b"blob 02\0hi").unwrap_err(),
            ObjectError::BadLength("02".to_string())
        );
        assert_eq!(
            decode_object(b"blob +2\0hi").unwrap_err(),
            ObjectError::BadLength("+2".to_string())
        );
        assert_eq!(
            decode_object(b"blob 3\0hi").unwrap_err(),
            ObjectError::LengthMismatch {
                declared: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn compression_round_trip() {
        let small = b"hello".to_vec();
        assert_eq!(decompress(&compress(&small).unwrap()).unwrap(), small);

        let empty: Vec<u8> = Vec::new();
        assert_eq!(decompress(&compress(&empty).unwrap()).unwrap(), empty);

        // Highly compressible content forces the output buffer to grow
        // well past its initial size.
        let large = "foobar".repeat(100_000).into_bytes();
        let compressed = compress(&large).unwrap();
        assert!(compressed.len() * 100 < large.len());
        assert_eq!(decompress(&compressed).unwrap(), large);
    }

    #[test]
    fn decompress_truncated() {
        let compressed = compress(&"abcdef".repeat(1000).into_bytes()).unwrap();
        let truncated = &compressed[..compressed.len() / 2];

        match decompress(truncated).unwrap_err() {
            CodecError::Truncated => (),
            err => panic!("unexpected error {:?}", err),
        }

        match decompress(&[]).unwrap_err() {
            CodecError::Truncated => (),
            err => panic!("unexpected error {:?}", err),
        }
    }

    #[test]
    fn decompress_checksum_mismatch() {
        let mut compressed = compress(b"some content worth checking").unwrap();
        let last = compressed.len() - 1;
        compressed[last] ^= 0xff;

        match decompress(&compressed).unwrap_err() {
            CodecError::ChecksumMismatch => (),
            err => panic!("unexpected error {:?}", err),
        }
    }

    #[test]
    fn decompress_rejects_raw_deflate() {
        // A valid zlib stream with its two header bytes removed.
        let compressed = compress(b"headerless").unwrap();

        match decompress(&compressed[2..]).unwrap_err() {
            CodecError::BadData(_) => (),
            err => panic!("unexpected error {:?}", err),
        }
    }

    #[test]
    fn decompress_garbage() {
        match decompress(b"sand in the gears").unwrap_err() {
            CodecError::BadData(_) => (),
            err => panic!("unexpected error {:?}", err),
        }
    }
}
