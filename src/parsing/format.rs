//! Input compression detection and decoding.
//!
//! Rivet can write YODA output gzip-compressed (`.yoda.gz`). Compression is
//! detected from the gzip magic bytes, not the file name, so misnamed files
//! are still read correctly.

use std::io::Read;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::parsing::yoda::ParseError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compression applied to an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    /// Detect compression from the leading bytes of the file
    #[must_use]
    pub fn detect(path: &Path, head: &[u8]) -> Self {
        if head.starts_with(&GZIP_MAGIC) {
            return Self::Gzip;
        }
        let is_gz_name = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
        if is_gz_name {
            debug!(path = %path.display(), "File has .gz extension but no gzip header");
        }
        Self::None
    }
}

/// Read a possibly compressed text file into memory
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed, or
/// `ParseError::InvalidFormat` if the content is not UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    let bytes = std::fs::read(path)?;
    let compression = Compression::detect(path, &bytes);
    debug!(path = %path.display(), ?compression, bytes = bytes.len(), "Read input file");
    decode_text(&bytes, compression)
}

/// Decode raw bytes into text according to `compression`
///
/// # Errors
///
/// Returns `ParseError::Io` on a corrupt gzip stream, or
/// `ParseError::InvalidFormat` if the content is not UTF-8 text.
pub fn decode_text(bytes: &[u8], compression: Compression) -> Result<String, ParseError> {
    match compression {
        Compression::Gzip => {
            let mut text = String::new();
            MultiGzDecoder::new(bytes).read_to_string(&mut text)?;
            Ok(text)
        }
        Compression::None => String::from_utf8(bytes.to_vec()).map_err(|e| {
            ParseError::InvalidFormat(format!(
                "File is not UTF-8 text (invalid byte at offset {})",
                e.utf8_error().valid_up_to()
            ))
        }),
    }
}
