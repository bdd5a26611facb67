use crate::error::{OwidError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Returns true if a URL or path names a gzip-compressed snapshot.
pub fn is_gzip_path(path: &str) -> bool {
    let without_query = path.split(['?', '#']).next().unwrap_or(path);
    without_query.ends_with(".gz")
}

/// Decompress a gzip buffer.
pub fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| OwidError::Decompression(e.to_string()))?;
    Ok(out)
}

/// Compress a buffer with gzip at the default level.
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|e| OwidError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| OwidError::Compression(e.to_string()))
}

/// Turn a response body into CSV text, gunzipping it first when `gzipped`.
pub fn decode_body(bytes: Vec<u8>, gzipped: bool) -> Result<String> {
    let raw = if gzipped { gunzip(&bytes)? } else { bytes };
    String::from_utf8(raw).map_err(|e| OwidError::Encoding(e.to_string()))
}
