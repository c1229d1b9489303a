//! zlib compression of the payload text.

use std::io::{self, Read as _, Write as _};

use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};

/// DEFLATE `input` at the default level inside zlib framing (header and Adler-32
/// trailer).
///
/// # Errors
///
/// Returns the encoder's I/O error. Writing into memory does not fail in practice.
pub fn compress(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(input.len()), Compression::default());

    encoder.write_all(input)?;
    encoder.finish()
}

/// Inflate a zlib stream produced by [`compress`].
///
/// # Errors
///
/// Returns an error when `input` is not a complete zlib stream.
pub fn decompress(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(input);
    let mut output = Vec::new();

    decoder.read_to_end(&mut output)?;

    Ok(output)
}
