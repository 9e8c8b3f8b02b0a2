//! Compression helpers. Contains [compress], producing encoded variant of a
//! plain file at pack time.

use crate::common::{content_encoding::ContentEncoding, pack_path::PackPath};
use anyhow::{Context, Error};
use brotli::enc::BrotliEncoderParams;
use flate2::{Compression as GzipCompression, write::GzEncoder};
use std::io::{Cursor, Write};

/// Encoding used for files packed without encoded variant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Compression {
    /// Gzip, stored with `.gz` suffix.
    Gzip,
    /// Brotli, stored with `.br` suffix.
    Brotli,
}
impl Compression {
    /// [ContentEncoding] of compressed variant.
    pub fn content_encoding(&self) -> ContentEncoding {
        match self {
            Self::Gzip => ContentEncoding::Gzip,
            Self::Brotli => ContentEncoding::Brotli,
        }
    }
}

/// Whether content of this `content-type` is worth compressing.
pub fn content_type_compressible(content_type: &str) -> bool {
    content_type.starts_with("text/")
        || content_type == "application/javascript"
        || content_type == "application/json"
}

/// Compresses `content` of file served under `pack_path`.
///
/// Returns the pack path of compressed variant (eg. `/index.html.gz` for
/// `/index.html`) with compressed content. Returns [None] if there is no
/// sense in storing compressed version (empty file, compressed is not smaller
/// than raw).
///
/// Gzip stream has no timestamp, so output is reproducible.
pub fn compress(
    pack_path: &PackPath,
    content: &[u8],
    compression: Compression,
) -> Result<Option<(PackPath, Box<[u8]>)>, Error> {
    // no sense in compressing empty files
    if content.is_empty() {
        return Ok(None);
    }

    let content_compressed = match compression {
        Compression::Gzip => content_gzip_from_content(content)?,
        Compression::Brotli => content_brotli_from_content(content)?,
    };

    // if compressed is not shorter than original it makes no sense to store it
    if content_compressed.len() >= content.len() {
        log::debug!(
            "{pack_path}: {compression:?} does not reduce size ({} >= {}), keeping plain",
            content_compressed.len(),
            content.len()
        );
        return Ok(None);
    }

    let suffix = compression
        .content_encoding()
        .suffix()
        .context("compression without suffix")?;
    let pack_path_compressed = PackPath::from_string(format!("{pack_path}.{suffix}"));

    Ok(Some((pack_path_compressed, content_compressed)))
}

fn content_gzip_from_content(content: &[u8]) -> Result<Box<[u8]>, Error> {
    let mut content_gzip = GzEncoder::new(Vec::new(), GzipCompression::best());
    content_gzip.write_all(content).context("gzip")?;
    let content_gzip = content_gzip.finish().context("gzip")?;

    Ok(content_gzip.into_boxed_slice())
}
fn content_brotli_from_content(content: &[u8]) -> Result<Box<[u8]>, Error> {
    let mut content_cursor = Cursor::new(content);
    let mut content_brotli = Vec::new();
    brotli::BrotliCompress(
        &mut content_cursor,
        &mut content_brotli,
        &BrotliEncoderParams::default(),
    )
    .context("brotli")?;

    Ok(content_brotli.into_boxed_slice())
}
