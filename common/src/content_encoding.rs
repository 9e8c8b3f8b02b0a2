//! Content encoding of a served file.

use serde::Deserialize;
use std::fmt;

/// Encoding of the bytes stored for a file, as announced in the
/// `Content-Encoding` header.
///
/// Encoded variants are recognized by their file name suffix (`.br`, `.gz`).
/// Anything else is served as-is and announced as `text`.
#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ContentEncoding {
    /// Brotli compressed file, suffix `br`.
    #[serde(rename = "br")]
    Brotli,
    /// Gzip compressed file, suffix `gz`.
    #[serde(rename = "gzip")]
    Gzip,
    /// Not compressed.
    #[serde(rename = "text")]
    Text,
}
impl ContentEncoding {
    /// Maps file name suffix (without the dot) to encoding. Returns [None] for
    /// suffixes not naming an encoding, eg. `html`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "br" => Some(Self::Brotli),
            "gz" => Some(Self::Gzip),
            _ => None,
        }
    }

    /// File name suffix (without the dot) of encoded variants, [None] for
    /// [Self::Text].
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Brotli => Some("br"),
            Self::Gzip => Some("gz"),
            Self::Text => None,
        }
    }

    /// Token placed in the `Content-Encoding` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brotli => "br",
            Self::Gzip => "gzip",
            Self::Text => "text",
        }
    }
}
impl fmt::Display for ContentEncoding {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
