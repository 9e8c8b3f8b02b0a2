//! Http response header helpers. Contains [Header], the canned response
//! header stored in front of every file, and [normalize_line_endings] for
//! files carrying their own headers.

use crate::common::metadata::Metadata;
use anyhow::{Context, Error};

/// Status line of every synthesized response. Only successful, complete
/// responses are stored.
pub const STATUS_LINE: &str = "HTTP/1.0 200 OK";

/// Line terminator required by http.
pub const CRLF: &str = "\r\n";

/// Response header for a single file.
///
/// Built in two stages: [Self::fields] gives the header lines as text,
/// [Self::to_bytes] serializes them.
#[derive(Debug)]
pub struct Header<'a> {
    /// Resolved metadata of the file.
    pub metadata: &'a Metadata,
    /// Length of the body, as stored (eg. compressed length for gzip variant).
    pub content_length: usize,
    /// `Server` header value.
    pub server: &'a str,
}
impl<'a> Header<'a> {
    /// Creates [self].
    pub fn new(
        metadata: &'a Metadata,
        content_length: usize,
        server: &'a str,
    ) -> Self {
        Self {
            metadata,
            content_length,
            server,
        }
    }

    /// Header lines after the status line, as (name, value) in emission order.
    pub fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("Content-type", self.metadata.content_type.clone()),
            (
                "Content-Encoding",
                self.metadata.content_encoding.to_string(),
            ),
            ("Content-Length", self.content_length.to_string()),
            ("Cache-Control", self.metadata.cache_control.to_string()),
            ("Server", self.server.to_owned()),
        ]
    }

    /// Serializes status line and all fields, each terminated with CRLF.
    ///
    /// The blank line ending the header block is not included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut header = String::new();

        header.push_str(STATUS_LINE);
        header.push_str(CRLF);
        for (name, value) in self.fields() {
            header.push_str(name);
            header.push_str(": ");
            header.push_str(&value);
            header.push_str(CRLF);
        }

        header.into_bytes()
    }
}

/// Rewrites `content` so that every line ends with CRLF.
///
/// Used for files that already contain a complete response, edited by hand
/// and possibly saved with LF line endings. Trailing whitespace of each line is
/// removed. Content must be valid utf-8.
pub fn normalize_line_endings(content: &[u8]) -> Result<Vec<u8>, Error> {
    let content = std::str::from_utf8(content).context("file with headers is not valid utf-8")?;

    let mut normalized = String::with_capacity(content.len() + content.len() / 16);
    for line in content.lines() {
        normalized.push_str(line.trim_end());
        normalized.push_str(CRLF);
    }

    Ok(normalized.into_bytes())
}
