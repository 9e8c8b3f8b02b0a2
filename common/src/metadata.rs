//! Metadata describing how a file is served, and partial overrides of it.

use crate::{cache_control::CacheControl, content_encoding::ContentEncoding};
use serde::Deserialize;

/// Response metadata of a single file. Each field ends up in the synthesized
/// response header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Metadata {
    /// `Content-type` header contents, eg. `text/html`.
    pub content_type: String,
    /// `Content-Encoding` of the stored bytes.
    pub content_encoding: ContentEncoding,
    /// `Cache-Control` policy.
    pub cache_control: CacheControl,
}

/// Per-file settings forced for a single, exact pack path (including its
/// encoding suffix). Fields left as [None] keep their inferred values.
///
/// Deserializes from a table like:
/// ```toml
/// content_type = "text/html"
/// cache_control = 300
/// headers_included = false
/// ```
#[derive(Deserialize, Clone, Default, PartialEq, Eq, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Override {
    /// Forced `Content-type`.
    pub content_type: Option<String>,
    /// Forced `Content-Encoding`.
    pub content_encoding: Option<ContentEncoding>,
    /// Forced `Cache-Control`.
    pub cache_control: Option<CacheControl>,
    /// The file already is a complete http response (status line, headers,
    /// blank line, body). No header is synthesized for it.
    pub headers_included: bool,
}
impl Override {
    /// Applies fields set in [self] over `metadata`.
    pub fn apply(
        &self,
        mut metadata: Metadata,
    ) -> Metadata {
        if let Some(content_type) = &self.content_type {
            metadata.content_type.clone_from(content_type);
        }
        if let Some(content_encoding) = self.content_encoding {
            metadata.content_encoding = content_encoding;
        }
        if let Some(cache_control) = self.cache_control {
            metadata.cache_control = cache_control;
        }
        metadata
    }
}
